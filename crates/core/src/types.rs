//! Core types for the evtc engine
//!
//! This module defines the foundational identifiers:
//! - Time: log-relative millisecond timestamps
//! - AgentId: arena identity of a logical actor, with the UNKNOWN sentinel
//! - ContentGuid: stable identifier of an effect/marker/skill/species
//! - Point3: a decoded world position or orientation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Millisecond timestamp as written by the combat log
pub type Time = i64;

/// Fixed server-tick jitter used as the default correlation epsilon (ms)
pub const SERVER_DELAY_CONSTANT: Time = 10;

/// Identity of a logical agent inside one log's agent arena
///
/// Slot 0 is reserved for [`AgentId::UNKNOWN`], the absorbing sentinel
/// returned whenever a raw reference cannot be resolved. Derived equality
/// is structural (suitable for map keys); use [`AgentId::is`] for the
/// semantic comparison under which UNKNOWN never matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(u32);

impl AgentId {
    /// The unresolved-agent sentinel
    pub const UNKNOWN: AgentId = AgentId(0);

    /// Create an id from an arena slot
    #[inline]
    pub const fn from_index(index: u32) -> Self {
        AgentId(index)
    }

    /// Arena slot of this id
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// True for the unresolved sentinel
    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == 0
    }

    /// Semantic identity comparison
    ///
    /// Always false when either side is UNKNOWN, including
    /// `UNKNOWN.is(UNKNOWN)`.
    #[inline]
    pub const fn is(self, other: AgentId) -> bool {
        self.0 != 0 && self.0 == other.0
    }
}

impl Default for AgentId {
    fn default() -> Self {
        AgentId::UNKNOWN
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "agent#unknown")
        } else {
            write!(f, "agent#{}", self.0)
        }
    }
}

/// Stable content identifier
///
/// Numeric content ids are assigned per log; the GUID is what encounter
/// logic keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentGuid(Uuid);

impl ContentGuid {
    /// The all-zero GUID, never registered by a real log
    pub const NIL: ContentGuid = ContentGuid(Uuid::nil());

    /// Create a GUID from raw bytes
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Assemble a GUID from the two 64-bit halves carried by a record
    ///
    /// The record stores the GUID bytes little-endian in `src_agent`
    /// followed by `dst_agent`.
    pub fn from_halves(low: u64, high: u64) -> Self {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&low.to_le_bytes());
        bytes[8..].copy_from_slice(&high.to_le_bytes());
        Self::from_bytes(bytes)
    }

    /// Parse a GUID from its hex representation (hyphens optional)
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Raw bytes of this GUID
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// True for the all-zero GUID
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for ContentGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple().to_string().to_uppercase())
    }
}

impl FromStr for ContentGuid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Three-component world vector (position, orientation, velocity)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Point3 {
    /// Create a new point
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point3) -> f32 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
