//! Agent status events: combat state, life state, health, movement

use super::{IndexedEvent, TimedEvent};
use crate::types::{AgentId, Point3, Time};
use serde::{Deserialize, Serialize};

/// A single-record status change of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub time: Time,
    pub src: AgentId,
    pub kind: StatusKind,
}

/// Payload of a status event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatusKind {
    EnterCombat { subgroup: u64, spec: i32 },
    ExitCombat,
    Alive,
    Dead,
    Down,
    Spawn,
    Despawn,
    HealthUpdate { percent: f64 },
    BarrierUpdate { percent: f64 },
    MaxHealthUpdate { max_health: u64 },
    TeamChange { team: u64 },
    Targetable { targetable: bool },
    BreakbarState { state: u16 },
    BreakbarPercent { percent: f32 },
    Last90BeforeDown { time_since_last_90: u64 },
    Glider { deployed: bool },
    StunBreak { remaining: i32 },
    WeaponSwap { set: u64 },
    Position(Point3),
    Velocity(Point3),
    Rotation(Point3),
}

/// Field-less discriminant of [`StatusKind`], used as the index key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum StatusTag {
    EnterCombat,
    ExitCombat,
    Alive,
    Dead,
    Down,
    Spawn,
    Despawn,
    HealthUpdate,
    BarrierUpdate,
    MaxHealthUpdate,
    TeamChange,
    Targetable,
    BreakbarState,
    BreakbarPercent,
    Last90BeforeDown,
    Glider,
    StunBreak,
    WeaponSwap,
    Position,
    Velocity,
    Rotation,
}

impl StatusKind {
    /// Discriminant of this payload
    pub fn tag(&self) -> StatusTag {
        match self {
            StatusKind::EnterCombat { .. } => StatusTag::EnterCombat,
            StatusKind::ExitCombat => StatusTag::ExitCombat,
            StatusKind::Alive => StatusTag::Alive,
            StatusKind::Dead => StatusTag::Dead,
            StatusKind::Down => StatusTag::Down,
            StatusKind::Spawn => StatusTag::Spawn,
            StatusKind::Despawn => StatusTag::Despawn,
            StatusKind::HealthUpdate { .. } => StatusTag::HealthUpdate,
            StatusKind::BarrierUpdate { .. } => StatusTag::BarrierUpdate,
            StatusKind::MaxHealthUpdate { .. } => StatusTag::MaxHealthUpdate,
            StatusKind::TeamChange { .. } => StatusTag::TeamChange,
            StatusKind::Targetable { .. } => StatusTag::Targetable,
            StatusKind::BreakbarState { .. } => StatusTag::BreakbarState,
            StatusKind::BreakbarPercent { .. } => StatusTag::BreakbarPercent,
            StatusKind::Last90BeforeDown { .. } => StatusTag::Last90BeforeDown,
            StatusKind::Glider { .. } => StatusTag::Glider,
            StatusKind::StunBreak { .. } => StatusTag::StunBreak,
            StatusKind::WeaponSwap { .. } => StatusTag::WeaponSwap,
            StatusKind::Position(_) => StatusTag::Position,
            StatusKind::Velocity(_) => StatusTag::Velocity,
            StatusKind::Rotation(_) => StatusTag::Rotation,
        }
    }
}

impl StatusTag {
    /// Key used by the store's key indices
    pub fn key(self) -> u32 {
        self as u32
    }
}

impl TimedEvent for StatusEvent {
    fn time(&self) -> Time {
        self.time
    }
}

impl IndexedEvent for StatusEvent {
    fn owner(&self) -> AgentId {
        self.src
    }

    fn key(&self) -> Option<u32> {
        Some(self.kind.tag().key())
    }
}
