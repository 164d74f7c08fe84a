//! Damage events: direct hits, condition ticks, breakbar and crowd control

use super::{IndexedEvent, TimedEvent};
use crate::enums::{ConditionResult, Iff, PhysicalResult};
use crate::types::{AgentId, Time};
use serde::{Deserialize, Serialize};

/// Result of a health damage record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitResult {
    Physical(PhysicalResult),
    Condition(ConditionResult),
}

impl HitResult {
    /// True when damage was actually dealt
    pub fn is_hit(self) -> bool {
        match self {
            HitResult::Physical(r) => r.is_hit(),
            HitResult::Condition(r) => r == ConditionResult::ExpectedToHit,
        }
    }
}

/// Payload of a damage event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DamageKind {
    Health {
        damage: i32,
        shield_damage: u32,
        result: HitResult,
    },
    Breakbar {
        damage: f64,
    },
    CrowdControl {
        duration: i32,
    },
}

/// One damage event from `src` to `dst`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub time: Time,
    pub src: AgentId,
    pub dst: AgentId,
    pub skill_id: u32,
    pub iff: Iff,
    pub flanking: bool,
    pub against_moving: bool,
    pub kind: DamageKind,
}

impl DamageEvent {
    /// Health damage that landed
    pub fn is_hit(&self) -> bool {
        matches!(self.kind, DamageKind::Health { result, .. } if result.is_hit())
    }

    /// Condition tick
    pub fn is_condition(&self) -> bool {
        matches!(
            self.kind,
            DamageKind::Health {
                result: HitResult::Condition(_),
                ..
            }
        )
    }

    /// Health damage dealt, zero for breakbar and crowd control
    pub fn health_damage(&self) -> i32 {
        match self.kind {
            DamageKind::Health { damage, .. } => damage,
            _ => 0,
        }
    }
}

impl TimedEvent for DamageEvent {
    fn time(&self) -> Time {
        self.time
    }
}

impl IndexedEvent for DamageEvent {
    fn owner(&self) -> AgentId {
        self.src
    }

    fn target(&self) -> Option<AgentId> {
        Some(self.dst)
    }

    fn key(&self) -> Option<u32> {
        Some(self.skill_id)
    }
}
