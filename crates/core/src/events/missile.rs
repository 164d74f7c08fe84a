//! Missiles: one create, any number of launches, at most one removal

use super::{IndexedEvent, SpanEvent, TimedEvent};
use crate::types::{AgentId, Point3, Time};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A (re)launch of an existing missile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissileLaunch {
    pub time: Time,
    /// Targeted agent, unknown for ground-targeted launches
    pub target: AgentId,
    pub speed: i32,
    pub flags: i32,
}

/// Removal of a missile, on impact or expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissileRemoval {
    pub time: Time,
    pub did_hit: bool,
    /// Agent that took the hit, unknown when it missed
    pub damaging_agent: AgentId,
}

/// A missile reconstructed from its create/launch/remove records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissileEvent {
    pub time: Time,
    pub src: AgentId,
    pub skill_id: u32,
    pub tracking_id: u32,
    pub origin: Point3,
    pub launches: SmallVec<[MissileLaunch; 2]>,
    pub removal: Option<MissileRemoval>,
    pub end_time: Time,
}

impl MissileEvent {
    /// True when the missile was removed by an impact
    pub fn did_hit(&self) -> bool {
        self.removal.as_ref().map_or(false, |r| r.did_hit)
    }

    /// Agents targeted by any launch
    pub fn targets(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.launches
            .iter()
            .map(|l| l.target)
            .filter(|t| !t.is_unknown())
    }
}

impl TimedEvent for MissileEvent {
    fn time(&self) -> Time {
        self.time
    }
}

impl SpanEvent for MissileEvent {
    fn end_time(&self) -> Time {
        self.end_time
    }
}

impl IndexedEvent for MissileEvent {
    fn owner(&self) -> AgentId {
        self.src
    }

    fn target(&self) -> Option<AgentId> {
        self.removal
            .as_ref()
            .filter(|r| r.did_hit)
            .map(|r| r.damaging_agent)
    }

    fn key(&self) -> Option<u32> {
        Some(self.skill_id)
    }
}
