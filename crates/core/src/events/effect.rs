//! Visual effects anchored on the ground or on an agent

use super::{IndexedEvent, SpanEvent, TimedEvent};
use crate::types::{AgentId, ContentGuid, Point3, Time};
use serde::{Deserialize, Serialize};

/// Where an effect is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectAnchor {
    Ground { position: Point3, orientation: Point3 },
    Agent { agent: AgentId },
}

/// An effect from its create record to its resolved end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectEvent {
    pub time: Time,
    pub src: AgentId,
    /// Log-local effect id, resolvable through the content table
    pub effect_id: u32,
    /// GUID registered for `effect_id`, if the log carried one
    pub guid: Option<ContentGuid>,
    pub tracking_id: u32,
    pub anchor: EffectAnchor,
    /// Duration announced by the create record, 0 when unknown
    pub duration: i32,
    pub end_time: Time,
    /// Closed by a matching remove record
    pub removed: bool,
}

impl EffectEvent {
    /// Agent the effect is attached to
    pub fn dst(&self) -> Option<AgentId> {
        match self.anchor {
            EffectAnchor::Agent { agent } => Some(agent),
            EffectAnchor::Ground { .. } => None,
        }
    }

    /// Ground position, if any
    pub fn position(&self) -> Option<Point3> {
        match self.anchor {
            EffectAnchor::Ground { position, .. } => Some(position),
            EffectAnchor::Agent { .. } => None,
        }
    }
}

impl TimedEvent for EffectEvent {
    fn time(&self) -> Time {
        self.time
    }
}

impl SpanEvent for EffectEvent {
    fn end_time(&self) -> Time {
        self.end_time
    }
}

impl IndexedEvent for EffectEvent {
    fn owner(&self) -> AgentId {
        self.src
    }

    fn target(&self) -> Option<AgentId> {
        self.dst()
    }

    fn key(&self) -> Option<u32> {
        Some(self.effect_id)
    }
}
