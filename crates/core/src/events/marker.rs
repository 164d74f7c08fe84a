//! Agent markers and squad ground markers

use super::{IndexedEvent, SpanEvent, TimedEvent};
use crate::types::{AgentId, ContentGuid, Point3, Time};
use serde::{Deserialize, Serialize};

/// A marker displayed over an agent's head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerEvent {
    pub time: Time,
    pub owner: AgentId,
    /// Log-local marker id, resolvable through the content table
    pub marker_id: u32,
    /// GUID registered for `marker_id`, if the log carried one
    pub guid: Option<ContentGuid>,
    pub end_time: Time,
    pub commander_tag: bool,
}

impl TimedEvent for MarkerEvent {
    fn time(&self) -> Time {
        self.time
    }
}

impl SpanEvent for MarkerEvent {
    fn end_time(&self) -> Time {
        self.end_time
    }
}

impl IndexedEvent for MarkerEvent {
    fn owner(&self) -> AgentId {
        self.owner
    }

    fn key(&self) -> Option<u32> {
        Some(self.marker_id)
    }
}

/// A squad ground marker placed at a fixed position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadMarkerEvent {
    pub time: Time,
    /// Ground marker slot
    pub index: u32,
    pub position: Point3,
    pub end_time: Time,
}

impl TimedEvent for SquadMarkerEvent {
    fn time(&self) -> Time {
        self.time
    }
}

impl SpanEvent for SquadMarkerEvent {
    fn end_time(&self) -> Time {
        self.end_time
    }
}

impl IndexedEvent for SquadMarkerEvent {
    fn owner(&self) -> AgentId {
        AgentId::UNKNOWN
    }

    fn key(&self) -> Option<u32> {
        Some(self.index)
    }
}
