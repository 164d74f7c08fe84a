//! Reconstructed casts

use super::{IndexedEvent, SpanEvent, TimedEvent};
use crate::types::{AgentId, Time};
use serde::{Deserialize, Serialize};

/// How a cast ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastStatus {
    /// Closed by a reset activation
    Completed,
    /// Closed by a fire-cancel activation
    Cancelled,
    /// Closed by a cancel-cancel activation
    Interrupted,
    /// Closed by another start, or still open at log end
    Unknown,
}

/// One cast, from activation start to its resolved end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastEvent {
    pub time: Time,
    pub caster: AgentId,
    pub skill_id: u32,
    /// Duration announced by the start record
    pub expected_duration: i32,
    pub end_time: Time,
    pub status: CastStatus,
    /// Started under quickness
    pub quickness: bool,
    /// Start predates the log; `time` was clamped to the log start
    pub truncated: bool,
}

impl CastEvent {
    /// Shorten the cast so it ends no later than `time`
    ///
    /// The end never moves before the start.
    pub fn cut_at(&mut self, time: Time) {
        if self.end_time > time {
            self.end_time = time.max(self.time);
        }
    }
}

impl TimedEvent for CastEvent {
    fn time(&self) -> Time {
        self.time
    }
}

impl SpanEvent for CastEvent {
    fn end_time(&self) -> Time {
        self.end_time
    }
}

impl IndexedEvent for CastEvent {
    fn owner(&self) -> AgentId {
        self.caster
    }

    fn key(&self) -> Option<u32> {
        Some(self.skill_id)
    }
}
