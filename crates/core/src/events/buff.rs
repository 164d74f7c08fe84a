//! Buff events: applications, extensions, removals and stack bookkeeping

use super::{IndexedEvent, TimedEvent};
use crate::types::{AgentId, Time};
use serde::{Deserialize, Serialize};

/// A buff event on one receiving agent
///
/// `src` is the agent credited with the event (the applier, or the remover
/// for removals) and `dst` the agent carrying the buff. Stack bookkeeping
/// events have no credited source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffEvent {
    pub time: Time,
    pub src: AgentId,
    pub dst: AgentId,
    pub buff_id: u32,
    pub kind: BuffEventKind,
}

/// Payload of a buff event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffEventKind {
    Apply {
        applied_duration: i32,
        overridden_duration: u32,
        instance_id: u32,
        active: bool,
        /// Present on the agent when recording started
        initial: bool,
    },
    Extension {
        extended_duration: i32,
        previous_duration: u32,
    },
    RemoveAll {
        removed_duration: i32,
        removed_stacks: i32,
    },
    RemoveSingle {
        removed_duration: i32,
        instance_id: u32,
    },
    RemoveManual {
        removed_duration: i32,
    },
    StackActive {
        instance_id: u32,
    },
    StackReset {
        instance_id: u32,
        duration: i32,
    },
}

impl BuffEvent {
    /// Application (including initial buffs)
    pub fn is_apply(&self) -> bool {
        matches!(self.kind, BuffEventKind::Apply { .. })
    }

    /// Application or extension
    pub fn is_apply_like(&self) -> bool {
        matches!(
            self.kind,
            BuffEventKind::Apply { .. } | BuffEventKind::Extension { .. }
        )
    }

    /// Extension of an existing stack
    pub fn is_extension(&self) -> bool {
        matches!(self.kind, BuffEventKind::Extension { .. })
    }

    /// Any kind of removal
    pub fn is_remove(&self) -> bool {
        matches!(
            self.kind,
            BuffEventKind::RemoveAll { .. }
                | BuffEventKind::RemoveSingle { .. }
                | BuffEventKind::RemoveManual { .. }
        )
    }

    /// Removal of every stack
    pub fn is_remove_all(&self) -> bool {
        matches!(self.kind, BuffEventKind::RemoveAll { .. })
    }

    /// Duration applied, for applications
    pub fn applied_duration(&self) -> Option<i32> {
        match self.kind {
            BuffEventKind::Apply {
                applied_duration, ..
            } => Some(applied_duration),
            _ => None,
        }
    }

    /// Duration added, for extensions
    pub fn extended_duration(&self) -> Option<i32> {
        match self.kind {
            BuffEventKind::Extension {
                extended_duration, ..
            } => Some(extended_duration),
            _ => None,
        }
    }
}

impl TimedEvent for BuffEvent {
    fn time(&self) -> Time {
        self.time
    }
}

impl IndexedEvent for BuffEvent {
    fn owner(&self) -> AgentId {
        self.src
    }

    fn target(&self) -> Option<AgentId> {
        Some(self.dst)
    }

    fn key(&self) -> Option<u32> {
        Some(self.buff_id)
    }
}
