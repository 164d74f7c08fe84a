//! Reconstructed event model
//!
//! One struct per event category, each with a `kind` sum type for the
//! variants of that category. Shared fields (time, source, destination,
//! skill/buff/content id) live on the struct so the store can index every
//! category the same way through [`IndexedEvent`].

pub mod buff;
pub mod cast;
pub mod damage;
pub mod effect;
pub mod marker;
pub mod metadata;
pub mod missile;
pub mod status;

pub use buff::{BuffEvent, BuffEventKind};
pub use cast::{CastEvent, CastStatus};
pub use damage::{DamageEvent, DamageKind, HitResult};
pub use effect::{EffectAnchor, EffectEvent};
pub use marker::{MarkerEvent, SquadMarkerEvent};
pub use metadata::{
    AttackTargetEvent, BuffFormula, BuffInfo, LogMetadata, SkillInfo, SkillTiming,
    SquadCombatBoundary,
};
pub use missile::{MissileEvent, MissileLaunch, MissileRemoval};
pub use status::{StatusEvent, StatusKind, StatusTag};

use crate::types::{AgentId, Time};

/// Anything placed on the log's timeline
pub trait TimedEvent {
    /// Start time of the event
    fn time(&self) -> Time;
}

/// An event the store can place in its owner/target/key indices
pub trait IndexedEvent: TimedEvent {
    /// Agent the event belongs to (source, caster, marker owner)
    fn owner(&self) -> AgentId;

    /// Agent the event lands on, if the category has one
    fn target(&self) -> Option<AgentId> {
        None
    }

    /// Skill, buff, marker or content id the event is keyed by
    fn key(&self) -> Option<u32> {
        None
    }
}

/// A paired event with a resolved end
pub trait SpanEvent: TimedEvent {
    /// Resolved end time, never before [`TimedEvent::time`]
    fn end_time(&self) -> Time;

    /// Duration between start and resolved end
    fn actual_duration(&self) -> Time {
        self.end_time() - self.time()
    }

    /// True when `time` falls in `[start, end]`
    fn covers(&self, time: Time) -> bool {
        self.time() <= time && time <= self.end_time()
    }
}

impl<T: TimedEvent + ?Sized> TimedEvent for &T {
    fn time(&self) -> Time {
        (**self).time()
    }
}
