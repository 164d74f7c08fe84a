//! Core types for the evtc engine
//!
//! This crate defines the vocabulary shared by every other crate:
//! - Time, AgentId, ContentGuid, Point3: identifiers and primitive values
//! - CombatItem: one decoded raw record, and its classification
//! - Enums: state changes, activations, buff removals, hit results
//! - LogHeader: evtc build and the behavior thresholds keyed on it
//! - Events: one sum type per reconstructed event category
//! - EngineConfig: `evtc.toml` configuration
//! - Error: error type and `Result` alias

#![warn(clippy::all)]

pub mod builds;
pub mod config;
pub mod enums;
pub mod error;
pub mod events;
pub mod record;
pub mod types;

pub use builds::{LogHeader, MarkerProtocol};
pub use config::EngineConfig;
pub use enums::{
    Activation, BuffRemove, ConditionResult, ContentCategory, Iff, PhysicalResult, StateChange,
};
pub use error::{Error, Result};
pub use events::{IndexedEvent, SpanEvent, TimedEvent};
pub use record::{CombatItem, RecordKind};
pub use types::{AgentId, ContentGuid, Point3, Time, SERVER_DELAY_CONSTANT};
