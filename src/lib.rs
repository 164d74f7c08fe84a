//! evtc - combat log ingestion and correlation
//!
//! Turns the record stream of a combat log into a time-indexed model of
//! agents, buffs, damage, casts, markers, missiles and effects, and answers
//! time-window correlation queries over it.
//!
//! # Quick Start
//!
//! ```ignore
//! use evtc::{EngineConfig, LogHeader, LogParser};
//!
//! let mut parser = LogParser::new(LogHeader::new(build), agents, skills, EngineConfig::default())?;
//! for record in records {
//!     parser.push(record)?;
//! }
//! let model = parser.finish()?;
//! let boss = model.resolve(boss_address, 0);
//! let gained = model.correlator().has_gained_buff(740, boss, 10_000);
//! ```
//!
//! # Architecture
//!
//! - [`agents`]: time-scoped agent identities, merges, masters, englobed agents
//! - [`content`]: per-log numeric id to GUID table, skill names
//! - [`reconstruct`]: single-record conversion and paired-event reconstruction
//! - [`storage`]: time-sorted, indexed event tables
//! - [`query`]: epsilon-window correlation helpers
//! - [`engine`]: the pipeline tying them together

pub use evtc_agents as agents;
pub use evtc_content as content;
pub use evtc_core as core;
pub use evtc_engine as engine;
pub use evtc_query as query;
pub use evtc_reconstruct as reconstruct;
pub use evtc_storage as storage;

pub use evtc_agents::{AgentData, AgentItem, AgentKind, AgentOverrides, RawAgent};
pub use evtc_content::{ContentTable, RawSkill, SkillTable};
pub use evtc_core::events;
pub use evtc_core::{
    AgentId, CombatItem, ContentCategory, ContentGuid, EngineConfig, Error, LogHeader, Result,
    StateChange, Time, SERVER_DELAY_CONSTANT,
};
pub use evtc_engine::{LogModel, LogParser, PostProcessor};
pub use evtc_query::{find_related, Correlator};
pub use evtc_storage::{EventRun, EventStore, EventTable};
