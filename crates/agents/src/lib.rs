//! Agent identity model
//!
//! Raw agent references in a log are only meaningful at a point in time:
//! addresses and instance ids are recycled. This crate turns the raw agent
//! table into an arena of [`AgentItem`]s with aware windows and answers
//! time-scoped lookups through the frozen [`AgentData`].
//!
//! Lifecycle:
//! 1. [`AgentData::build`] runs the prepass over the agent table and every
//!    record (kinds, names, windows, instance ids, masters).
//! 2. [`AgentData::into_overrides`] opens the [`AgentOverrides`] phase, the
//!    only place identities may be rewritten (merges, englobed agents, ...).
//! 3. [`AgentOverrides::freeze`] rebuilds the lookup indices and returns the
//!    read-only model used by everything downstream.

#![warn(clippy::all)]

pub mod builder;
pub mod data;
pub mod item;
pub mod overrides;

pub use builder::RawAgent;
pub use data::AgentData;
pub use item::{AgentItem, AgentKind, MergeRecord};
pub use overrides::AgentOverrides;
