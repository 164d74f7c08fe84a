//! Event reconstruction
//!
//! Turns the raw record stream into typed events. Single-record events
//! (status, buffs, damage) convert one record at a time. Paired events
//! (casts, markers, squad markers, missiles, effects) are grouped by their
//! logical owner or tracking token and rebuilt with one ordered scan per
//! group; groups are independent and run on the rayon pool.
//!
//! Reconstruction never fails: unmatched ends are dropped, unmatched starts
//! are closed at log end and unresolved agents become `AgentId::UNKNOWN`.

#![warn(clippy::all)]

pub mod casts;
pub mod context;
pub mod dispatch;
pub mod effects;
mod group;
pub mod info;
pub mod markers;
pub mod missiles;
pub mod reconstructor;
pub mod squad_markers;

pub use context::{LogBounds, ResolutionContext};
pub use info::InfoTables;
pub use reconstructor::{EventSet, Reconstructor};
