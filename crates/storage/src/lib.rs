//! Time-indexed event store
//!
//! Every event category lives in one [`EventTable`]: a time-sorted vector
//! plus position indices by owner, target, key and the key+agent pairs.
//! Lookups hand out [`EventRun`] views that support O(log n) positional
//! queries without copying.
//!
//! [`EventStore`] groups the tables and makes agent lookups identity-aware:
//! an englobed agent sees its parent's collection narrowed to its own aware
//! window.

#![warn(clippy::all)]

pub mod run;
pub mod store;
pub mod table;

pub use run::{EventRun, RunIter};
pub use store::EventStore;
pub use table::EventTable;
