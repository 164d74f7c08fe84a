//! Time-window correlation
//!
//! Higher-level logic asks questions like "did agent A gain buff B around
//! time T" or "is A casting S at T". Every answer here is one lookup into
//! the [`evtc_storage::EventStore`], narrowed with [`find_related`] (a binary
//! search on the time-sorted run) and finished with a predicate.
//!
//! Two events are treated as the same occurrence when their timestamps
//! differ by strictly less than the correlation epsilon, which defaults to
//! [`evtc_core::SERVER_DELAY_CONSTANT`].

#![warn(clippy::all)]

pub mod correlator;
pub mod grouping;
pub mod related;

pub use correlator::Correlator;
pub use grouping::epsilon_windows;
pub use related::{find_related, find_related_in};
