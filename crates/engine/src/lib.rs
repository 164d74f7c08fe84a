//! Ingestion pipeline
//!
//! [`LogParser`] collects a log's records and, on
//! [`finish`](LogParser::finish), runs the identity prepass, the
//! post-processors, reconstruction and indexing. The result is a frozen
//! [`LogModel`] that answers lookups and hands out a
//! [`Correlator`](evtc_query::Correlator).
//!
//! ```ignore
//! let mut parser = LogParser::new(header, agents, skills, EngineConfig::default())?;
//! for record in records {
//!     parser.push(record)?;
//! }
//! let model = parser.finish()?;
//! let hit = model.correlator().has_gained_buff(740, boss, 1000);
//! ```

#![warn(clippy::all)]

pub mod model;
pub mod parser;

pub use model::LogModel;
pub use parser::{LogParser, PostProcessor};
