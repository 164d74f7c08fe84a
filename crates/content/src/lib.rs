//! Content resolution
//!
//! Numeric ids for effects, markers, skills and species are assigned per log.
//! [`ContentTable`] maps them to stable [`ContentGuid`]s so encounter logic
//! can key on content that is comparable across logs. [`SkillTable`] holds
//! the skill names shipped in the log's skill list.
//!
//! [`ContentGuid`]: evtc_core::ContentGuid

#![warn(clippy::all)]

pub mod skills;
pub mod table;

pub use skills::{RawSkill, SkillTable};
pub use table::{ContentTable, ContentTableBuilder};
