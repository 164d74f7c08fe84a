//! Skill names from the log's skill list

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One entry of the skill list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSkill {
    pub id: u32,
    pub name: String,
}

impl RawSkill {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Skill id to name lookup
#[derive(Debug, Clone, Default)]
pub struct SkillTable {
    names: FxHashMap<u32, String>,
}

impl SkillTable {
    /// Build from the skill list; the first entry for an id wins
    pub fn new(skills: &[RawSkill]) -> Self {
        let mut names = FxHashMap::default();
        for skill in skills {
            names
                .entry(skill.id)
                .or_insert_with(|| skill.name.trim_end_matches('\0').to_string());
        }
        Self { names }
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.names.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
