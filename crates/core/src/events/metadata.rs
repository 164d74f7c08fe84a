//! Log-level metadata and the multi-part buff/skill descriptions

use super::{IndexedEvent, TimedEvent};
use crate::types::{AgentId, Time};
use serde::{Deserialize, Serialize};

/// One formula describing how a buff modifies an attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffFormula {
    pub formula_type: i32,
    pub attr1: i32,
    pub attr2: u32,
    pub constant: f32,
    pub coefficient: f32,
    pub trait_src: u32,
    pub trait_self: u32,
    pub npc: bool,
    pub player: bool,
    pub on_break: bool,
}

/// Static description of a buff, assembled from info and formula records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffInfo {
    pub buff_id: u32,
    pub category: u8,
    pub stacking_type: u8,
    pub max_stacks: u16,
    pub duration_cap: u32,
    pub probably_invulnerable: bool,
    pub probably_invert: bool,
    pub probably_resistance: bool,
    pub formulas: Vec<BuffFormula>,
    info_seen: bool,
}

impl BuffInfo {
    /// Empty description for `buff_id`
    pub fn new(buff_id: u32) -> Self {
        Self {
            buff_id,
            category: 0,
            stacking_type: 0,
            max_stacks: 0,
            duration_cap: 0,
            probably_invulnerable: false,
            probably_invert: false,
            probably_resistance: false,
            formulas: Vec::new(),
            info_seen: false,
        }
    }

    /// Whether an info record already completed this description
    pub fn has_info(&self) -> bool {
        self.info_seen
    }

    /// Take the info fields from `other`
    ///
    /// Formulas already attached stay; a later info record for the same
    /// buff overwrites the fields of an earlier one.
    pub fn complete_with(&mut self, other: &BuffInfo) {
        self.category = other.category;
        self.stacking_type = other.stacking_type;
        self.max_stacks = other.max_stacks;
        self.duration_cap = other.duration_cap;
        self.probably_invulnerable = other.probably_invulnerable;
        self.probably_invert = other.probably_invert;
        self.probably_resistance = other.probably_resistance;
        self.info_seen = true;
    }

    /// Mark the info fields as set
    pub fn with_info(mut self) -> Self {
        self.info_seen = true;
        self
    }
}

/// Timing of one action inside a skill's animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTiming {
    pub action: u64,
    pub at_millisecond: u64,
}

/// Static description of a skill, assembled from info and timing records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillInfo {
    pub skill_id: u32,
    pub recharge: f32,
    pub range0: f32,
    pub range1: f32,
    pub tooltip_time: f32,
    pub timings: Vec<SkillTiming>,
    info_seen: bool,
}

impl SkillInfo {
    /// Empty description for `skill_id`
    pub fn new(skill_id: u32) -> Self {
        Self {
            skill_id,
            recharge: 0.0,
            range0: 0.0,
            range1: 0.0,
            tooltip_time: 0.0,
            timings: Vec::new(),
            info_seen: false,
        }
    }

    /// Whether an info record already completed this description
    pub fn has_info(&self) -> bool {
        self.info_seen
    }

    /// Set the info fields; timings already attached stay
    pub fn complete(&mut self, recharge: f32, range0: f32, range1: f32, tooltip_time: f32) {
        self.recharge = recharge;
        self.range0 = range0;
        self.range1 = range1;
        self.tooltip_time = tooltip_time;
        self.info_seen = true;
    }
}

/// Squad combat start or end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadCombatBoundary {
    pub time: Time,
    pub server_unix_timestamp: u32,
}

/// Link between an attack target gadget and the agent it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackTargetEvent {
    pub time: Time,
    pub attack_target: AgentId,
    pub target: AgentId,
    pub targetable: bool,
}

impl TimedEvent for AttackTargetEvent {
    fn time(&self) -> Time {
        self.time
    }
}

impl IndexedEvent for AttackTargetEvent {
    fn owner(&self) -> AgentId {
        self.attack_target
    }

    fn target(&self) -> Option<AgentId> {
        Some(self.target)
    }
}

/// Metadata collected from state change records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogMetadata {
    pub gw2_build: Option<u64>,
    pub language: Option<u64>,
    pub point_of_view: Option<AgentId>,
    pub map_ids: Vec<(Time, u64)>,
    pub log_start: Option<SquadCombatBoundary>,
    pub log_end: Option<SquadCombatBoundary>,
    pub squad_combat_starts: Vec<SquadCombatBoundary>,
    pub squad_combat_ends: Vec<SquadCombatBoundary>,
    pub instance_start: Option<u64>,
    pub tick_rates: Vec<(Time, u64)>,
    pub fractal_scale: Option<u64>,
    pub shards: Vec<u64>,
    pub integrity_errors: Vec<String>,
    pub attack_targets: Vec<AttackTargetEvent>,
}
