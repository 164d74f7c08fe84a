//! Buff and skill descriptions assembled from multi-part info records
//!
//! Every record for an id completes the same description: info records set
//! its fields (a later one overwrites an earlier one), formula and timing
//! records are appended.

use evtc_core::events::{BuffFormula, BuffInfo, SkillInfo, SkillTiming};
use evtc_core::record::unpack_f32_pair;
use evtc_core::{CombatItem, StateChange};
use rustc_hash::FxHashMap;

/// Buff and skill descriptions, keyed by id
#[derive(Debug, Clone, Default)]
pub struct InfoTables {
    pub buffs: FxHashMap<u32, BuffInfo>,
    pub skills: FxHashMap<u32, SkillInfo>,
    /// Buff ids by the category of their latest info record, in arrival order
    by_category: FxHashMap<u8, Vec<u32>>,
}

impl InfoTables {
    /// Fold every info, formula and timing record
    pub fn from_records(records: &[&CombatItem]) -> Self {
        let mut tables = InfoTables::default();
        for record in records {
            tables.observe(record);
        }
        tables
    }

    /// Fold one record; records of other kinds are ignored
    pub fn observe(&mut self, record: &CombatItem) {
        match record.state_change() {
            StateChange::BuffInfo => {
                let info = buff_info(record);
                let entry = self
                    .buffs
                    .entry(record.skill_id)
                    .or_insert_with(|| BuffInfo::new(record.skill_id));
                let previous = entry.has_info().then_some(entry.category);
                entry.complete_with(&info);
                self.recategorize(record.skill_id, previous, info.category);
            }
            StateChange::BuffFormula => {
                self.buffs
                    .entry(record.skill_id)
                    .or_insert_with(|| BuffInfo::new(record.skill_id))
                    .formulas
                    .push(buff_formula(record));
            }
            StateChange::SkillInfo => {
                let [recharge, range0] = unpack_f32_pair(record.src_agent);
                let [range1, tooltip_time] = unpack_f32_pair(record.dst_agent);
                self.skills
                    .entry(record.skill_id)
                    .or_insert_with(|| SkillInfo::new(record.skill_id))
                    .complete(recharge, range0, range1, tooltip_time);
            }
            StateChange::SkillTiming => {
                self.skills
                    .entry(record.skill_id)
                    .or_insert_with(|| SkillInfo::new(record.skill_id))
                    .timings
                    .push(SkillTiming {
                        action: record.src_agent,
                        at_millisecond: record.dst_agent,
                    });
            }
            _ => {}
        }
    }

    fn recategorize(&mut self, buff_id: u32, previous: Option<u8>, category: u8) {
        if previous == Some(category) {
            return;
        }
        if let Some(old) = previous.and_then(|c| self.by_category.get_mut(&c)) {
            old.retain(|&id| id != buff_id);
        }
        self.by_category.entry(category).or_default().push(buff_id);
    }

    pub fn buff(&self, buff_id: u32) -> Option<&BuffInfo> {
        self.buffs.get(&buff_id)
    }

    /// Buffs whose latest info record carries `category`
    pub fn buffs_in_category(&self, category: u8) -> impl Iterator<Item = &BuffInfo> {
        self.by_category
            .get(&category)
            .into_iter()
            .flatten()
            .filter_map(|id| self.buffs.get(id))
    }

    pub fn skill(&self, skill_id: u32) -> Option<&SkillInfo> {
        self.skills.get(&skill_id)
    }
}

fn buff_info(record: &CombatItem) -> BuffInfo {
    let mut info = BuffInfo::new(record.skill_id);
    info.category = record.is_offcycle;
    info.stacking_type = (record.pad & 0xFF) as u8;
    info.max_stacks = record.src_master_instid;
    info.duration_cap = record.overstack_value;
    info.probably_invulnerable = record.is_flanking != 0;
    info.probably_invert = record.is_shields != 0;
    info.probably_resistance = record.is_ninety != 0;
    info.with_info()
}

fn buff_formula(record: &CombatItem) -> BuffFormula {
    let [constant, coefficient] = unpack_f32_pair(record.src_agent);
    BuffFormula {
        formula_type: record.value,
        attr1: record.buff_dmg,
        attr2: record.overstack_value,
        constant,
        coefficient,
        trait_src: (record.dst_agent & 0xFFFF_FFFF) as u32,
        trait_self: (record.dst_agent >> 32) as u32,
        npc: record.is_flanking != 0,
        player: record.is_shields != 0,
        on_break: record.is_offcycle != 0,
    }
}
