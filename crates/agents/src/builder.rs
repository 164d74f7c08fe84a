//! Agent prepass: raw agent table plus every record to a frozen arena

use crate::data::AgentData;
use crate::item::{AgentItem, AgentKind};
use evtc_core::{AgentId, CombatItem, Time};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

/// `is_elite` value carried by NPCs and gadgets
const NON_PLAYER_ELITE: u32 = 0xFFFF_FFFF;

/// High half of `prof` carried by gadgets
const GADGET_PROF_MASK: u32 = 0xFFFF_0000;

/// One entry of the agent table, as decoded from the log container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAgent {
    pub address: u64,
    pub prof: u32,
    pub is_elite: u32,
    pub toughness: u16,
    pub concentration: u16,
    pub healing: u16,
    pub condition: u16,
    pub hitbox_width: u16,
    pub hitbox_height: u16,
    /// For players `character\0account\0subgroup`, otherwise the display name
    pub name: String,
}

impl RawAgent {
    /// NPC entry with the given species id
    pub fn npc(address: u64, species_id: u32, name: &str) -> Self {
        Self {
            address,
            prof: species_id & 0xFFFF,
            is_elite: NON_PLAYER_ELITE,
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Gadget entry with the given gadget id
    pub fn gadget(address: u64, gadget_id: u32, name: &str) -> Self {
        Self {
            address,
            prof: GADGET_PROF_MASK | (gadget_id & 0xFFFF),
            is_elite: NON_PLAYER_ELITE,
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Squad player entry
    pub fn player(
        address: u64,
        profession: u32,
        spec: u32,
        character: &str,
        account: &str,
        subgroup: u32,
    ) -> Self {
        Self {
            address,
            prof: profession,
            is_elite: spec,
            name: format!("{}\0:{}\0{}", character, account, subgroup),
            ..Self::default()
        }
    }

    /// Kind, display id and specialization encoded in `prof`/`is_elite`
    fn classify(&self) -> (AgentKind, u32, u32) {
        if self.is_elite == NON_PLAYER_ELITE {
            if self.prof & GADGET_PROF_MASK == GADGET_PROF_MASK {
                (AgentKind::Gadget, self.prof & 0xFFFF, 0)
            } else {
                (AgentKind::Npc, self.prof & 0xFFFF, 0)
            }
        } else {
            (AgentKind::Player, self.prof, self.is_elite)
        }
    }

    pub(crate) fn into_item(self, id: AgentId) -> AgentItem {
        let (mut kind, species_id, spec) = self.classify();
        let (name, account, subgroup) = if kind.is_player() {
            let (character, account, subgroup) = split_player_name(&self.name);
            if account.is_none() || subgroup.is_none() {
                kind = AgentKind::NonSquadPlayer;
            }
            (character, account, subgroup)
        } else {
            (display_name(&self.name), None, None)
        };
        AgentItem {
            id,
            address: self.address,
            inst_id: 0,
            species_id,
            spec,
            kind,
            name,
            account,
            subgroup,
            toughness: self.toughness,
            healing: self.healing,
            concentration: self.concentration,
            condition: self.condition,
            hitbox_width: self.hitbox_width,
            hitbox_height: self.hitbox_height,
            first_aware: 0,
            last_aware: Time::MAX,
            master: None,
            englobing: None,
            merges: SmallVec::new(),
        }
    }
}

fn display_name(raw: &str) -> String {
    raw.split('\0').next().unwrap_or_default().to_string()
}

/// Split `character\0account\0subgroup`
fn split_player_name(raw: &str) -> (String, Option<String>, Option<u32>) {
    let mut parts = raw.split('\0');
    let character = parts.next().unwrap_or_default().to_string();
    let account = parts
        .next()
        .map(|a| a.trim_start_matches(':'))
        .filter(|a| !a.is_empty())
        .map(str::to_string);
    let subgroup = parts.next().and_then(|s| s.trim().parse::<u32>().ok());
    (character, account, subgroup)
}

/// Aware window and instance id accumulated for one agent
#[derive(Default)]
struct Sighting {
    first: Option<Time>,
    last: Time,
    inst_id: u16,
}

impl Sighting {
    fn observe(&mut self, time: Time, inst_id: u16) {
        match self.first {
            None => {
                self.first = Some(time);
                self.last = time;
            }
            Some(first) => {
                self.first = Some(first.min(time));
                self.last = self.last.max(time);
            }
        }
        if self.inst_id == 0 {
            self.inst_id = inst_id;
        }
    }
}

impl AgentData {
    /// Run the prepass over the agent table and every record
    ///
    /// Agents never referenced by a record keep an unbounded window.
    pub fn build(raw: &[RawAgent], records: &[CombatItem]) -> AgentData {
        let mut slot_by_address: FxHashMap<u64, usize> = FxHashMap::default();
        for (slot, agent) in raw.iter().enumerate() {
            slot_by_address.entry(agent.address).or_insert(slot);
        }

        let mut sightings: Vec<Sighting> = Vec::new();
        sightings.resize_with(raw.len(), Sighting::default);
        for record in records {
            if record.src_is_agent() {
                if let Some(&slot) = slot_by_address.get(&record.src_agent) {
                    sightings[slot].observe(record.time, record.src_instid);
                }
            }
            if record.dst_is_agent() {
                if let Some(&slot) = slot_by_address.get(&record.dst_agent) {
                    sightings[slot].observe(record.time, record.dst_instid);
                }
            }
        }

        let items: Vec<AgentItem> = raw
            .iter()
            .cloned()
            .zip(sightings)
            .enumerate()
            .map(|(slot, (agent, sighting))| {
                let mut item = agent.into_item(AgentId::from_index(slot as u32 + 1));
                if let Some(first) = sighting.first {
                    item.first_aware = first;
                    item.last_aware = sighting.last;
                }
                item.inst_id = sighting.inst_id;
                item
            })
            .collect();
        let mut data = AgentData::from_items(items);

        let masters = collect_masters(&data, records);
        let assigned = masters.len();
        for (minion, master) in masters {
            if let Some(item) = data.item_mut(minion) {
                item.master = Some(master);
            }
        }

        debug!(
            target: "evtc::agents",
            agents = data.len(),
            masters = assigned,
            "Agent prepass complete"
        );
        data
    }
}

/// First master seen for every minion, from `src_master_instid`
fn collect_masters(data: &AgentData, records: &[CombatItem]) -> FxHashMap<AgentId, AgentId> {
    let mut masters: FxHashMap<AgentId, AgentId> = FxHashMap::default();
    for record in records {
        if record.src_master_instid == 0 || !record.src_is_agent() {
            continue;
        }
        let minion = data.resolve_raw(record.src_agent, record.time);
        if minion.is_unknown() || masters.contains_key(&minion) {
            continue;
        }
        let master = data.resolve_by_inst_id_raw(record.src_master_instid, record.time);
        if master.is_unknown() || master.is(minion) {
            continue;
        }
        masters.insert(minion, master);
    }
    masters
}
