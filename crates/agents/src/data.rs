//! Frozen agent arena and time-scoped lookups

use crate::item::{AgentItem, AgentKind};
use crate::overrides::AgentOverrides;
use evtc_core::{AgentId, Time};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Read-only agent arena with address and instance id indices
///
/// Slot `i` of the arena holds the agent with id `AgentId::from_index(i + 1)`;
/// id 0 is the unknown sentinel and never has an item. Englobed agents live
/// in the arena but not in the address/instance indices: raw references
/// always resolve to the englobing parent.
#[derive(Debug, Clone, Default)]
pub struct AgentData {
    agents: Vec<AgentItem>,
    by_address: FxHashMap<u64, SmallVec<[AgentId; 2]>>,
    by_inst_id: FxHashMap<u16, SmallVec<[AgentId; 4]>>,
    englobed: FxHashMap<AgentId, SmallVec<[AgentId; 2]>>,
}

impl AgentData {
    pub(crate) fn from_items(agents: Vec<AgentItem>) -> Self {
        let mut data = AgentData {
            agents,
            ..AgentData::default()
        };
        data.reindex();
        data
    }

    pub(crate) fn reindex(&mut self) {
        self.by_address.clear();
        self.by_inst_id.clear();
        self.englobed.clear();
        for item in &self.agents {
            if let Some(parent) = item.englobing {
                self.englobed.entry(parent).or_default().push(item.id);
                continue;
            }
            self.by_address.entry(item.address).or_default().push(item.id);
            if item.inst_id != 0 {
                self.by_inst_id.entry(item.inst_id).or_default().push(item.id);
            }
        }
    }

    pub(crate) fn next_id(&self) -> AgentId {
        AgentId::from_index(self.agents.len() as u32 + 1)
    }

    pub(crate) fn push(&mut self, item: AgentItem) {
        self.agents.push(item);
    }

    pub(crate) fn item_mut(&mut self, id: AgentId) -> Option<&mut AgentItem> {
        if id.is_unknown() {
            return None;
        }
        self.agents.get_mut(id.index() - 1)
    }

    /// Open the override phase
    pub fn into_overrides(self) -> AgentOverrides {
        AgentOverrides::new(self)
    }

    /// Agent by id; `None` for the unknown sentinel and foreign ids
    pub fn get(&self, id: AgentId) -> Option<&AgentItem> {
        if id.is_unknown() {
            return None;
        }
        self.agents.get(id.index() - 1)
    }

    /// True when `id` names an agent of this arena
    pub fn contains(&self, id: AgentId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentItem> {
        self.agents.iter()
    }

    /// Agents of one kind, in arena order
    pub fn by_kind(&self, kind: AgentKind) -> impl Iterator<Item = &AgentItem> {
        self.agents.iter().filter(move |a| a.kind == kind)
    }

    /// Agents with the given display species id
    pub fn by_species(&self, species_id: u32) -> impl Iterator<Item = &AgentItem> {
        self.agents
            .iter()
            .filter(move |a| !a.kind.is_player() && a.species_id == species_id)
    }

    /// Squad players
    pub fn players(&self) -> impl Iterator<Item = &AgentItem> {
        self.by_kind(AgentKind::Player)
    }

    fn pick_live<'a>(&self, candidates: impl Iterator<Item = &'a AgentId>, time: Time) -> AgentId {
        candidates
            .filter_map(|id| self.get(*id))
            .filter(|a| a.is_aware_at(time))
            .max_by_key(|a| a.first_aware)
            .map_or(AgentId::UNKNOWN, |a| a.id)
    }

    /// Live agent with this address at `time`, without merge redirection
    ///
    /// Ties go to the most recently spawned agent.
    pub fn resolve_raw(&self, address: u64, time: Time) -> AgentId {
        self.pick_live(self.by_address.get(&address).into_iter().flatten(), time)
    }

    /// Logical agent behind `address` at `time`
    pub fn resolve(&self, address: u64, time: Time) -> AgentId {
        self.englobing_owner(self.resolve_raw(address, time), time)
    }

    /// Live agent with this instance id at `time`, without merge redirection
    pub fn resolve_by_inst_id_raw(&self, inst_id: u16, time: Time) -> AgentId {
        if inst_id == 0 {
            return AgentId::UNKNOWN;
        }
        self.pick_live(self.by_inst_id.get(&inst_id).into_iter().flatten(), time)
    }

    /// Logical agent behind instance id `inst_id` at `time`
    pub fn resolve_by_inst_id(&self, inst_id: u16, time: Time) -> AgentId {
        self.englobing_owner(self.resolve_by_inst_id_raw(inst_id, time), time)
    }

    /// The agent `agent`'s events belong to at `time`
    ///
    /// Follows merge records transitively; a merge cycle stops after one
    /// pass over the arena.
    pub fn englobing_owner(&self, agent: AgentId, time: Time) -> AgentId {
        let mut current = agent;
        let mut hops = 0;
        while let Some(item) = self.get(current) {
            if hops >= self.agents.len() {
                break;
            }
            match item.merges.iter().find(|m| m.covers(time)) {
                Some(merge) => {
                    current = merge.merged_into;
                    hops += 1;
                }
                None => break,
            }
        }
        current
    }

    /// True when `master` appears anywhere in `minion`'s master chain
    pub fn is_master_of(&self, master: AgentId, minion: AgentId) -> bool {
        if master.is_unknown() {
            return false;
        }
        let mut current = self.get(minion).and_then(|a| a.master);
        let mut hops = 0;
        while let Some(id) = current {
            if id.is(master) {
                return true;
            }
            hops += 1;
            if hops > self.agents.len() {
                break;
            }
            current = self.get(id).and_then(|a| a.master);
        }
        false
    }

    /// Top of `agent`'s master chain, the agent itself when it has no master
    pub fn final_master(&self, agent: AgentId) -> AgentId {
        let mut current = agent;
        let mut hops = 0;
        while let Some(master) = self.get(current).and_then(|a| a.master) {
            if hops >= self.agents.len() {
                break;
            }
            current = master;
            hops += 1;
        }
        current
    }

    /// Agents whose master chain contains `master`
    pub fn minions_of(&self, master: AgentId) -> Vec<AgentId> {
        self.agents
            .iter()
            .filter(|a| self.is_master_of(master, a.id))
            .map(|a| a.id)
            .collect()
    }

    /// Sub-identities carved out of `parent`
    pub fn englobed_children(&self, parent: AgentId) -> &[AgentId] {
        self.englobed.get(&parent).map_or(&[], |c| c.as_slice())
    }

    /// Agent whose collections hold `agent`'s events, and the window to
    /// narrow them to
    ///
    /// Englobed agents map to their parent and their own aware window; any
    /// other agent maps to itself with no narrowing.
    pub fn storage_owner(&self, agent: AgentId) -> (AgentId, Option<(Time, Time)>) {
        match self.get(agent) {
            Some(item) => match item.englobing {
                Some(parent) => (parent, Some((item.first_aware, item.last_aware))),
                None => (agent, None),
            },
            None => (agent, None),
        }
    }
}
