//! A single logical agent

use evtc_core::{AgentId, Time};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What kind of actor an agent is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    /// Member of the recording squad
    Player,
    /// Player outside the squad
    NonSquadPlayer,
    Npc,
    Gadget,
}

impl AgentKind {
    /// Players, in the squad or not
    pub fn is_player(self) -> bool {
        matches!(self, AgentKind::Player | AgentKind::NonSquadPlayer)
    }
}

/// Redirection of an agent's events to another agent over a time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRecord {
    pub merged_into: AgentId,
    pub start: Time,
    pub end: Time,
}

impl MergeRecord {
    /// True when `time` is inside `[start, end]`
    pub fn covers(&self, time: Time) -> bool {
        self.start <= time && time <= self.end
    }
}

/// One logical actor of the log
///
/// Addresses and instance ids are only unique inside the aware window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentItem {
    pub(crate) id: AgentId,
    pub(crate) address: u64,
    pub(crate) inst_id: u16,
    /// Species id for NPCs and gadgets, profession for players
    pub(crate) species_id: u32,
    /// Elite specialization for players
    pub(crate) spec: u32,
    pub(crate) kind: AgentKind,
    pub(crate) name: String,
    pub(crate) account: Option<String>,
    pub(crate) subgroup: Option<u32>,
    pub(crate) toughness: u16,
    pub(crate) healing: u16,
    pub(crate) concentration: u16,
    pub(crate) condition: u16,
    pub(crate) hitbox_width: u16,
    pub(crate) hitbox_height: u16,
    pub(crate) first_aware: Time,
    pub(crate) last_aware: Time,
    pub(crate) master: Option<AgentId>,
    pub(crate) englobing: Option<AgentId>,
    pub(crate) merges: SmallVec<[MergeRecord; 1]>,
}

impl AgentItem {
    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn address(&self) -> u64 {
        self.address
    }

    pub fn inst_id(&self) -> u16 {
        self.inst_id
    }

    /// Display species (or profession) id; not unique across agents
    pub fn species_id(&self) -> u32 {
        self.species_id
    }

    pub fn spec(&self) -> u32 {
        self.spec
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn subgroup(&self) -> Option<u32> {
        self.subgroup
    }

    pub fn toughness(&self) -> u16 {
        self.toughness
    }

    pub fn healing(&self) -> u16 {
        self.healing
    }

    pub fn concentration(&self) -> u16 {
        self.concentration
    }

    pub fn condition(&self) -> u16 {
        self.condition
    }

    /// Hitbox `(width, height)`
    pub fn hitbox(&self) -> (u16, u16) {
        (self.hitbox_width, self.hitbox_height)
    }

    pub fn first_aware(&self) -> Time {
        self.first_aware
    }

    pub fn last_aware(&self) -> Time {
        self.last_aware
    }

    /// True when `time` is inside `[first_aware, last_aware]`
    pub fn is_aware_at(&self, time: Time) -> bool {
        self.first_aware <= time && time <= self.last_aware
    }

    /// Direct master, for minions
    pub fn master(&self) -> Option<AgentId> {
        self.master
    }

    /// Parent this agent is a sub-identity of
    pub fn englobing(&self) -> Option<AgentId> {
        self.englobing
    }

    pub fn is_englobed(&self) -> bool {
        self.englobing.is_some()
    }

    pub fn merges(&self) -> &[MergeRecord] {
        &self.merges
    }

    pub fn is_player(&self) -> bool {
        self.kind.is_player()
    }

    pub fn is_npc(&self) -> bool {
        self.kind == AgentKind::Npc
    }

    pub fn is_gadget(&self) -> bool {
        self.kind == AgentKind::Gadget
    }
}
