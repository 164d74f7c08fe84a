//! One event category, sorted by time and indexed by position

use crate::run::EventRun;
use evtc_core::{AgentId, IndexedEvent};
use rustc_hash::FxHashMap;

type Positions = Vec<u32>;

/// Time-sorted events of one category with secondary position indices
///
/// Events are stable-sorted by time so records sharing a timestamp keep
/// their reconstruction order. Every index stores ascending positions into
/// the sorted vector, so each index entry is itself time-ordered.
/// Events owned by (or landing on) `AgentId::UNKNOWN` are only reachable
/// through [`EventTable::all`] and [`EventTable::by_key`].
#[derive(Debug, Clone)]
pub struct EventTable<E> {
    events: Vec<E>,
    by_owner: FxHashMap<AgentId, Positions>,
    by_target: FxHashMap<AgentId, Positions>,
    by_key: FxHashMap<u32, Positions>,
    by_key_owner: FxHashMap<(u32, AgentId), Positions>,
    by_key_target: FxHashMap<(u32, AgentId), Positions>,
}

impl<E> Default for EventTable<E> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            by_owner: FxHashMap::default(),
            by_target: FxHashMap::default(),
            by_key: FxHashMap::default(),
            by_key_owner: FxHashMap::default(),
            by_key_target: FxHashMap::default(),
        }
    }
}

impl<E: IndexedEvent> EventTable<E> {
    /// Sort and index `events`
    pub fn build(mut events: Vec<E>) -> Self {
        events.sort_by_key(|e| e.time());
        let mut table = EventTable::default();
        for (pos, event) in events.iter().enumerate() {
            let pos = pos as u32;
            let owner = event.owner();
            let target = event.target().filter(|t| !t.is_unknown());
            let key = event.key();
            if !owner.is_unknown() {
                table.by_owner.entry(owner).or_default().push(pos);
            }
            if let Some(target) = target {
                table.by_target.entry(target).or_default().push(pos);
            }
            if let Some(key) = key {
                table.by_key.entry(key).or_default().push(pos);
                if !owner.is_unknown() {
                    table.by_key_owner.entry((key, owner)).or_default().push(pos);
                }
                if let Some(target) = target {
                    table.by_key_target.entry((key, target)).or_default().push(pos);
                }
            }
        }
        table.events = events;
        table
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Every event in time order
    pub fn all(&self) -> EventRun<'_, E> {
        EventRun::contiguous(&self.events)
    }

    pub fn as_slice(&self) -> &[E] {
        &self.events
    }

    fn run<'a, K: std::hash::Hash + Eq>(
        &'a self,
        index: &'a FxHashMap<K, Positions>,
        key: &K,
    ) -> EventRun<'a, E> {
        match index.get(key) {
            Some(positions) => EventRun::indexed(&self.events, positions),
            None => EventRun::empty(),
        }
    }

    /// Events owned by `agent`, without identity narrowing
    pub fn by_owner(&self, agent: AgentId) -> EventRun<'_, E> {
        self.run(&self.by_owner, &agent)
    }

    /// Events landing on `agent`, without identity narrowing
    pub fn by_target(&self, agent: AgentId) -> EventRun<'_, E> {
        self.run(&self.by_target, &agent)
    }

    pub fn by_key(&self, key: u32) -> EventRun<'_, E> {
        self.run(&self.by_key, &key)
    }

    pub fn by_key_owner(&self, key: u32, agent: AgentId) -> EventRun<'_, E> {
        self.run(&self.by_key_owner, &(key, agent))
    }

    pub fn by_key_target(&self, key: u32, agent: AgentId) -> EventRun<'_, E> {
        self.run(&self.by_key_target, &(key, agent))
    }

    /// Distinct keys present in the table
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_key.keys().copied()
    }
}
