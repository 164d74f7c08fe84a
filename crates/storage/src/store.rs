//! Identity-aware store over every event category
//!
//! Events are stored under the agent their records resolve to. Englobed
//! agents own no collection of their own: their lookups read the parent's
//! collection narrowed to their aware window, and the parent's lookups are
//! never widened with anything else.

use crate::run::EventRun;
use crate::table::EventTable;
use evtc_agents::AgentData;
use evtc_core::events::{
    BuffEvent, CastEvent, DamageEvent, EffectEvent, MarkerEvent, MissileEvent, SquadMarkerEvent,
    StatusEvent, StatusTag,
};
use evtc_core::{AgentId, IndexedEvent, Time};
use evtc_reconstruct::EventSet;
use rustc_hash::FxHashMap;
use tracing::info;

/// Parent collection and aware window of an englobed agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Narrowing {
    parent: AgentId,
    start: Time,
    end: Time,
}

/// Read-only, time-indexed collections of one log's events
#[derive(Debug, Default)]
pub struct EventStore {
    status: EventTable<StatusEvent>,
    buffs: EventTable<BuffEvent>,
    damage: EventTable<DamageEvent>,
    casts: EventTable<CastEvent>,
    markers: EventTable<MarkerEvent>,
    squad_markers: EventTable<SquadMarkerEvent>,
    missiles: EventTable<MissileEvent>,
    effects: EventTable<EffectEvent>,
    narrowing: FxHashMap<AgentId, Narrowing>,
}

fn join<A, B>(
    parallel: bool,
    a: impl FnOnce() -> A + Send,
    b: impl FnOnce() -> B + Send,
) -> (A, B)
where
    A: Send,
    B: Send,
{
    if parallel {
        rayon::join(a, b)
    } else {
        (a(), b())
    }
}

impl EventStore {
    /// Sort and index every category of `events`
    ///
    /// `info` and `metadata` are not part of the store; take them out of
    /// the set first when they are needed.
    pub fn build(events: EventSet, agents: &AgentData, parallel: bool) -> EventStore {
        let EventSet {
            status,
            buffs,
            damage,
            casts,
            markers,
            squad_markers,
            missiles,
            effects,
            ..
        } = events;

        let (((status, buffs), (damage, casts)), ((markers, squad_markers), (missiles, effects))) =
            join(
                parallel,
                || {
                    join(
                        parallel,
                        || {
                            join(
                                parallel,
                                || EventTable::build(status),
                                || EventTable::build(buffs),
                            )
                        },
                        || {
                            join(
                                parallel,
                                || EventTable::build(damage),
                                || EventTable::build(casts),
                            )
                        },
                    )
                },
                || {
                    join(
                        parallel,
                        || {
                            join(
                                parallel,
                                || EventTable::build(markers),
                                || EventTable::build(squad_markers),
                            )
                        },
                        || {
                            join(
                                parallel,
                                || EventTable::build(missiles),
                                || EventTable::build(effects),
                            )
                        },
                    )
                },
            );

        let narrowing = agents
            .iter()
            .filter_map(|agent| match agents.storage_owner(agent.id()) {
                (parent, Some((start, end))) => Some((agent.id(), Narrowing { parent, start, end })),
                _ => None,
            })
            .collect();

        let store = EventStore {
            status,
            buffs,
            damage,
            casts,
            markers,
            squad_markers,
            missiles,
            effects,
            narrowing,
        };
        info!(
            target: "evtc::store",
            status = store.status.len(),
            buffs = store.buffs.len(),
            damage = store.damage.len(),
            casts = store.casts.len(),
            effects = store.effects.len(),
            englobed = store.narrowing.len(),
            "Event store built"
        );
        store
    }

    /// Resolve `agent` to the collection its events live in, then narrow
    fn scoped<'a, E: IndexedEvent>(
        &self,
        agent: AgentId,
        lookup: impl FnOnce(AgentId) -> EventRun<'a, E>,
    ) -> EventRun<'a, E> {
        if agent.is_unknown() {
            return EventRun::empty();
        }
        match self.narrowing.get(&agent) {
            Some(n) => lookup(n.parent).between(n.start, n.end),
            None => lookup(agent),
        }
    }

    // Whole tables

    pub fn status(&self) -> &EventTable<StatusEvent> {
        &self.status
    }

    pub fn buffs(&self) -> &EventTable<BuffEvent> {
        &self.buffs
    }

    pub fn damage(&self) -> &EventTable<DamageEvent> {
        &self.damage
    }

    pub fn casts(&self) -> &EventTable<CastEvent> {
        &self.casts
    }

    pub fn markers(&self) -> &EventTable<MarkerEvent> {
        &self.markers
    }

    pub fn squad_markers(&self) -> &EventTable<SquadMarkerEvent> {
        &self.squad_markers
    }

    pub fn missiles(&self) -> &EventTable<MissileEvent> {
        &self.missiles
    }

    pub fn effects(&self) -> &EventTable<EffectEvent> {
        &self.effects
    }

    // Status

    pub fn status_of(&self, agent: AgentId) -> EventRun<'_, StatusEvent> {
        self.scoped(agent, |a| self.status.by_owner(a))
    }

    /// Status events of one kind for `agent`
    pub fn status_of_kind(&self, agent: AgentId, tag: StatusTag) -> EventRun<'_, StatusEvent> {
        self.scoped(agent, |a| self.status.by_key_owner(tag.key(), a))
    }

    // Buffs

    /// Buff events landing on `agent`
    pub fn buffs_on(&self, agent: AgentId) -> EventRun<'_, BuffEvent> {
        self.scoped(agent, |a| self.buffs.by_target(a))
    }

    /// Buff events sourced by `agent`
    pub fn buffs_by(&self, agent: AgentId) -> EventRun<'_, BuffEvent> {
        self.scoped(agent, |a| self.buffs.by_owner(a))
    }

    pub fn buffs_with_id(&self, buff_id: u32) -> EventRun<'_, BuffEvent> {
        self.buffs.by_key(buff_id)
    }

    pub fn buffs_on_with_id(&self, agent: AgentId, buff_id: u32) -> EventRun<'_, BuffEvent> {
        self.scoped(agent, |a| self.buffs.by_key_target(buff_id, a))
    }

    pub fn buffs_by_with_id(&self, agent: AgentId, buff_id: u32) -> EventRun<'_, BuffEvent> {
        self.scoped(agent, |a| self.buffs.by_key_owner(buff_id, a))
    }

    // Damage

    pub fn damage_by(&self, agent: AgentId) -> EventRun<'_, DamageEvent> {
        self.scoped(agent, |a| self.damage.by_owner(a))
    }

    pub fn damage_taken(&self, agent: AgentId) -> EventRun<'_, DamageEvent> {
        self.scoped(agent, |a| self.damage.by_target(a))
    }

    pub fn damage_with_skill(&self, skill_id: u32) -> EventRun<'_, DamageEvent> {
        self.damage.by_key(skill_id)
    }

    pub fn damage_by_with_skill(&self, agent: AgentId, skill_id: u32) -> EventRun<'_, DamageEvent> {
        self.scoped(agent, |a| self.damage.by_key_owner(skill_id, a))
    }

    pub fn damage_taken_with_skill(
        &self,
        agent: AgentId,
        skill_id: u32,
    ) -> EventRun<'_, DamageEvent> {
        self.scoped(agent, |a| self.damage.by_key_target(skill_id, a))
    }

    // Casts

    pub fn casts_of(&self, agent: AgentId) -> EventRun<'_, CastEvent> {
        self.scoped(agent, |a| self.casts.by_owner(a))
    }

    pub fn casts_of_skill(&self, agent: AgentId, skill_id: u32) -> EventRun<'_, CastEvent> {
        self.scoped(agent, |a| self.casts.by_key_owner(skill_id, a))
    }

    pub fn casts_with_skill(&self, skill_id: u32) -> EventRun<'_, CastEvent> {
        self.casts.by_key(skill_id)
    }

    // Markers

    pub fn markers_of(&self, agent: AgentId) -> EventRun<'_, MarkerEvent> {
        self.scoped(agent, |a| self.markers.by_owner(a))
    }

    pub fn markers_with_id(&self, marker_id: u32) -> EventRun<'_, MarkerEvent> {
        self.markers.by_key(marker_id)
    }

    pub fn markers_of_with_id(&self, agent: AgentId, marker_id: u32) -> EventRun<'_, MarkerEvent> {
        self.scoped(agent, |a| self.markers.by_key_owner(marker_id, a))
    }

    /// Squad ground markers placed in slot `index`
    pub fn squad_markers_in_slot(&self, index: u32) -> EventRun<'_, SquadMarkerEvent> {
        self.squad_markers.by_key(index)
    }

    // Missiles

    pub fn missiles_by(&self, agent: AgentId) -> EventRun<'_, MissileEvent> {
        self.scoped(agent, |a| self.missiles.by_owner(a))
    }

    /// Missiles that hit `agent`
    pub fn missiles_hitting(&self, agent: AgentId) -> EventRun<'_, MissileEvent> {
        self.scoped(agent, |a| self.missiles.by_target(a))
    }

    pub fn missiles_with_skill(&self, skill_id: u32) -> EventRun<'_, MissileEvent> {
        self.missiles.by_key(skill_id)
    }

    // Effects

    pub fn effects_by(&self, agent: AgentId) -> EventRun<'_, EffectEvent> {
        self.scoped(agent, |a| self.effects.by_owner(a))
    }

    /// Effects attached to `agent`
    pub fn effects_on(&self, agent: AgentId) -> EventRun<'_, EffectEvent> {
        self.scoped(agent, |a| self.effects.by_target(a))
    }

    pub fn effects_with_id(&self, effect_id: u32) -> EventRun<'_, EffectEvent> {
        self.effects.by_key(effect_id)
    }

    pub fn effects_by_with_id(&self, agent: AgentId, effect_id: u32) -> EventRun<'_, EffectEvent> {
        self.scoped(agent, |a| self.effects.by_key_owner(effect_id, a))
    }

    pub fn effects_on_with_id(&self, agent: AgentId, effect_id: u32) -> EventRun<'_, EffectEvent> {
        self.scoped(agent, |a| self.effects.by_key_target(effect_id, a))
    }
}
