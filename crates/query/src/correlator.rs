//! Named correlation helpers over a frozen log

use crate::grouping::epsilon_windows;
use crate::related::find_related;
use evtc_agents::AgentData;
use evtc_content::ContentTable;
use evtc_core::events::{BuffEvent, EffectEvent};
use evtc_core::{AgentId, ContentCategory, ContentGuid, Time, SERVER_DELAY_CONSTANT};
use evtc_storage::{EventRun, EventStore};
use tracing::trace;

/// Read-only correlation view over one log
///
/// Cheap to copy; every helper uses the correlator's epsilon.
#[derive(Debug, Clone, Copy)]
pub struct Correlator<'a> {
    store: &'a EventStore,
    agents: &'a AgentData,
    content: &'a ContentTable,
    epsilon: Time,
}

impl<'a> Correlator<'a> {
    pub fn new(store: &'a EventStore, agents: &'a AgentData, content: &'a ContentTable) -> Self {
        Self {
            store,
            agents,
            content,
            epsilon: SERVER_DELAY_CONSTANT,
        }
    }

    /// Same view with another epsilon
    pub fn with_epsilon(self, epsilon: Time) -> Self {
        Self { epsilon, ..self }
    }

    pub fn epsilon(&self) -> Time {
        self.epsilon
    }

    fn within(&self, a: Time, b: Time) -> bool {
        (a - b).abs() < self.epsilon
    }

    fn effect_id(&self, guid: ContentGuid) -> Option<u32> {
        let id = self.content.resolve_by_guid(ContentCategory::Effect, guid);
        if id.is_none() {
            trace!(target: "evtc::query", %guid, "Effect GUID not present in log");
        }
        id
    }

    fn buffs_near(&self, buff_id: u32, agent: AgentId, time: Time) -> EventRun<'a, BuffEvent> {
        find_related(self.store.buffs_on_with_id(agent, buff_id), time, self.epsilon)
    }

    // Buff gains

    /// `agent` received an application of `buff_id` around `time`
    pub fn has_gained_buff(&self, buff_id: u32, agent: AgentId, time: Time) -> bool {
        self.buffs_near(buff_id, agent, time)
            .iter()
            .any(|e| e.is_apply())
    }

    /// As [`Self::has_gained_buff`], applied by `source`
    pub fn has_gained_buff_from(
        &self,
        buff_id: u32,
        agent: AgentId,
        time: Time,
        source: AgentId,
    ) -> bool {
        self.buffs_near(buff_id, agent, time)
            .iter()
            .any(|e| e.is_apply() && e.src.is(source))
    }

    /// As [`Self::has_gained_buff`], with an applied duration within epsilon
    /// of `applied_duration`
    pub fn has_gained_buff_with_duration(
        &self,
        buff_id: u32,
        agent: AgentId,
        time: Time,
        applied_duration: Time,
    ) -> bool {
        self.buffs_near(buff_id, agent, time).iter().any(|e| {
            e.is_apply()
                && e.applied_duration()
                    .map_or(false, |d| self.within(d as Time, applied_duration))
        })
    }

    pub fn has_gained_buff_from_with_duration(
        &self,
        buff_id: u32,
        agent: AgentId,
        time: Time,
        applied_duration: Time,
        source: AgentId,
    ) -> bool {
        self.buffs_near(buff_id, agent, time).iter().any(|e| {
            e.is_apply()
                && e.src.is(source)
                && e.applied_duration()
                    .map_or(false, |d| self.within(d as Time, applied_duration))
        })
    }

    // Buff losses

    /// Every stack of `buff_id` was removed from `agent` around `time`
    pub fn has_lost_buff(&self, buff_id: u32, agent: AgentId, time: Time) -> bool {
        self.buffs_near(buff_id, agent, time)
            .iter()
            .any(|e| e.is_remove_all())
    }

    /// At least one stack of `buff_id` was removed from `agent` around `time`
    pub fn has_lost_buff_stack(&self, buff_id: u32, agent: AgentId, time: Time) -> bool {
        self.buffs_near(buff_id, agent, time)
            .iter()
            .any(|e| e.is_remove())
    }

    // Buff extensions

    pub fn has_extended_buff(&self, buff_id: u32, agent: AgentId, time: Time) -> bool {
        self.buffs_near(buff_id, agent, time)
            .iter()
            .any(|e| e.is_extension())
    }

    pub fn has_extended_buff_from(
        &self,
        buff_id: u32,
        agent: AgentId,
        time: Time,
        source: AgentId,
    ) -> bool {
        self.buffs_near(buff_id, agent, time)
            .iter()
            .any(|e| e.is_extension() && e.src.is(source))
    }

    pub fn has_extended_buff_with_duration(
        &self,
        buff_id: u32,
        agent: AgentId,
        time: Time,
        extended_duration: Time,
    ) -> bool {
        self.buffs_near(buff_id, agent, time).iter().any(|e| {
            e.extended_duration()
                .map_or(false, |d| self.within(d as Time, extended_duration))
        })
    }

    pub fn has_extended_buff_from_with_duration(
        &self,
        buff_id: u32,
        agent: AgentId,
        time: Time,
        extended_duration: Time,
        source: AgentId,
    ) -> bool {
        self.buffs_near(buff_id, agent, time).iter().any(|e| {
            e.src.is(source)
                && e.extended_duration()
                    .map_or(false, |d| self.within(d as Time, extended_duration))
        })
    }

    // Damage and casts

    /// A hit of `skill_id` credited to `agent` (directly or through a
    /// minion) landed around `time`
    pub fn has_related_hit(&self, skill_id: u32, agent: AgentId, time: Time) -> bool {
        find_related(self.store.damage_with_skill(skill_id), time, self.epsilon)
            .iter()
            .any(|e| self.agents.final_master(e.src).is(agent))
    }

    /// `agent` is casting `skill_id` at `time`, give or take epsilon
    ///
    /// Casts of one owner never overlap, so only the latest cast started
    /// by `time + epsilon` can still be running.
    pub fn is_casting(&self, skill_id: u32, agent: AgentId, time: Time) -> bool {
        self.store
            .casts_of_skill(agent, skill_id)
            .last_at_or_before(time.saturating_add(self.epsilon))
            .map_or(false, |c| c.end_time.saturating_add(self.epsilon) >= time)
    }

    /// A cast of `skill_id` by `agent` started around and no later than
    /// `time`
    pub fn has_previous_cast(&self, skill_id: u32, agent: AgentId, time: Time) -> bool {
        find_related(self.store.casts_of_skill(agent, skill_id), time, self.epsilon)
            .iter()
            .any(|c| c.time <= time)
    }

    // Effects

    /// An effect with `guid` was created by `agent` around `time`
    pub fn has_related_effect(&self, guid: ContentGuid, agent: AgentId, time: Time) -> bool {
        self.effect_id(guid).map_or(false, |id| {
            !find_related(self.store.effects_by_with_id(agent, id), time, self.epsilon).is_empty()
        })
    }

    /// An effect with `guid` was attached to `agent` around `time`
    pub fn has_related_effect_dst(&self, guid: ContentGuid, agent: AgentId, time: Time) -> bool {
        self.effect_id(guid).map_or(false, |id| {
            !find_related(self.store.effects_on_with_id(agent, id), time, self.epsilon).is_empty()
        })
    }

    /// Effects with `guid` created by `agent` or any of its minions, in
    /// time order
    pub fn effects_by_master_with_guid(
        &self,
        agent: AgentId,
        guid: ContentGuid,
    ) -> Vec<&'a EffectEvent> {
        let Some(id) = self.effect_id(guid) else {
            return Vec::new();
        };
        let mut effects: Vec<&'a EffectEvent> = self.store.effects_by_with_id(agent, id).to_vec();
        for minion in self.agents.minions_of(agent) {
            effects.extend(self.store.effects_by_with_id(minion, id).iter());
        }
        effects.sort_by_key(|e| e.time);
        effects
    }

    /// Effects with `guid`, split into epsilon windows
    pub fn grouped_effects_by_guid(&self, guid: ContentGuid) -> Vec<Vec<&'a EffectEvent>> {
        match self.effect_id(guid) {
            Some(id) => epsilon_windows(self.store.effects_with_id(id), self.epsilon),
            None => Vec::new(),
        }
    }

    /// Effects with `guid` created by `agent`, split into epsilon windows
    pub fn grouped_effects_by_src_with_guid(
        &self,
        agent: AgentId,
        guid: ContentGuid,
    ) -> Vec<Vec<&'a EffectEvent>> {
        match self.effect_id(guid) {
            Some(id) => epsilon_windows(self.store.effects_by_with_id(agent, id), self.epsilon),
            None => Vec::new(),
        }
    }
}
