//! Post-processing override phase
//!
//! [`AgentOverrides`] is the only mutable view of the agent arena. Every
//! operation validates its inputs, touches only the agent records, is
//! idempotent, and leaves the lookup indices consistent so post-processors
//! can keep resolving while they rewrite identities.

use crate::builder::RawAgent;
use crate::data::AgentData;
use crate::item::{AgentItem, AgentKind, MergeRecord};
use evtc_core::{AgentId, Error, Result, Time};
use smallvec::SmallVec;
use tracing::debug;

/// Mutable agent arena, frozen back into [`AgentData`] when done
#[derive(Debug)]
pub struct AgentOverrides {
    data: AgentData,
}

impl AgentOverrides {
    pub(crate) fn new(data: AgentData) -> Self {
        Self { data }
    }

    /// Current state of the arena
    pub fn agents(&self) -> &AgentData {
        &self.data
    }

    /// End the phase
    pub fn freeze(mut self) -> AgentData {
        self.data.reindex();
        self.data
    }

    fn item_mut(&mut self, id: AgentId) -> Result<&mut AgentItem> {
        self.data.item_mut(id).ok_or(Error::UnknownAgent(id))
    }

    fn require(&self, id: AgentId) -> Result<&AgentItem> {
        self.data.get(id).ok_or(Error::UnknownAgent(id))
    }

    /// Replace the display species id
    pub fn override_id(&mut self, agent: AgentId, species_id: u32) -> Result<()> {
        self.item_mut(agent)?.species_id = species_id;
        Ok(())
    }

    /// Replace the agent kind
    pub fn override_type(&mut self, agent: AgentId, kind: AgentKind) -> Result<()> {
        self.item_mut(agent)?.kind = kind;
        Ok(())
    }

    /// Replace the display name
    pub fn override_name(&mut self, agent: AgentId, name: impl Into<String>) -> Result<()> {
        self.item_mut(agent)?.name = name.into();
        Ok(())
    }

    /// Replace the aware window
    ///
    /// # Errors
    ///
    /// `InvalidOperation` when `first_aware > last_aware`.
    pub fn override_aware_times(
        &mut self,
        agent: AgentId,
        first_aware: Time,
        last_aware: Time,
    ) -> Result<()> {
        if first_aware > last_aware {
            return Err(Error::invalid_operation(format!(
                "aware window of {} is inverted: {} > {}",
                agent, first_aware, last_aware
            )));
        }
        let item = self.item_mut(agent)?;
        item.first_aware = first_aware;
        item.last_aware = last_aware;
        Ok(())
    }

    /// Attribute `agent`'s events to `merged_into` over `[start, end]`
    ///
    /// # Errors
    ///
    /// `InvalidOperation` for a self merge, a merge into the unknown sentinel,
    /// an inverted window, or an englobed agent on either side.
    pub fn add_merge(
        &mut self,
        agent: AgentId,
        merged_into: AgentId,
        start: Time,
        end: Time,
    ) -> Result<()> {
        if merged_into.is_unknown() {
            return Err(Error::invalid_operation(format!(
                "cannot merge {} into the unknown agent",
                agent
            )));
        }
        if agent == merged_into {
            return Err(Error::invalid_operation(format!(
                "cannot merge {} into itself",
                agent
            )));
        }
        if start > end {
            return Err(Error::invalid_operation(format!(
                "merge window of {} is inverted: {} > {}",
                agent, start, end
            )));
        }
        for id in [agent, merged_into] {
            if self.require(id)?.is_englobed() {
                return Err(Error::invalid_operation(format!(
                    "{} is an englobed agent; merge through its parent",
                    id
                )));
            }
        }
        let record = MergeRecord {
            merged_into,
            start,
            end,
        };
        let item = self.item_mut(agent)?;
        if !item.merges.contains(&record) {
            item.merges.push(record);
            debug!(target: "evtc::agents", %agent, %merged_into, start, end, "Merge added");
        }
        Ok(())
    }

    /// Make `master` the direct master of `minion`
    ///
    /// # Errors
    ///
    /// `InvalidOperation` when the assignment would create a master cycle.
    pub fn set_master(&mut self, minion: AgentId, master: AgentId) -> Result<()> {
        self.require(master)?;
        self.require(minion)?;
        if minion == master || self.data.is_master_of(minion, master) {
            return Err(Error::invalid_operation(format!(
                "{} cannot become the master of {}: cycle",
                master, minion
            )));
        }
        self.item_mut(minion)?.master = Some(master);
        Ok(())
    }

    /// Carve a sub-identity with window `[first_aware, last_aware]` out of
    /// `parent`
    ///
    /// The new agent copies the parent's description; its events stay in
    /// the parent's collections. Adding the same window twice returns the
    /// existing sub-identity.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` for an inverted window or a parent that is itself
    /// englobed.
    pub fn add_englobed(
        &mut self,
        parent: AgentId,
        first_aware: Time,
        last_aware: Time,
    ) -> Result<AgentId> {
        if first_aware > last_aware {
            return Err(Error::invalid_operation(format!(
                "englobed window is inverted: {} > {}",
                first_aware, last_aware
            )));
        }
        let parent_item = self.require(parent)?;
        if parent_item.is_englobed() {
            return Err(Error::invalid_operation(format!(
                "{} is already an englobed agent",
                parent
            )));
        }
        if let Some(existing) = self.data.iter().find(|a| {
            a.englobing == Some(parent)
                && a.first_aware == first_aware
                && a.last_aware == last_aware
        }) {
            return Ok(existing.id);
        }
        let id = self.data.next_id();
        let mut child = parent_item.clone();
        child.id = id;
        child.first_aware = first_aware;
        child.last_aware = last_aware;
        child.englobing = Some(parent);
        child.merges = SmallVec::new();
        self.data.push(child);
        self.data.reindex();
        debug!(target: "evtc::agents", %parent, %id, first_aware, last_aware, "Englobed agent added");
        Ok(id)
    }

    /// Append an agent that is not part of the agent table
    pub fn add_agent(&mut self, raw: RawAgent) -> Result<AgentId> {
        let id = self.data.next_id();
        self.data.push(raw.into_item(id));
        self.data.reindex();
        Ok(id)
    }

    /// Replace the instance id
    pub fn override_inst_id(&mut self, agent: AgentId, inst_id: u16) -> Result<()> {
        self.item_mut(agent)?.inst_id = inst_id;
        self.data.reindex();
        Ok(())
    }
}
