//! The frozen result of one parsed log

use evtc_agents::{AgentData, AgentItem};
use evtc_content::{ContentTable, SkillTable};
use evtc_core::events::{BuffInfo, LogMetadata, SkillInfo};
use evtc_core::{
    AgentId, ContentCategory, ContentGuid, EngineConfig, Error, LogHeader, Result, Time,
};
use evtc_query::Correlator;
use evtc_reconstruct::{InfoTables, LogBounds};
use evtc_storage::EventStore;

/// Read-only model of one log
///
/// Everything is resolved and indexed; the model is `Send + Sync` and can
/// be shared across threads behind a reference or an `Arc`.
#[derive(Debug)]
pub struct LogModel {
    pub(crate) header: LogHeader,
    pub(crate) config: EngineConfig,
    pub(crate) bounds: LogBounds,
    pub(crate) agents: AgentData,
    pub(crate) content: ContentTable,
    pub(crate) skills: SkillTable,
    pub(crate) store: EventStore,
    pub(crate) info: InfoTables,
    pub(crate) metadata: LogMetadata,
}

impl LogModel {
    pub fn header(&self) -> &LogHeader {
        &self.header
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn agents(&self) -> &AgentData {
        &self.agents
    }

    pub fn content(&self) -> &ContentTable {
        &self.content
    }

    pub fn skills(&self) -> &SkillTable {
        &self.skills
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn info(&self) -> &InfoTables {
        &self.info
    }

    pub fn metadata(&self) -> &LogMetadata {
        &self.metadata
    }

    pub fn bounds(&self) -> LogBounds {
        self.bounds
    }

    /// Earliest timestamp carried by an agent record
    pub fn log_start(&self) -> Time {
        self.bounds.start
    }

    /// Latest timestamp carried by an agent record
    pub fn log_end(&self) -> Time {
        self.bounds.end
    }

    /// Correlation view using the configured server delay as epsilon
    pub fn correlator(&self) -> Correlator<'_> {
        Correlator::new(&self.store, &self.agents, &self.content)
            .with_epsilon(self.config.server_delay_ms)
    }

    /// Agent description
    ///
    /// # Errors
    ///
    /// `UnknownAgent` for the sentinel or an id from another log.
    pub fn agent(&self, id: AgentId) -> Result<&AgentItem> {
        self.agents.get(id).ok_or(Error::UnknownAgent(id))
    }

    /// Logical agent behind a raw address at `time`
    pub fn resolve(&self, address: u64, time: Time) -> AgentId {
        self.agents.resolve(address, time)
    }

    /// Game build the log was recorded on
    ///
    /// # Errors
    ///
    /// `MissingMetadata` when the log carries no build record.
    pub fn gw2_build(&self) -> Result<u64> {
        self.metadata
            .gw2_build
            .ok_or(Error::MissingMetadata("gw2 build"))
    }

    /// Agent that recorded the log
    ///
    /// # Errors
    ///
    /// `MissingMetadata` when the log carries no point-of-view record.
    pub fn point_of_view(&self) -> Result<AgentId> {
        self.metadata
            .point_of_view
            .ok_or(Error::MissingMetadata("point of view"))
    }

    /// Client language id
    ///
    /// # Errors
    ///
    /// `MissingMetadata` when the log carries no language record.
    pub fn language(&self) -> Result<u64> {
        self.metadata
            .language
            .ok_or(Error::MissingMetadata("language"))
    }

    /// Numeric effect id standing for `guid` in this log
    pub fn effect_id(&self, guid: ContentGuid) -> Option<u32> {
        self.content.resolve_by_guid(ContentCategory::Effect, guid)
    }

    /// Numeric marker id standing for `guid` in this log
    pub fn marker_id(&self, guid: ContentGuid) -> Option<u32> {
        self.content.resolve_by_guid(ContentCategory::Marker, guid)
    }

    pub fn skill_name(&self, skill_id: u32) -> Option<&str> {
        self.skills.name(skill_id)
    }

    pub fn buff_info(&self, buff_id: u32) -> Option<&BuffInfo> {
        self.info.buff(buff_id)
    }

    pub fn skill_info(&self, skill_id: u32) -> Option<&SkillInfo> {
        self.info.skill(skill_id)
    }
}
