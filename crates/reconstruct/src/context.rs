//! Frozen inputs shared by every reconstruction pass

use evtc_agents::AgentData;
use evtc_content::ContentTable;
use evtc_core::{
    AgentId, CombatItem, ContentCategory, ContentGuid, EngineConfig, LogHeader, MarkerProtocol,
    Result, Time,
};

/// First and last timestamp of the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogBounds {
    pub start: Time,
    pub end: Time,
}

impl LogBounds {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Bounds spanned by the records that carry a real timestamp
    ///
    /// Metadata records (build, language, id mappings...) are skipped: their
    /// time field is not guaranteed to be on the log's clock.
    pub fn from_records(records: &[CombatItem]) -> Self {
        let mut times = records
            .iter()
            .filter(|r| r.state_change().src_is_agent())
            .map(|r| r.time);
        match times.next() {
            Some(first) => {
                let (start, end) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
                Self { start, end }
            }
            None => Self { start: 0, end: 0 },
        }
    }

    /// True when `time` is inside `[start, end]`
    pub fn contains(&self, time: Time) -> bool {
        self.start <= time && time <= self.end
    }

    /// `time` pulled inside `[start, end]`
    pub fn clamp(&self, time: Time) -> Time {
        time.max(self.start).min(self.end)
    }

    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

/// Read-only view of everything a reconstruction pass needs
///
/// Holds only frozen forms: agents and content can no longer change once a
/// context exists.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    pub agents: &'a AgentData,
    pub content: &'a ContentTable,
    pub header: &'a LogHeader,
    pub bounds: LogBounds,
    pub marker_protocol: MarkerProtocol,
    pub min_cast_duration: Time,
    pub keep_truncated_casts: bool,
    pub parallel: bool,
}

impl<'a> ResolutionContext<'a> {
    /// # Errors
    ///
    /// Returns a config error if the marker protocol setting is invalid.
    pub fn new(
        agents: &'a AgentData,
        content: &'a ContentTable,
        header: &'a LogHeader,
        config: &EngineConfig,
        bounds: LogBounds,
    ) -> Result<Self> {
        Ok(Self {
            agents,
            content,
            header,
            bounds,
            marker_protocol: config.marker_protocol_for(header)?,
            min_cast_duration: config.min_cast_duration_ms,
            keep_truncated_casts: config.keep_truncated_casts,
            parallel: config.parallel,
        })
    }

    /// Logical agent behind a raw address at `time`
    #[inline]
    pub fn agent(&self, address: u64, time: Time) -> AgentId {
        if address == 0 {
            return AgentId::UNKNOWN;
        }
        self.agents.resolve(address, time)
    }

    /// Logical source agent of a record
    #[inline]
    pub fn src(&self, record: &CombatItem) -> AgentId {
        self.agent(record.src_agent, record.time)
    }

    /// Logical destination agent of a record
    #[inline]
    pub fn dst(&self, record: &CombatItem) -> AgentId {
        self.agent(record.dst_agent, record.time)
    }

    /// GUID of a log-local content id
    pub fn guid(&self, category: ContentCategory, id: u32) -> Option<ContentGuid> {
        self.content.resolve_by_id(category, id)
    }

    pub fn is_player(&self, agent: AgentId) -> bool {
        self.agents.get(agent).map_or(false, |a| a.is_player())
    }
}
