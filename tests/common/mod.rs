//! Shared test utilities for all integration test suites.
//!
//! Import via `mod common;` from any test's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::Once;

pub use evtc::core::{Activation, StateChange};
pub use evtc::{
    AgentId, CombatItem, ContentCategory, ContentGuid, EngineConfig, Error, LogHeader, LogModel,
    LogParser, PostProcessor, RawAgent, RawSkill, Time,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route engine logs to the test writer; only the first call installs it.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Build recent enough for every modern behavior
pub const MODERN_BUILD: u64 = 20250101;

/// Build before the marker and GUID changes
pub const LEGACY_BUILD: u64 = 20240101;

/// Sequential config, so failures reproduce deterministically
pub fn sequential_config() -> EngineConfig {
    EngineConfig {
        parallel: false,
        ..EngineConfig::default()
    }
}

// ============================================================================
// LogBuilder - one synthetic log
// ============================================================================

/// Agent table, skill table and records of one synthetic log
///
/// Agents get arena ids in the order they are added, starting at 1.
pub struct LogBuilder {
    header: LogHeader,
    agents: Vec<RawAgent>,
    skills: Vec<RawSkill>,
    records: Vec<CombatItem>,
    config: EngineConfig,
}

impl LogBuilder {
    pub fn new(evtc_build: u64) -> Self {
        Self {
            header: LogHeader::new(evtc_build),
            agents: Vec::new(),
            skills: Vec::new(),
            records: Vec::new(),
            config: sequential_config(),
        }
    }

    /// Add an NPC; returns the id it will be given
    pub fn npc(&mut self, address: u64, species_id: u32, name: &str) -> AgentId {
        self.agents.push(RawAgent::npc(address, species_id, name));
        AgentId::from_index(self.agents.len() as u32)
    }

    pub fn gadget(&mut self, address: u64, gadget_id: u32, name: &str) -> AgentId {
        self.agents.push(RawAgent::gadget(address, gadget_id, name));
        AgentId::from_index(self.agents.len() as u32)
    }

    /// Add a squad player in subgroup 1
    pub fn player(&mut self, address: u64, character: &str, account: &str) -> AgentId {
        self.agents
            .push(RawAgent::player(address, 1, 0, character, account, 1));
        AgentId::from_index(self.agents.len() as u32)
    }

    pub fn skill(&mut self, id: u32, name: &str) -> &mut Self {
        self.skills.push(RawSkill::new(id, name));
        self
    }

    pub fn record(&mut self, record: CombatItem) -> &mut Self {
        self.records.push(record);
        self
    }

    pub fn records(&mut self, records: impl IntoIterator<Item = CombatItem>) -> &mut Self {
        self.records.extend(records);
        self
    }

    pub fn config(&mut self, config: EngineConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// A parser loaded with every record, not finished yet
    pub fn parser(&self) -> LogParser {
        let mut parser = LogParser::new(
            self.header.clone(),
            self.agents.clone(),
            self.skills.clone(),
            self.config.clone(),
        )
        .expect("valid test config");
        parser
            .extend(self.records.iter().cloned())
            .expect("parser accepts records");
        parser
    }

    pub fn finish(&self) -> LogModel {
        init_tracing();
        self.parser().finish().expect("pipeline succeeds")
    }
}

// ============================================================================
// Record builders
// ============================================================================

pub fn state(sc: StateChange, time: Time, src: u64) -> CombatItem {
    CombatItem::state(sc, time, src)
}

pub fn spawn(time: Time, src: u64) -> CombatItem {
    state(StateChange::Spawn, time, src)
}

pub fn dead(time: Time, src: u64) -> CombatItem {
    state(StateChange::ChangeDead, time, src)
}

pub fn gw_build(build: u64) -> CombatItem {
    state(StateChange::GwBuild, 0, build)
}

pub fn point_of_view(time: Time, src: u64) -> CombatItem {
    state(StateChange::PointOfView, time, src)
}

pub fn language(language: u64) -> CombatItem {
    state(StateChange::Language, 0, language)
}

pub fn activation(
    time: Time,
    src: u64,
    skill_id: u32,
    activation: Activation,
    duration: i32,
) -> CombatItem {
    CombatItem {
        time,
        src_agent: src,
        skill_id,
        value: duration,
        is_activation: activation.into(),
        ..CombatItem::default()
    }
}

/// Normal physical hit
pub fn hit(time: Time, src: u64, dst: u64, skill_id: u32, damage: i32) -> CombatItem {
    CombatItem {
        time,
        src_agent: src,
        dst_agent: dst,
        skill_id,
        value: damage,
        ..CombatItem::default()
    }
}

pub fn buff_apply(time: Time, src: u64, dst: u64, buff_id: u32, duration: i32) -> CombatItem {
    CombatItem {
        time,
        src_agent: src,
        dst_agent: dst,
        skill_id: buff_id,
        value: duration,
        buff: 1,
        ..CombatItem::default()
    }
}

pub fn buff_extend(time: Time, src: u64, dst: u64, buff_id: u32, duration: i32) -> CombatItem {
    CombatItem {
        is_offcycle: 1,
        ..buff_apply(time, src, dst, buff_id, duration)
    }
}

/// Every stack of `buff_id` removed from `carrier`
pub fn buff_remove_all(time: Time, carrier: u64, remover: u64, buff_id: u32) -> CombatItem {
    CombatItem {
        time,
        src_agent: carrier,
        dst_agent: remover,
        skill_id: buff_id,
        buff: 1,
        result: 1,
        is_buffremove: 1,
        ..CombatItem::default()
    }
}

/// Marker `marker_id` on `src`; id 0 ends markers
pub fn marker(time: Time, src: u64, marker_id: i32) -> CombatItem {
    CombatItem {
        value: marker_id,
        ..state(StateChange::Marker, time, src)
    }
}

pub fn missile_create(time: Time, src: u64, skill_id: u32, token: u32) -> CombatItem {
    CombatItem {
        skill_id,
        pad: token,
        ..state(StateChange::MissileCreate, time, src)
    }
}

pub fn missile_launch(time: Time, src: u64, target: u64, token: u32) -> CombatItem {
    CombatItem {
        dst_agent: target,
        pad: token,
        ..state(StateChange::MissileLaunch, time, src)
    }
}

/// Missile end; `hit` is the damaged agent's address, 0 for a miss
pub fn missile_remove(time: Time, src: u64, token: u32, hit: u64) -> CombatItem {
    CombatItem {
        dst_agent: hit,
        value: i32::from(hit != 0),
        pad: token,
        ..state(StateChange::MissileRemove, time, src)
    }
}

/// Mapping of a log-local id to its stable GUID
pub fn id_to_guid(category: ContentCategory, id: u32, guid: ContentGuid) -> CombatItem {
    let bytes = guid.as_bytes();
    let mut low = [0u8; 8];
    let mut high = [0u8; 8];
    low.copy_from_slice(&bytes[..8]);
    high.copy_from_slice(&bytes[8..]);
    CombatItem {
        dst_agent: u64::from_le_bytes(high),
        skill_id: id,
        overstack_value: category.to_raw(),
        ..state(StateChange::IdToGuid, 0, u64::from_le_bytes(low))
    }
}

pub fn effect_agent_create(
    time: Time,
    src: u64,
    dst: u64,
    effect_id: u32,
    token: u32,
    duration: i32,
) -> CombatItem {
    CombatItem {
        dst_agent: dst,
        skill_id: effect_id,
        buff_dmg: duration,
        pad: token,
        ..state(StateChange::EffectAgentCreate, time, src)
    }
}

pub fn effect_agent_remove(time: Time, src: u64, token: u32) -> CombatItem {
    CombatItem {
        pad: token,
        ..state(StateChange::EffectAgentRemove, time, src)
    }
}

/// GUID from a readable hex string
pub fn guid(hex: &str) -> ContentGuid {
    ContentGuid::parse(hex).expect("valid guid literal")
}
