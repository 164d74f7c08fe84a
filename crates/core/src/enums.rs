//! Discriminants carried by raw combat records
//!
//! Every conversion from the raw byte is total: values this engine does not
//! know about map to an `Unknown` variant and are ignored downstream.

use serde::{Deserialize, Serialize};

/// `is_statechange` discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateChange {
    /// Not a state change: damage, buff or cast record
    None,
    EnterCombat,
    ExitCombat,
    ChangeUp,
    ChangeDead,
    ChangeDown,
    Spawn,
    Despawn,
    HealthUpdate,
    SquadCombatStart,
    SquadCombatEnd,
    WeaponSwap,
    MaxHealthUpdate,
    PointOfView,
    Language,
    GwBuild,
    ShardId,
    Reward,
    BuffInitial,
    Position,
    Velocity,
    Rotation,
    TeamChange,
    AttackTarget,
    Targetable,
    MapId,
    StackActive,
    StackReset,
    Guild,
    BuffInfo,
    BuffFormula,
    SkillInfo,
    SkillTiming,
    BreakbarState,
    BreakbarPercent,
    Integrity,
    Marker,
    BarrierUpdate,
    InstanceStart,
    TickRate,
    Last90BeforeDown,
    IdToGuid,
    LogNpcUpdate,
    FractalScale,
    SquadMarker,
    Glider,
    StunBreak,
    MissileCreate,
    MissileLaunch,
    MissileRemove,
    EffectGroundCreate,
    EffectGroundRemove,
    EffectAgentCreate,
    EffectAgentRemove,
    /// Any value this engine does not interpret
    Unknown(u8),
}

impl From<u8> for StateChange {
    fn from(value: u8) -> Self {
        use StateChange::*;
        match value {
            0 => None,
            1 => EnterCombat,
            2 => ExitCombat,
            3 => ChangeUp,
            4 => ChangeDead,
            5 => ChangeDown,
            6 => Spawn,
            7 => Despawn,
            8 => HealthUpdate,
            9 => SquadCombatStart,
            10 => SquadCombatEnd,
            11 => WeaponSwap,
            12 => MaxHealthUpdate,
            13 => PointOfView,
            14 => Language,
            15 => GwBuild,
            16 => ShardId,
            17 => Reward,
            18 => BuffInitial,
            19 => Position,
            20 => Velocity,
            21 => Rotation,
            22 => TeamChange,
            23 => AttackTarget,
            24 => Targetable,
            25 => MapId,
            27 => StackActive,
            28 => StackReset,
            29 => Guild,
            30 => BuffInfo,
            31 => BuffFormula,
            32 => SkillInfo,
            33 => SkillTiming,
            34 => BreakbarState,
            35 => BreakbarPercent,
            36 => Integrity,
            37 => Marker,
            38 => BarrierUpdate,
            42 => InstanceStart,
            43 => TickRate,
            44 => Last90BeforeDown,
            46 => IdToGuid,
            47 => LogNpcUpdate,
            50 => FractalScale,
            53 => SquadMarker,
            55 => Glider,
            56 => StunBreak,
            57 => MissileCreate,
            58 => MissileLaunch,
            59 => MissileRemove,
            60 => EffectGroundCreate,
            61 => EffectGroundRemove,
            62 => EffectAgentCreate,
            63 => EffectAgentRemove,
            other => Unknown(other),
        }
    }
}

impl From<StateChange> for u8 {
    fn from(value: StateChange) -> Self {
        use StateChange::*;
        match value {
            None => 0,
            EnterCombat => 1,
            ExitCombat => 2,
            ChangeUp => 3,
            ChangeDead => 4,
            ChangeDown => 5,
            Spawn => 6,
            Despawn => 7,
            HealthUpdate => 8,
            SquadCombatStart => 9,
            SquadCombatEnd => 10,
            WeaponSwap => 11,
            MaxHealthUpdate => 12,
            PointOfView => 13,
            Language => 14,
            GwBuild => 15,
            ShardId => 16,
            Reward => 17,
            BuffInitial => 18,
            Position => 19,
            Velocity => 20,
            Rotation => 21,
            TeamChange => 22,
            AttackTarget => 23,
            Targetable => 24,
            MapId => 25,
            StackActive => 27,
            StackReset => 28,
            Guild => 29,
            BuffInfo => 30,
            BuffFormula => 31,
            SkillInfo => 32,
            SkillTiming => 33,
            BreakbarState => 34,
            BreakbarPercent => 35,
            Integrity => 36,
            Marker => 37,
            BarrierUpdate => 38,
            InstanceStart => 42,
            TickRate => 43,
            Last90BeforeDown => 44,
            IdToGuid => 46,
            LogNpcUpdate => 47,
            FractalScale => 50,
            SquadMarker => 53,
            Glider => 55,
            StunBreak => 56,
            MissileCreate => 57,
            MissileLaunch => 58,
            MissileRemove => 59,
            EffectGroundCreate => 60,
            EffectGroundRemove => 61,
            EffectAgentCreate => 62,
            EffectAgentRemove => 63,
            Unknown(raw) => raw,
        }
    }
}

impl StateChange {
    /// State changes whose `src_agent` is a real agent reference
    ///
    /// Metadata records reuse the agent fields for other payloads and must
    /// not widen an agent's aware window during the identity prepass.
    pub fn src_is_agent(self) -> bool {
        use StateChange::*;
        !matches!(
            self,
            SquadCombatStart
                | SquadCombatEnd
                | Language
                | GwBuild
                | ShardId
                | Reward
                | MapId
                | BuffInfo
                | BuffFormula
                | SkillInfo
                | SkillTiming
                | Integrity
                | InstanceStart
                | TickRate
                | IdToGuid
                | LogNpcUpdate
                | FractalScale
                | SquadMarker
                | Unknown(_)
        )
    }

    /// State changes whose `dst_agent` is a real agent reference
    pub fn dst_is_agent(self) -> bool {
        matches!(
            self,
            StateChange::None
                | StateChange::AttackTarget
                | StateChange::EffectAgentCreate
                | StateChange::MissileLaunch
                | StateChange::MissileRemove
        )
    }
}

/// `is_activation` discriminant: cast lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activation {
    None,
    /// Cast started at normal speed
    Normal,
    /// Cast started under quickness
    Quickness,
    /// Cast ended after firing but before the animation completed
    CancelFire,
    /// Cast ended before firing
    CancelCancel,
    /// Animation completed
    Reset,
    Unknown(u8),
}

impl From<u8> for Activation {
    fn from(value: u8) -> Self {
        match value {
            0 => Activation::None,
            1 => Activation::Normal,
            2 => Activation::Quickness,
            3 => Activation::CancelFire,
            4 => Activation::CancelCancel,
            5 => Activation::Reset,
            other => Activation::Unknown(other),
        }
    }
}

impl From<Activation> for u8 {
    fn from(value: Activation) -> Self {
        match value {
            Activation::None => 0,
            Activation::Normal => 1,
            Activation::Quickness => 2,
            Activation::CancelFire => 3,
            Activation::CancelCancel => 4,
            Activation::Reset => 5,
            Activation::Unknown(raw) => raw,
        }
    }
}

impl Activation {
    /// Opens a cast
    pub fn starts_casting(self) -> bool {
        matches!(self, Activation::Normal | Activation::Quickness)
    }

    /// Closes a cast
    pub fn ends_casting(self) -> bool {
        matches!(
            self,
            Activation::CancelFire | Activation::CancelCancel | Activation::Reset
        )
    }
}

/// `is_buffremove` discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffRemove {
    None,
    /// Every stack removed
    All,
    /// One stack removed
    Single,
    /// Stack removed manually (e.g. by the game engine on expiry)
    Manual,
    Unknown(u8),
}

impl From<u8> for BuffRemove {
    fn from(value: u8) -> Self {
        match value {
            0 => BuffRemove::None,
            1 => BuffRemove::All,
            2 => BuffRemove::Single,
            3 => BuffRemove::Manual,
            other => BuffRemove::Unknown(other),
        }
    }
}

/// Outcome of a direct (physical) hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicalResult {
    Normal,
    Crit,
    Glance,
    Block,
    Evade,
    Interrupt,
    Absorb,
    Blind,
    KillingBlow,
    Downed,
    BreakbarDamage,
    Activation,
    CrowdControl,
    Unknown,
}

impl From<u8> for PhysicalResult {
    fn from(value: u8) -> Self {
        use PhysicalResult::*;
        match value {
            0 => Normal,
            1 => Crit,
            2 => Glance,
            3 => Block,
            4 => Evade,
            5 => Interrupt,
            6 => Absorb,
            7 => Blind,
            8 => KillingBlow,
            9 => Downed,
            10 => BreakbarDamage,
            11 => Activation,
            12 => CrowdControl,
            _ => Unknown,
        }
    }
}

impl PhysicalResult {
    /// Results that represent a landed hit
    pub fn is_hit(self) -> bool {
        matches!(
            self,
            PhysicalResult::Normal
                | PhysicalResult::Crit
                | PhysicalResult::Glance
                | PhysicalResult::KillingBlow
                | PhysicalResult::Downed
        )
    }
}

/// Outcome of a condition tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionResult {
    ExpectedToHit,
    InvulnerableByBuff,
    InvulnerableByPlayerSkill,
    Unknown,
}

impl From<u8> for ConditionResult {
    fn from(value: u8) -> Self {
        match value {
            0 => ConditionResult::ExpectedToHit,
            1 => ConditionResult::InvulnerableByBuff,
            2..=4 => ConditionResult::InvulnerableByPlayerSkill,
            _ => ConditionResult::Unknown,
        }
    }
}

/// Friend-or-foe flag of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Iff {
    Friend,
    Foe,
    Unknown,
}

impl From<u8> for Iff {
    fn from(value: u8) -> Self {
        match value {
            0 => Iff::Friend,
            1 => Iff::Foe,
            _ => Iff::Unknown,
        }
    }
}

/// Category of a log-local content id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentCategory {
    Effect,
    Marker,
    Skill,
    Species,
}

impl ContentCategory {
    /// All categories, in table order
    pub const ALL: [ContentCategory; 4] = [
        ContentCategory::Effect,
        ContentCategory::Marker,
        ContentCategory::Skill,
        ContentCategory::Species,
    ];

    /// Decode the category byte of an IDToGUID record
    pub fn from_raw(value: u32) -> Option<Self> {
        match value {
            0 => Some(ContentCategory::Effect),
            1 => Some(ContentCategory::Marker),
            2 => Some(ContentCategory::Skill),
            3 => Some(ContentCategory::Species),
            _ => None,
        }
    }

    /// Raw byte written in IDToGUID records
    pub fn to_raw(self) -> u32 {
        match self {
            ContentCategory::Effect => 0,
            ContentCategory::Marker => 1,
            ContentCategory::Skill => 2,
            ContentCategory::Species => 3,
        }
    }
}
