//! Raw combat records
//!
//! A [`CombatItem`] is one fully decoded record of the log. The container
//! decoder (out of scope) produces them in emission order; this crate only
//! classifies them and unpacks the payload fields that are bit-packed.

use crate::enums::{Activation, BuffRemove, Iff, StateChange};
use crate::types::{Point3, Time};
use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

/// Scale applied to positions packed as `i16` triples
pub const PACKED_POSITION_SCALE: f32 = 10.0;

/// Scale applied to orientations and scales packed as `i16`
pub const PACKED_ORIENTATION_SCALE: f32 = 1.0 / 1000.0;

/// One decoded combat record
///
/// Field names follow the on-disk layout. Records are immutable once read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatItem {
    pub time: Time,
    pub src_agent: u64,
    pub dst_agent: u64,
    pub value: i32,
    pub buff_dmg: i32,
    pub overstack_value: u32,
    pub skill_id: u32,
    pub src_instid: u16,
    pub dst_instid: u16,
    pub src_master_instid: u16,
    pub dst_master_instid: u16,
    pub iff: u8,
    pub buff: u8,
    pub result: u8,
    pub is_activation: u8,
    pub is_buffremove: u8,
    pub is_ninety: u8,
    pub is_fifty: u8,
    pub is_moving: u8,
    pub is_statechange: u8,
    pub is_flanking: u8,
    pub is_shields: u8,
    pub is_offcycle: u8,
    pub pad: u32,
}

/// Coarse classification of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Status change, update or metadata
    StateChange(StateChange),
    /// Cast start or end
    Activation(Activation),
    /// Buff stack removal
    BuffRemove(BuffRemove),
    /// Buff application or extension
    BuffApply,
    /// Condition damage tick
    ConditionDamage,
    /// Direct hit, including breakbar damage and crowd control
    DirectDamage,
}

impl CombatItem {
    /// Classify the record
    ///
    /// Precedence: state change, then activation, then buff removal, then
    /// the buff/damage split on `buff` and `value`.
    pub fn kind(&self) -> RecordKind {
        let sc = self.state_change();
        if sc != StateChange::None {
            return RecordKind::StateChange(sc);
        }
        let activation = self.activation();
        if activation != Activation::None {
            return RecordKind::Activation(activation);
        }
        let remove = self.buff_remove();
        if remove != BuffRemove::None {
            return RecordKind::BuffRemove(remove);
        }
        if self.buff != 0 && self.value == 0 {
            RecordKind::ConditionDamage
        } else if self.buff != 0 {
            RecordKind::BuffApply
        } else {
            RecordKind::DirectDamage
        }
    }

    /// Decoded `is_statechange`
    #[inline]
    pub fn state_change(&self) -> StateChange {
        StateChange::from(self.is_statechange)
    }

    /// Decoded `is_activation`
    #[inline]
    pub fn activation(&self) -> Activation {
        Activation::from(self.is_activation)
    }

    /// Decoded `is_buffremove`
    #[inline]
    pub fn buff_remove(&self) -> BuffRemove {
        BuffRemove::from(self.is_buffremove)
    }

    /// Decoded `iff`
    #[inline]
    pub fn iff(&self) -> Iff {
        Iff::from(self.iff)
    }

    /// True when `src_agent` references an agent for this record kind
    pub fn src_is_agent(&self) -> bool {
        self.src_agent != 0 && self.state_change().src_is_agent()
    }

    /// True when `dst_agent` references an agent for this record kind
    pub fn dst_is_agent(&self) -> bool {
        self.dst_agent != 0 && self.state_change().dst_is_agent()
    }

    /// Tracking token of a missile or split effect
    #[inline]
    pub fn tracking_id(&self) -> u32 {
        self.pad
    }

    /// Create a bare state change record
    pub fn state(state_change: StateChange, time: Time, src_agent: u64) -> Self {
        Self {
            time,
            src_agent,
            is_statechange: state_change.into(),
            ..Self::default()
        }
    }
}

/// Unpack three little-endian `i16` from the low 48 bits of `packed`
pub fn unpack_i16_triple(packed: u64) -> [i16; 3] {
    let bytes = packed.to_le_bytes();
    [
        LittleEndian::read_i16(&bytes[0..2]),
        LittleEndian::read_i16(&bytes[2..4]),
        LittleEndian::read_i16(&bytes[4..6]),
    ]
}

/// Pack three `i16` into the low 48 bits of a `u64`
pub fn pack_i16_triple(values: [i16; 3]) -> u64 {
    let mut bytes = [0u8; 8];
    LittleEndian::write_i16(&mut bytes[0..2], values[0]);
    LittleEndian::write_i16(&mut bytes[2..4], values[1]);
    LittleEndian::write_i16(&mut bytes[4..6], values[2]);
    u64::from_le_bytes(bytes)
}

/// Decode a world position packed as an `i16` triple
pub fn unpack_position(packed: u64) -> Point3 {
    let [x, y, z] = unpack_i16_triple(packed);
    Point3::new(
        x as f32 * PACKED_POSITION_SCALE,
        y as f32 * PACKED_POSITION_SCALE,
        z as f32 * PACKED_POSITION_SCALE,
    )
}

/// Encode a world position as an `i16` triple (lossy)
pub fn pack_position(position: Point3) -> u64 {
    let scale = |v: f32| (v / PACKED_POSITION_SCALE).round() as i16;
    pack_i16_triple([scale(position.x), scale(position.y), scale(position.z)])
}

/// Decode two little-endian `f32` from a `u64`
pub fn unpack_f32_pair(packed: u64) -> [f32; 2] {
    let bytes = packed.to_le_bytes();
    [
        LittleEndian::read_f32(&bytes[0..4]),
        LittleEndian::read_f32(&bytes[4..8]),
    ]
}

/// Encode two `f32` into a `u64`
pub fn pack_f32_pair(values: [f32; 2]) -> u64 {
    let mut bytes = [0u8; 8];
    LittleEndian::write_f32(&mut bytes[0..4], values[0]);
    LittleEndian::write_f32(&mut bytes[4..8], values[1]);
    u64::from_le_bytes(bytes)
}
