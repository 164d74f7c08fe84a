//! Effect reconstruction
//!
//! Ground and agent effects are opened by their create record and closed by
//! the remove record with the same tracking id. Unclosed effects end after
//! their announced duration, or at log end when none was announced.

use crate::context::ResolutionContext;
use crate::group::{group_by, map_groups};
use byteorder::{ByteOrder, LittleEndian};
use evtc_core::events::{EffectAnchor, EffectEvent};
use evtc_core::record::{PACKED_ORIENTATION_SCALE, PACKED_POSITION_SCALE};
use evtc_core::{CombatItem, ContentCategory, Point3, StateChange, Time};
use tracing::debug;

/// Position and orientation packed as six `i16` over `dst_agent` ‖ `value`
fn ground_placement(record: &CombatItem) -> (Point3, Point3) {
    let mut bytes = [0u8; 12];
    LittleEndian::write_u64(&mut bytes[0..8], record.dst_agent);
    LittleEndian::write_i32(&mut bytes[8..12], record.value);
    let mut shorts = [0i16; 6];
    LittleEndian::read_i16_into(&bytes, &mut shorts);
    let position = Point3::new(
        f32::from(shorts[0]) * PACKED_POSITION_SCALE,
        f32::from(shorts[1]) * PACKED_POSITION_SCALE,
        f32::from(shorts[2]) * PACKED_POSITION_SCALE,
    );
    let orientation = Point3::new(
        f32::from(shorts[3]) * PACKED_ORIENTATION_SCALE,
        f32::from(shorts[4]) * PACKED_ORIENTATION_SCALE,
        f32::from(shorts[5]) * PACKED_ORIENTATION_SCALE,
    );
    (position, orientation)
}

/// Rebuild every effect from the effect records
pub fn reconstruct_effects(ctx: &ResolutionContext<'_>, records: &[&CombatItem]) -> Vec<EffectEvent> {
    let groups = group_by(records, |r| r.tracking_id());
    let effects = map_groups(groups, ctx.parallel, |group| effects_of(ctx, &group));
    debug!(
        target: "evtc::reconstruct",
        effects = effects.len(),
        "Effects reconstructed"
    );
    effects
}

fn open(ctx: &ResolutionContext<'_>, record: &CombatItem, anchor: EffectAnchor) -> EffectEvent {
    EffectEvent {
        time: record.time,
        src: ctx.src(record),
        effect_id: record.skill_id,
        guid: ctx.guid(ContentCategory::Effect, record.skill_id),
        tracking_id: record.tracking_id(),
        anchor,
        duration: record.buff_dmg,
        end_time: record.time,
        removed: false,
    }
}

fn fallback_end(effect: &EffectEvent, log_end: Time) -> Time {
    if effect.duration > 0 {
        effect.time + Time::from(effect.duration)
    } else {
        log_end.max(effect.time)
    }
}

fn effects_of(ctx: &ResolutionContext<'_>, records: &[&CombatItem]) -> Vec<EffectEvent> {
    let mut effects: Vec<EffectEvent> = Vec::new();
    // Effects without a tracking id can never be removed.
    let trackable = records.first().map_or(false, |r| r.tracking_id() != 0);
    for record in records {
        match record.state_change() {
            StateChange::EffectGroundCreate => {
                let (position, orientation) = ground_placement(record);
                effects.push(open(ctx, record, EffectAnchor::Ground { position, orientation }));
            }
            StateChange::EffectAgentCreate => {
                let agent = ctx.dst(record);
                effects.push(open(ctx, record, EffectAnchor::Agent { agent }));
            }
            StateChange::EffectGroundRemove | StateChange::EffectAgentRemove if trackable => {
                let is_ground = record.state_change() == StateChange::EffectGroundRemove;
                let target = effects.iter_mut().rev().find(|e| {
                    !e.removed
                        && e.time <= record.time
                        && matches!(e.anchor, EffectAnchor::Ground { .. }) == is_ground
                });
                if let Some(effect) = target {
                    effect.end_time = record.time;
                    effect.removed = true;
                }
            }
            _ => {}
        }
    }
    for effect in effects.iter_mut().filter(|e| !e.removed) {
        effect.end_time = fallback_end(effect, ctx.bounds.end);
    }
    effects
}
