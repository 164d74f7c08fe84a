//! Squad ground marker reconstruction
//!
//! Records are keyed by marker slot (`skill_id`). The position is two `f32`
//! in `src_agent` and one `f32` in the low half of `dst_agent`; an all
//! infinite position removes the marker. Squad marker records carry no
//! agent, so they do not take part in the log bounds; their times are
//! clamped to them.

use crate::context::ResolutionContext;
use crate::group::{group_by, map_groups};
use evtc_core::events::SquadMarkerEvent;
use evtc_core::record::unpack_f32_pair;
use evtc_core::{CombatItem, Point3};
use tracing::debug;

fn position(record: &CombatItem) -> Point3 {
    let [x, y] = unpack_f32_pair(record.src_agent);
    let [z, _] = unpack_f32_pair(record.dst_agent);
    Point3::new(x, y, z)
}

fn is_removal(position: &Point3) -> bool {
    position.x.is_infinite() && position.y.is_infinite() && position.z.is_infinite()
}

/// Rebuild every squad marker from the squad marker records
pub fn reconstruct_squad_markers(
    ctx: &ResolutionContext<'_>,
    records: &[&CombatItem],
) -> Vec<SquadMarkerEvent> {
    let groups = group_by(records, |r| r.skill_id);
    let bounds = ctx.bounds;
    let markers = map_groups(groups, ctx.parallel, |group| {
        let mut markers: Vec<SquadMarkerEvent> = Vec::new();
        let mut open = false;
        for record in group {
            let time = bounds.clamp(record.time);
            let pos = position(record);
            if is_removal(&pos) {
                if let Some(last) = markers.last_mut().filter(|_| open) {
                    last.end_time = time.max(last.time);
                    open = false;
                }
                continue;
            }
            if let Some(last) = markers.last_mut().filter(|_| open) {
                if last.position == pos {
                    continue;
                }
                last.end_time = time.max(last.time);
            }
            markers.push(SquadMarkerEvent {
                time,
                index: record.skill_id,
                position: pos,
                end_time: bounds.end.max(time),
            });
            open = true;
        }
        markers
    });
    debug!(
        target: "evtc::reconstruct",
        markers = markers.len(),
        "Squad markers reconstructed"
    );
    markers
}
