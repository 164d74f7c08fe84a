//! Missile reconstruction
//!
//! Records share a tracking token in `pad`. A create opens a missile; a
//! launch or remove applies to the latest missile of the token created at or
//! before its own time. Launches and removes with no such missile are
//! dropped.

use crate::context::ResolutionContext;
use crate::group::{group_by, map_groups};
use evtc_core::events::{MissileEvent, MissileLaunch, MissileRemoval};
use evtc_core::record::unpack_position;
use evtc_core::{CombatItem, StateChange};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Rebuild every missile from the missile records
pub fn reconstruct_missiles(
    ctx: &ResolutionContext<'_>,
    records: &[&CombatItem],
) -> Vec<MissileEvent> {
    let groups = group_by(records, |r| r.tracking_id());
    let dropped = AtomicUsize::new(0);
    let missiles = map_groups(groups, ctx.parallel, |group| {
        let (missiles, orphans) = missiles_of(ctx, &group);
        dropped.fetch_add(orphans, Ordering::Relaxed);
        missiles
    });
    debug!(
        target: "evtc::reconstruct",
        missiles = missiles.len(),
        dropped = dropped.load(Ordering::Relaxed),
        "Missiles reconstructed"
    );
    missiles
}

/// Scan one token's records; returns the missiles and the orphan count
fn missiles_of(ctx: &ResolutionContext<'_>, records: &[&CombatItem]) -> (Vec<MissileEvent>, usize) {
    let mut missiles: Vec<MissileEvent> = Vec::new();
    let mut orphans = 0;
    for record in records {
        match record.state_change() {
            StateChange::MissileCreate => missiles.push(MissileEvent {
                time: record.time,
                src: ctx.src(record),
                skill_id: record.skill_id,
                tracking_id: record.tracking_id(),
                origin: unpack_position(record.dst_agent),
                launches: SmallVec::new(),
                removal: None,
                end_time: ctx.bounds.end.max(record.time),
            }),
            StateChange::MissileLaunch => {
                match missiles.iter_mut().rev().find(|m| m.time <= record.time) {
                    Some(missile) => missile.launches.push(MissileLaunch {
                        time: record.time,
                        target: ctx.dst(record),
                        speed: record.value,
                        flags: record.buff_dmg,
                    }),
                    None => orphans += 1,
                }
            }
            StateChange::MissileRemove => {
                match missiles.iter_mut().rev().find(|m| m.time <= record.time) {
                    Some(missile) if missile.removal.is_none() => {
                        missile.removal = Some(MissileRemoval {
                            time: record.time,
                            did_hit: record.value != 0,
                            damaging_agent: ctx.dst(record),
                        });
                        missile.end_time = record.time;
                    }
                    _ => orphans += 1,
                }
            }
            _ => {}
        }
    }
    (missiles, orphans)
}
