//! Cast reconstruction from activation records
//!
//! Per caster, a start opens a cast and the next end closes it. A start
//! arriving while a cast is pending force-closes the pending one. Casts of
//! one caster never overlap: each is cut at the next cast's start.

use crate::context::ResolutionContext;
use crate::group::{group_by, map_groups};
use evtc_core::events::{CastEvent, CastStatus};
use evtc_core::{Activation, AgentId, CombatItem, Time};
use tracing::debug;

/// Rebuild every cast from the activation records
pub fn reconstruct_casts(ctx: &ResolutionContext<'_>, records: &[&CombatItem]) -> Vec<CastEvent> {
    let groups = group_by(records, |r| ctx.src(r));
    let casts = map_groups(groups, ctx.parallel, |group| {
        let caster = group.first().map_or(AgentId::UNKNOWN, |r| ctx.src(r));
        casts_of(ctx, caster, &group)
    });
    debug!(
        target: "evtc::reconstruct",
        records = records.len(),
        casts = casts.len(),
        "Casts reconstructed"
    );
    casts
}

fn status_of(activation: Activation) -> CastStatus {
    match activation {
        Activation::Reset => CastStatus::Completed,
        Activation::CancelFire => CastStatus::Cancelled,
        Activation::CancelCancel => CastStatus::Interrupted,
        _ => CastStatus::Unknown,
    }
}

fn open(caster: AgentId, start: &CombatItem) -> CastEvent {
    CastEvent {
        time: start.time,
        caster,
        skill_id: start.skill_id,
        expected_duration: start.value,
        end_time: start.time,
        status: CastStatus::Unknown,
        quickness: start.activation() == Activation::Quickness,
        truncated: false,
    }
}

fn close(mut cast: CastEvent, end: Time, status: CastStatus) -> CastEvent {
    cast.end_time = end.max(cast.time);
    cast.status = status;
    cast
}

/// One ordered scan over a single caster's records
fn casts_of(ctx: &ResolutionContext<'_>, caster: AgentId, records: &[&CombatItem]) -> Vec<CastEvent> {
    let log_start = ctx.bounds.start;
    let mut casts: Vec<CastEvent> = Vec::new();
    let mut pending: Option<CastEvent> = None;
    let mut dropped = 0usize;

    for record in records {
        let activation = record.activation();
        if activation.starts_casting() {
            if let Some(previous) = pending.take() {
                casts.push(close(previous, record.time, CastStatus::Unknown));
            }
            pending = Some(open(caster, record));
        } else if activation.ends_casting() {
            match pending.take() {
                Some(cast) if cast.skill_id == record.skill_id => {
                    casts.push(close(cast, record.time, status_of(activation)));
                }
                other => {
                    pending = other;
                    // End without a matching start: only kept when the cast
                    // began before recording did.
                    let implied_start = record.time - Time::from(record.value);
                    if ctx.keep_truncated_casts && implied_start < log_start {
                        casts.push(CastEvent {
                            time: log_start,
                            caster,
                            skill_id: record.skill_id,
                            expected_duration: record.value,
                            end_time: record.time.max(log_start),
                            status: status_of(activation),
                            quickness: false,
                            truncated: true,
                        });
                    } else {
                        dropped += 1;
                    }
                }
            }
        }
    }
    if let Some(cast) = pending {
        casts.push(close(cast, ctx.bounds.end, CastStatus::Unknown));
    }

    casts.sort_by_key(|c| c.time);
    for i in 1..casts.len() {
        let next_start = casts[i].time;
        casts[i - 1].cut_at(next_start);
    }

    if ctx.is_player(caster) {
        let min = ctx.min_cast_duration;
        let before = casts.len();
        casts.retain(|c| c.end_time - c.time > min);
        dropped += before - casts.len();
    }
    if dropped > 0 {
        debug!(target: "evtc::reconstruct", %caster, dropped, "Activation records absorbed");
    }
    casts
}
