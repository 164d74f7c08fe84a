//! Single-record events and log metadata
//!
//! Status changes, buff events and damage each come from exactly one record
//! and convert independently. Metadata records fold into [`LogMetadata`].

use crate::context::ResolutionContext;
use evtc_core::events::{
    AttackTargetEvent, BuffEvent, BuffEventKind, DamageEvent, DamageKind, HitResult,
    LogMetadata, SquadCombatBoundary, StatusEvent, StatusKind,
};
use evtc_core::record::unpack_f32_pair;
use evtc_core::{
    AgentId, BuffRemove, CombatItem, ConditionResult, PhysicalResult, Point3, RecordKind,
    StateChange,
};

/// A converted single-record event
#[derive(Debug, Clone, PartialEq)]
pub enum SingleEvent {
    Status(StatusEvent),
    Buff(BuffEvent),
    Damage(DamageEvent),
}

/// Convert one record, or `None` when it is not a single-record event or
/// carries nothing usable
pub fn convert(ctx: &ResolutionContext<'_>, record: &CombatItem) -> Option<SingleEvent> {
    match record.kind() {
        RecordKind::StateChange(sc) => convert_state_change(ctx, record, sc),
        RecordKind::Activation(_) => None,
        RecordKind::BuffRemove(remove) => buff_remove(ctx, record, remove).map(SingleEvent::Buff),
        RecordKind::BuffApply => buff_apply(ctx, record, false).map(SingleEvent::Buff),
        RecordKind::ConditionDamage => condition_damage(ctx, record).map(SingleEvent::Damage),
        RecordKind::DirectDamage => direct_damage(ctx, record).map(SingleEvent::Damage),
    }
}

fn convert_state_change(
    ctx: &ResolutionContext<'_>,
    record: &CombatItem,
    sc: StateChange,
) -> Option<SingleEvent> {
    match sc {
        StateChange::BuffInitial => buff_apply(ctx, record, true).map(SingleEvent::Buff),
        StateChange::StackActive => Some(SingleEvent::Buff(BuffEvent {
            time: record.time,
            src: AgentId::UNKNOWN,
            dst: ctx.src(record),
            buff_id: record.skill_id,
            kind: BuffEventKind::StackActive {
                instance_id: record.dst_agent as u32,
            },
        })),
        StateChange::StackReset => Some(SingleEvent::Buff(BuffEvent {
            time: record.time,
            src: AgentId::UNKNOWN,
            dst: ctx.src(record),
            buff_id: record.skill_id,
            kind: BuffEventKind::StackReset {
                instance_id: record.pad,
                duration: record.value,
            },
        })),
        _ => status_kind(record, sc).and_then(|kind| {
            let src = ctx.src(record);
            if src.is_unknown() {
                return None;
            }
            Some(SingleEvent::Status(StatusEvent {
                time: record.time,
                src,
                kind,
            }))
        }),
    }
}

fn percent(raw: u64) -> f64 {
    (raw as f64 / 100.0).min(100.0)
}

fn float_xyz(record: &CombatItem) -> Point3 {
    let [x, y] = unpack_f32_pair(record.dst_agent);
    Point3::new(x, y, f32::from_bits(record.value as u32))
}

/// Payload of a status record, `None` for any other state change
pub fn status_kind(record: &CombatItem, sc: StateChange) -> Option<StatusKind> {
    let kind = match sc {
        StateChange::EnterCombat => StatusKind::EnterCombat {
            subgroup: record.dst_agent,
            spec: record.value,
        },
        StateChange::ExitCombat => StatusKind::ExitCombat,
        StateChange::ChangeUp => StatusKind::Alive,
        StateChange::ChangeDead => StatusKind::Dead,
        StateChange::ChangeDown => StatusKind::Down,
        StateChange::Spawn => StatusKind::Spawn,
        StateChange::Despawn => StatusKind::Despawn,
        StateChange::HealthUpdate => StatusKind::HealthUpdate {
            percent: percent(record.dst_agent),
        },
        StateChange::BarrierUpdate => StatusKind::BarrierUpdate {
            percent: percent(record.dst_agent),
        },
        StateChange::MaxHealthUpdate => StatusKind::MaxHealthUpdate {
            max_health: record.dst_agent,
        },
        StateChange::TeamChange => StatusKind::TeamChange {
            team: record.dst_agent,
        },
        StateChange::Targetable => StatusKind::Targetable {
            targetable: record.dst_agent == 1,
        },
        StateChange::BreakbarState => StatusKind::BreakbarState {
            state: record.value as u16,
        },
        StateChange::BreakbarPercent => StatusKind::BreakbarPercent {
            percent: f32::from_bits(record.value as u32) * 100.0,
        },
        StateChange::Last90BeforeDown => StatusKind::Last90BeforeDown {
            time_since_last_90: record.dst_agent,
        },
        StateChange::Glider => StatusKind::Glider {
            deployed: record.value == 1,
        },
        StateChange::StunBreak => StatusKind::StunBreak {
            remaining: record.value,
        },
        StateChange::WeaponSwap => StatusKind::WeaponSwap {
            set: record.dst_agent,
        },
        StateChange::Position => StatusKind::Position(float_xyz(record)),
        StateChange::Velocity => StatusKind::Velocity(float_xyz(record)),
        StateChange::Rotation => {
            let [x, y] = unpack_f32_pair(record.dst_agent);
            StatusKind::Rotation(Point3::new(x, y, 0.0))
        }
        _ => return None,
    };
    Some(kind)
}

fn buff_apply(ctx: &ResolutionContext<'_>, record: &CombatItem, initial: bool) -> Option<BuffEvent> {
    let kind = if record.is_offcycle > 0 && !initial {
        if ctx.header.has_broken_buff_extensions() {
            return None;
        }
        BuffEventKind::Extension {
            extended_duration: record.value,
            previous_duration: record.overstack_value,
        }
    } else {
        BuffEventKind::Apply {
            applied_duration: record.value,
            overridden_duration: record.overstack_value,
            instance_id: record.pad,
            active: record.is_shields > 0,
            initial,
        }
    };
    Some(BuffEvent {
        time: record.time,
        src: ctx.src(record),
        dst: ctx.dst(record),
        buff_id: record.skill_id,
        kind,
    })
}

/// Removals name the carrier in `src_agent` and the remover in `dst_agent`
fn buff_remove(ctx: &ResolutionContext<'_>, record: &CombatItem, remove: BuffRemove) -> Option<BuffEvent> {
    let kind = match remove {
        BuffRemove::All => BuffEventKind::RemoveAll {
            removed_duration: record.value,
            removed_stacks: i32::from(record.result),
        },
        BuffRemove::Single => BuffEventKind::RemoveSingle {
            removed_duration: record.value,
            instance_id: record.pad,
        },
        BuffRemove::Manual => BuffEventKind::RemoveManual {
            removed_duration: record.value,
        },
        _ => return None,
    };
    Some(BuffEvent {
        time: record.time,
        src: ctx.dst(record),
        dst: ctx.src(record),
        buff_id: record.skill_id,
        kind,
    })
}

fn damage(ctx: &ResolutionContext<'_>, record: &CombatItem, kind: DamageKind) -> DamageEvent {
    DamageEvent {
        time: record.time,
        src: ctx.src(record),
        dst: ctx.dst(record),
        skill_id: record.skill_id,
        iff: record.iff(),
        flanking: record.is_flanking > 0,
        against_moving: record.is_moving > 0,
        kind,
    }
}

fn condition_damage(ctx: &ResolutionContext<'_>, record: &CombatItem) -> Option<DamageEvent> {
    let result = ConditionResult::from(record.result);
    if result == ConditionResult::Unknown {
        return None;
    }
    Some(damage(
        ctx,
        record,
        DamageKind::Health {
            damage: record.buff_dmg,
            shield_damage: record.overstack_value,
            result: HitResult::Condition(result),
        },
    ))
}

fn direct_damage(ctx: &ResolutionContext<'_>, record: &CombatItem) -> Option<DamageEvent> {
    let kind = match PhysicalResult::from(record.result) {
        PhysicalResult::Activation | PhysicalResult::Unknown => return None,
        PhysicalResult::BreakbarDamage => DamageKind::Breakbar {
            damage: f64::from(record.value) / 10.0,
        },
        PhysicalResult::CrowdControl => DamageKind::CrowdControl {
            duration: record.value,
        },
        result => DamageKind::Health {
            damage: record.value,
            shield_damage: record.overstack_value,
            result: HitResult::Physical(result),
        },
    };
    Some(damage(ctx, record, kind))
}

/// Fold every metadata record into [`LogMetadata`], in record order
pub fn collect_metadata(ctx: &ResolutionContext<'_>, records: &[CombatItem]) -> LogMetadata {
    let mut meta = LogMetadata::default();
    for record in records {
        let boundary = || SquadCombatBoundary {
            time: record.time,
            server_unix_timestamp: record.value as u32,
        };
        match record.state_change() {
            StateChange::GwBuild => {
                if meta.gw2_build.is_none() && record.src_agent != 0 {
                    meta.gw2_build = Some(record.src_agent);
                }
            }
            StateChange::Language => meta.language = Some(record.src_agent),
            StateChange::PointOfView => meta.point_of_view = Some(ctx.src(record)),
            StateChange::MapId => meta.map_ids.push((record.time, record.src_agent)),
            StateChange::SquadCombatStart => {
                if meta.log_start.is_none() {
                    meta.log_start = Some(boundary());
                }
                meta.squad_combat_starts.push(boundary());
            }
            StateChange::SquadCombatEnd => {
                meta.log_end = Some(boundary());
                meta.squad_combat_ends.push(boundary());
            }
            StateChange::InstanceStart => meta.instance_start = Some(record.src_agent),
            StateChange::TickRate => meta.tick_rates.push((record.time, record.src_agent)),
            StateChange::FractalScale => meta.fractal_scale = Some(record.src_agent),
            StateChange::ShardId => meta.shards.push(record.src_agent),
            StateChange::Integrity => meta
                .integrity_errors
                .push(format!("integrity check failed at {}: code {}", record.time, record.value)),
            StateChange::AttackTarget => meta.attack_targets.push(AttackTargetEvent {
                time: record.time,
                attack_target: ctx.src(record),
                target: ctx.dst(record),
                targetable: record.value == 1,
            }),
            _ => {}
        }
    }
    meta
}
