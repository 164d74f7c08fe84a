//! Cast pairing through the pipeline

use crate::common::*;
use evtc::events::CastStatus;

const BOSS: u64 = 10;
const PLAYER: u64 = 20;
const SLAM: u32 = 5;

fn casts(model: &LogModel, caster: AgentId) -> Vec<(Time, Time, CastStatus, bool)> {
    model
        .store()
        .casts_of(caster)
        .iter()
        .map(|c| (c.time, c.end_time, c.status, c.truncated))
        .collect()
}

fn boss_log() -> (LogBuilder, AgentId) {
    let mut log = LogBuilder::new(MODERN_BUILD);
    let boss = log.npc(BOSS, 15000, "Boss");
    log.skill(SLAM, "Slam");
    log.records([spawn(0, BOSS), dead(2000, BOSS)]);
    (log, boss)
}

#[test]
fn start_and_end_are_paired() {
    let (mut log, boss) = boss_log();
    log.records([
        activation(100, BOSS, SLAM, Activation::Normal, 300),
        activation(400, BOSS, SLAM, Activation::Reset, 300),
        activation(500, BOSS, SLAM, Activation::Quickness, 300),
        activation(650, BOSS, SLAM, Activation::CancelFire, 150),
    ]);
    let model = log.finish();

    assert_eq!(
        casts(&model, boss),
        vec![
            (100, 400, CastStatus::Completed, false),
            (500, 650, CastStatus::Cancelled, false),
        ]
    );
    assert!(model.store().casts_of_skill(boss, SLAM).last().unwrap().quickness);
}

#[test]
fn second_start_force_closes_pending_cast() {
    let (mut log, boss) = boss_log();
    log.records([
        activation(100, BOSS, SLAM, Activation::Normal, 300),
        activation(200, BOSS, 6, Activation::Normal, 300),
        activation(500, BOSS, 6, Activation::CancelCancel, 300),
    ]);
    let model = log.finish();

    assert_eq!(
        casts(&model, boss),
        vec![
            (100, 200, CastStatus::Unknown, false),
            (200, 500, CastStatus::Interrupted, false),
        ]
    );
}

#[test]
fn trailing_cast_closes_at_log_end() {
    let (mut log, boss) = boss_log();
    log.record(activation(1800, BOSS, SLAM, Activation::Normal, 1000));
    let model = log.finish();

    assert_eq!(
        casts(&model, boss),
        vec![(1800, 2000, CastStatus::Unknown, false)]
    );
}

#[test]
fn end_before_log_start_becomes_truncated_cast() {
    let (mut log, boss) = boss_log();
    // Ends 50ms in, after a 100ms cast: it started before recording.
    log.record(activation(50, BOSS, SLAM, Activation::Reset, 100));
    let model = log.finish();

    assert_eq!(casts(&model, boss), vec![(0, 50, CastStatus::Completed, true)]);
}

#[test]
fn truncated_casts_can_be_disabled() {
    let (mut log, boss) = boss_log();
    log.record(activation(50, BOSS, SLAM, Activation::Reset, 100));
    log.config(EngineConfig {
        keep_truncated_casts: false,
        ..sequential_config()
    });
    let model = log.finish();

    assert!(casts(&model, boss).is_empty());
}

#[test]
fn orphan_end_inside_log_is_dropped() {
    let (mut log, boss) = boss_log();
    log.record(activation(800, BOSS, SLAM, Activation::Reset, 100));
    let model = log.finish();

    assert!(casts(&model, boss).is_empty());
}

#[test]
fn instant_player_casts_are_discarded() {
    let (mut log, _) = boss_log();
    let player = log.player(PLAYER, "Hero", ":Hero.1234");
    log.records([
        activation(700, PLAYER, 77, Activation::Normal, 0),
        activation(701, PLAYER, 77, Activation::Reset, 0),
        activation(900, PLAYER, 78, Activation::Normal, 500),
        activation(1400, PLAYER, 78, Activation::Reset, 500),
    ]);
    let model = log.finish();

    assert_eq!(
        casts(&model, player),
        vec![(900, 1400, CastStatus::Completed, false)]
    );
    assert!(model.correlator().is_casting(78, player, 1000));
    assert!(model.correlator().has_previous_cast(78, player, 905));
    assert!(!model.correlator().is_casting(78, player, 1500));
}
