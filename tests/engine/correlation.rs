//! Epsilon-window correlation over the built model

use crate::common::*;
use evtc::{find_related, SERVER_DELAY_CONSTANT};

const BOSS: u64 = 10;
const PLAYER: u64 = 20;
const MIGHT: u32 = 740;
const STABILITY: u32 = 1122;

fn buff_log() -> (LogModel, AgentId, AgentId) {
    let mut log = LogBuilder::new(MODERN_BUILD);
    let boss = log.npc(BOSS, 15000, "Boss");
    let player = log.player(PLAYER, "Hero", ":Hero.1234");
    log.records([
        spawn(0, BOSS),
        spawn(0, PLAYER),
        buff_apply(900, PLAYER, BOSS, STABILITY, 2000),
        buff_apply(998, PLAYER, BOSS, MIGHT, 3000),
        buff_extend(1500, PLAYER, BOSS, MIGHT, 500),
        buff_remove_all(2000, BOSS, PLAYER, MIGHT),
        dead(5000, BOSS),
    ]);
    (log.finish(), boss, player)
}

#[test]
fn default_epsilon_is_server_delay() {
    let (model, _, _) = buff_log();
    assert_eq!(model.correlator().epsilon(), SERVER_DELAY_CONSTANT);
}

#[test]
fn related_events_are_strictly_inside_window() {
    let (model, boss, _) = buff_log();
    let store = model.store();

    let near: Vec<Time> = find_related(store.buffs_on(boss), 1000, 10)
        .iter()
        .map(|b| b.time)
        .collect();
    assert_eq!(near, vec![998]);

    let wide: Vec<Time> = find_related(store.buffs_on(boss), 1000, 100)
        .iter()
        .map(|b| b.time)
        .collect();
    // 900 sits exactly one epsilon away.
    assert_eq!(wide, vec![998]);
    assert!(find_related(store.buffs_on(boss), 1000, 0).is_empty());
}

#[test]
fn gained_buff_helpers() {
    let (model, boss, player) = buff_log();
    let correlator = model.correlator();

    assert!(correlator.has_gained_buff(MIGHT, boss, 1000));
    assert!(!correlator.has_gained_buff(STABILITY, boss, 1000));
    assert!(correlator.has_gained_buff_from(MIGHT, boss, 1000, player));
    assert!(!correlator.has_gained_buff_from(MIGHT, boss, 1000, boss));
    assert!(correlator.has_gained_buff_with_duration(MIGHT, boss, 1000, 3000));
    assert!(!correlator.has_gained_buff_with_duration(MIGHT, boss, 1000, 2000));
    assert!(correlator.has_gained_buff_from_with_duration(MIGHT, boss, 1000, 3000, player));
    assert!(correlator
        .with_epsilon(101)
        .has_gained_buff(STABILITY, boss, 1000));
}

#[test]
fn extension_and_loss_helpers() {
    let (model, boss, player) = buff_log();
    let correlator = model.correlator();

    assert!(correlator.has_extended_buff(MIGHT, boss, 1505));
    assert!(correlator.has_extended_buff_from(MIGHT, boss, 1505, player));
    assert!(correlator.has_extended_buff_with_duration(MIGHT, boss, 1505, 500));
    assert!(!correlator.has_extended_buff_with_duration(MIGHT, boss, 1505, 400));
    assert!(correlator.has_extended_buff_from_with_duration(MIGHT, boss, 1505, 500, player));
    assert!(!correlator.has_extended_buff(MIGHT, boss, 1000));

    assert!(correlator.has_lost_buff(MIGHT, boss, 2003));
    assert!(correlator.has_lost_buff_stack(MIGHT, boss, 2003));
    assert!(!correlator.has_lost_buff(MIGHT, boss, 1500));
}

#[test]
fn configured_epsilon_reaches_correlator() {
    let mut log = LogBuilder::new(MODERN_BUILD);
    let boss = log.npc(BOSS, 15000, "Boss");
    log.player(PLAYER, "Hero", ":Hero.1234");
    log.config(EngineConfig {
        server_delay_ms: 150,
        ..sequential_config()
    });
    log.records([
        spawn(0, BOSS),
        buff_apply(900, PLAYER, BOSS, STABILITY, 2000),
        dead(5000, BOSS),
    ]);
    let model = log.finish();

    assert_eq!(model.correlator().epsilon(), 150);
    assert!(model.correlator().has_gained_buff(STABILITY, boss, 1000));
}

#[test]
fn buff_removal_names_carrier_as_target() {
    let (model, boss, player) = buff_log();
    let removal = model
        .store()
        .buffs_on_with_id(boss, MIGHT)
        .iter()
        .find(|b| b.is_remove_all())
        .cloned()
        .expect("removal stored on carrier");
    assert_eq!(removal.dst, boss);
    assert_eq!(removal.src, player);
}
