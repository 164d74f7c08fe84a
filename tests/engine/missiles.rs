//! Missile and effect lifetimes keyed by tracking id

use crate::common::*;
use evtc::core::SpanEvent;

const BOSS: u64 = 10;
const PLAYER: u64 = 20;

fn arena() -> (LogBuilder, AgentId, AgentId) {
    let mut log = LogBuilder::new(MODERN_BUILD);
    let boss = log.npc(BOSS, 15000, "Boss");
    let player = log.player(PLAYER, "Hero", ":Hero.1234");
    log.records([spawn(0, BOSS), spawn(0, PLAYER), dead(400, BOSS)]);
    (log, boss, player)
}

#[test]
fn missile_lifecycle() {
    let (mut log, boss, player) = arena();
    log.records([
        missile_create(100, PLAYER, 50, 9),
        missile_launch(110, PLAYER, BOSS, 9),
        missile_remove(200, PLAYER, 9, BOSS),
    ]);
    let model = log.finish();
    let store = model.store();

    let fired = store.missiles_by(player).to_vec();
    assert_eq!(fired.len(), 1);
    let missile = fired[0];
    assert_eq!(missile.skill_id, 50);
    assert_eq!(missile.end_time(), 200);
    assert!(missile.did_hit());
    assert_eq!(missile.targets().collect::<Vec<_>>(), vec![boss]);
    assert_eq!(store.missiles_hitting(boss).len(), 1);
    assert_eq!(store.missiles_with_skill(50).len(), 1);
}

#[test]
fn missile_targets_extend_aware_window() {
    const ADD: u64 = 30;
    let (mut log, _, _) = arena();
    let add = log.npc(ADD, 500, "Add");
    log.records([
        spawn(50, ADD),
        missile_create(300, PLAYER, 50, 4),
        missile_launch(350, PLAYER, ADD, 4),
        missile_remove(360, PLAYER, 4, ADD),
    ]);
    let model = log.finish();

    let item = model.agent(add).unwrap();
    assert_eq!((item.first_aware(), item.last_aware()), (50, 360));
    let missile = model.store().missiles_hitting(add).to_vec();
    assert_eq!(missile.len(), 1);
    assert_eq!(missile[0].targets().collect::<Vec<_>>(), vec![add]);
}

#[test]
fn remove_with_unknown_token_is_dropped() {
    let (mut log, _, player) = arena();
    log.records([
        missile_create(100, PLAYER, 50, 9),
        missile_remove(250, PLAYER, 77, 0),
    ]);
    let model = log.finish();

    let fired = model.store().missiles_by(player).to_vec();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].tracking_id, 9);
    assert!(fired[0].removal.is_none());
    assert_eq!(fired[0].end_time(), model.log_end());
}

#[test]
fn missed_missile_has_no_target() {
    let (mut log, boss, _) = arena();
    log.records([
        missile_create(100, PLAYER, 50, 9),
        missile_remove(150, PLAYER, 9, 0),
    ]);
    let model = log.finish();

    let missile = model.store().missiles().as_slice()[0].clone();
    assert!(!missile.did_hit());
    assert_eq!(missile.end_time(), 150);
    assert!(model.store().missiles_hitting(boss).is_empty());
}

#[test]
fn agent_effect_closed_by_remove() {
    let (mut log, boss, player) = arena();
    log.records([
        effect_agent_create(100, PLAYER, BOSS, 55, 3, 0),
        effect_agent_remove(180, PLAYER, 3),
        effect_agent_create(200, PLAYER, BOSS, 55, 4, 50),
    ]);
    let model = log.finish();
    let store = model.store();

    let spans: Vec<(Time, Time)> = store
        .effects_on_with_id(boss, 55)
        .iter()
        .map(|e| (e.time, e.end_time))
        .collect();
    assert_eq!(spans, vec![(100, 180), (200, 250)]);
    assert_eq!(store.effects_by(player).len(), 2);
    assert_eq!(store.effects_with_id(55).first().unwrap().dst(), Some(boss));
}
