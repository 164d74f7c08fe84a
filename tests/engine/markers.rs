//! Agent marker pairing under both marker protocols

use crate::common::*;

const BOSS: u64 = 10;

fn spans(model: &LogModel, owner: AgentId) -> Vec<(u32, Time, Time)> {
    model
        .store()
        .markers_of(owner)
        .iter()
        .map(|m| (m.marker_id, m.time, m.end_time))
        .collect()
}

fn marker_log(build: u64, markers: &[(Time, i32)]) -> (LogBuilder, AgentId) {
    let mut log = LogBuilder::new(build);
    let boss = log.npc(BOSS, 15000, "Boss");
    log.record(spawn(0, BOSS));
    log.records(markers.iter().map(|&(time, id)| marker(time, BOSS, id)));
    log.record(dead(400, BOSS));
    (log, boss)
}

#[test]
fn modern_restart_reopens_marker() {
    let (log, boss) = marker_log(MODERN_BUILD, &[(100, 7), (150, 7), (300, 0)]);
    let model = log.finish();
    assert_eq!(spans(&model, boss), vec![(7, 100, 150), (7, 150, 300)]);
}

#[test]
fn legacy_restart_extends_marker() {
    let (log, boss) = marker_log(LEGACY_BUILD, &[(100, 7), (150, 7), (300, 0)]);
    let model = log.finish();
    assert_eq!(spans(&model, boss), vec![(7, 100, 300)]);
}

#[test]
fn modern_end_closes_every_open_marker() {
    let (log, boss) = marker_log(MODERN_BUILD, &[(100, 5), (120, 6), (200, 0)]);
    let model = log.finish();
    assert_eq!(spans(&model, boss), vec![(5, 100, 200), (6, 120, 200)]);
}

#[test]
fn legacy_new_id_replaces_marker() {
    let (log, boss) = marker_log(LEGACY_BUILD, &[(100, 5), (120, 6), (200, 0)]);
    let model = log.finish();
    assert_eq!(spans(&model, boss), vec![(5, 100, 120), (6, 120, 200)]);
}

#[test]
fn open_marker_ends_at_log_end() {
    let (log, boss) = marker_log(MODERN_BUILD, &[(350, 3)]);
    let model = log.finish();
    assert_eq!(spans(&model, boss), vec![(3, 350, 400)]);
}

#[test]
fn configured_protocol_overrides_build() {
    let (mut log, boss) = marker_log(MODERN_BUILD, &[(100, 7), (150, 7), (300, 0)]);
    log.config(EngineConfig {
        marker_protocol: "legacy".to_string(),
        ..sequential_config()
    });
    let model = log.finish();
    assert_eq!(spans(&model, boss), vec![(7, 100, 300)]);
}

#[test]
fn commander_tag_and_id_queries() {
    let (mut log, boss) = marker_log(MODERN_BUILD, &[(100, 7), (300, 0)]);
    log.record(CombatItem {
        buff: 1,
        ..marker(320, BOSS, 9)
    });
    let model = log.finish();
    let store = model.store();

    assert_eq!(store.markers_with_id(7).len(), 1);
    assert_eq!(store.markers_of_with_id(boss, 9).len(), 1);
    let tag = store.markers_of_with_id(boss, 9).first().unwrap();
    assert!(tag.commander_tag);
    assert_eq!(tag.end_time, 400);
}
