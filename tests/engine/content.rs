//! Per-log content id to GUID mapping

use crate::common::*;

const PLAYER: u64 = 20;
const BOSS: u64 = 10;

const SHOCKWAVE: &str = "7a3d5b1e-2c44-4d8a-9f0e-6b1c2d3e4f50";
const PULSE: &str = "0f1e2d3c-4b5a-6978-8796-a5b4c3d2e1f0";

fn content_log(build: u64, mappings: &[(u32, &str)]) -> LogBuilder {
    let mut log = LogBuilder::new(build);
    log.npc(BOSS, 15000, "Boss");
    log.player(PLAYER, "Hero", ":Hero.1234");
    log.records(
        mappings
            .iter()
            .map(|&(id, hex)| id_to_guid(ContentCategory::Effect, id, guid(hex))),
    );
    log.records([spawn(0, BOSS), dead(1000, BOSS)]);
    log
}

#[test]
fn guid_round_trips_through_model() {
    let model = content_log(MODERN_BUILD, &[(55, SHOCKWAVE)]).finish();

    assert_eq!(model.effect_id(guid(SHOCKWAVE)), Some(55));
    assert_eq!(
        model
            .content()
            .resolve_by_id(ContentCategory::Effect, 55),
        Some(guid(SHOCKWAVE))
    );
    assert_eq!(model.effect_id(guid(PULSE)), None);
    assert_eq!(model.marker_id(guid(SHOCKWAVE)), None);
}

#[test]
fn reassigned_id_keeps_last_guid() {
    let model = content_log(MODERN_BUILD, &[(55, SHOCKWAVE), (55, PULSE)]).finish();

    assert_eq!(
        model
            .content()
            .resolve_by_id(ContentCategory::Effect, 55),
        Some(guid(PULSE))
    );
    assert_eq!(model.effect_id(guid(PULSE)), Some(55));
}

#[test]
fn mappings_ignored_before_functional_build() {
    let model = content_log(LEGACY_BUILD, &[(55, SHOCKWAVE)]).finish();

    assert!(model.content().is_empty());
    assert_eq!(model.effect_id(guid(SHOCKWAVE)), None);
}

#[test]
fn mapping_records_do_not_stretch_bounds() {
    let mut log = content_log(MODERN_BUILD, &[]);
    log.record(CombatItem {
        time: 50_000,
        ..id_to_guid(ContentCategory::Marker, 3, guid(PULSE))
    });
    let model = log.finish();

    assert_eq!(model.log_end(), 1000);
    assert_eq!(model.marker_id(guid(PULSE)), Some(3));
}

#[test]
fn effects_are_found_by_guid() {
    let mut log = content_log(MODERN_BUILD, &[(55, SHOCKWAVE)]);
    log.records([
        effect_agent_create(500, PLAYER, BOSS, 55, 1, 100),
        effect_agent_create(505, PLAYER, BOSS, 55, 2, 100),
        effect_agent_create(800, PLAYER, BOSS, 55, 3, 100),
    ]);
    let model = log.finish();
    let player = model.resolve(PLAYER, 500);
    let boss = model.resolve(BOSS, 500);
    let correlator = model.correlator();

    assert!(correlator.has_related_effect(guid(SHOCKWAVE), player, 503));
    assert!(correlator.has_related_effect_dst(guid(SHOCKWAVE), boss, 503));
    assert!(!correlator.has_related_effect(guid(PULSE), player, 503));
    assert_eq!(correlator.effects_by_master_with_guid(player, guid(SHOCKWAVE)).len(), 3);

    let windows: Vec<usize> = correlator
        .grouped_effects_by_guid(guid(SHOCKWAVE))
        .iter()
        .map(Vec::len)
        .collect();
    assert_eq!(windows, vec![2, 1]);
    assert_eq!(
        correlator
            .grouped_effects_by_src_with_guid(player, guid(SHOCKWAVE))
            .len(),
        2
    );
}

#[test]
fn reconstructed_events_carry_registered_guids() {
    let mut log = content_log(MODERN_BUILD, &[(55, SHOCKWAVE)]);
    log.records([
        id_to_guid(ContentCategory::Marker, 3, guid(PULSE)),
        effect_agent_create(500, PLAYER, BOSS, 55, 1, 100),
        effect_agent_create(600, PLAYER, BOSS, 56, 2, 100),
        marker(300, BOSS, 3),
        marker(400, BOSS, 0),
    ]);
    let model = log.finish();
    let player = model.resolve(PLAYER, 500);
    let boss = model.resolve(BOSS, 300);

    let guids: Vec<Option<ContentGuid>> = model
        .store()
        .effects_by(player)
        .iter()
        .map(|e| e.guid)
        .collect();
    assert_eq!(guids, vec![Some(guid(SHOCKWAVE)), None]);

    let markers = model.store().markers_of(boss).to_vec();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].guid, Some(guid(PULSE)));
}
