//! Property tests over randomly generated logs
//!
//! Each property builds whole logs through the pipeline, so these double as
//! a fuzz of record ordering and pairing.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use evtc::core::SpanEvent;
use evtc::AgentOverrides;
use proptest::prelude::*;

const BOSS: u64 = 10;
const PLAYER: u64 = 20;

fn activation_kind() -> impl Strategy<Value = Activation> {
    prop_oneof![
        Just(Activation::Normal),
        Just(Activation::Quickness),
        Just(Activation::Reset),
        Just(Activation::CancelFire),
        Just(Activation::CancelCancel),
    ]
}

fn activations() -> impl Strategy<Value = Vec<(Time, u32, Activation, i32)>> {
    prop::collection::vec((1..5000i64, 1..4u32, activation_kind(), 0..1500i32), 0..60)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn casts_never_end_before_start_or_overlap(
        records in activations(),
        keep_truncated in any::<bool>(),
    ) {
        let mut log = LogBuilder::new(MODERN_BUILD);
        let boss = log.npc(BOSS, 15000, "Boss");
        log.config(EngineConfig { keep_truncated_casts: keep_truncated, ..sequential_config() });
        log.records([spawn(0, BOSS), dead(6000, BOSS)]);
        log.records(records.iter().map(|&(t, skill, kind, value)| activation(t, BOSS, skill, kind, value)));
        let model = log.finish();

        let casts = model.store().casts_of(boss).to_vec();
        for cast in &casts {
            prop_assert!(cast.end_time() >= cast.time);
            prop_assert!(cast.time >= model.log_start());
            prop_assert!(keep_truncated || !cast.truncated);
        }
        for pair in casts.windows(2) {
            prop_assert!(pair[0].time <= pair[1].time);
            prop_assert!(pair[0].end_time <= pair[1].time);
        }
    }

    #[test]
    fn markers_never_end_before_start(
        ids in prop::collection::vec((1..3000i64, 0..4i32), 0..40),
        modern in any::<bool>(),
    ) {
        let build = if modern { MODERN_BUILD } else { LEGACY_BUILD };
        let mut log = LogBuilder::new(build);
        let boss = log.npc(BOSS, 15000, "Boss");
        log.records([spawn(0, BOSS), dead(4000, BOSS)]);
        log.records(ids.iter().map(|&(t, id)| marker(t, BOSS, id)));
        let model = log.finish();

        for m in model.store().markers_of(boss) {
            prop_assert!(m.marker_id != 0);
            prop_assert!(m.end_time >= m.time);
            prop_assert!(m.end_time <= model.log_end());
        }
    }

    #[test]
    fn resolve_is_idempotent(
        start in 0..2000i64,
        len in 0..2000i64,
        probes in prop::collection::vec(0..5000i64, 1..20),
    ) {
        let mut log = LogBuilder::new(MODERN_BUILD);
        let x = log.npc(30, 100, "Shard");
        let y = log.npc(40, 200, "Core");
        log.records([spawn(0, 30), spawn(0, 40), dead(5000, 30), dead(5000, 40)]);
        let merge = move |agents: &mut AgentOverrides, _: &[CombatItem], _: &LogHeader| {
            agents.add_merge(x, y, start, start + len)
        };
        let model = log.parser().with_post_processor(merge).finish().unwrap();
        let agents = model.agents();

        for t in probes {
            let resolved = agents.resolve(30, t);
            prop_assert_eq!(agents.englobing_owner(resolved, t), resolved);
            let expected = if start <= t && t <= start + len { y } else { x };
            prop_assert_eq!(resolved, expected);
        }
    }

    #[test]
    fn guid_mapping_round_trips(bytes in any::<[u8; 16]>(), id in 1..u32::MAX) {
        let guid = ContentGuid::from_bytes(bytes);
        let mut log = LogBuilder::new(MODERN_BUILD);
        log.record(id_to_guid(ContentCategory::Effect, id, guid));
        let model = log.finish();

        prop_assert_eq!(model.content().resolve_by_id(ContentCategory::Effect, id), Some(guid));
        prop_assert_eq!(model.effect_id(guid), Some(id));
    }

    #[test]
    fn removes_with_unknown_tokens_change_nothing(
        tokens in prop::collection::btree_set(1..1000u32, 1..10),
        stray in 1000..2000u32,
    ) {
        let mut log = LogBuilder::new(MODERN_BUILD);
        let player = log.player(PLAYER, "Hero", ":Hero.1234");
        log.records([spawn(0, PLAYER), dead(3000, PLAYER)]);
        log.records(tokens.iter().enumerate().map(|(i, &token)| {
            missile_create(100 + i as Time, PLAYER, 50, token)
        }));
        log.record(missile_remove(2000, PLAYER, stray, 0));
        let model = log.finish();

        let missiles = model.store().missiles_by(player).to_vec();
        prop_assert_eq!(missiles.len(), tokens.len());
        for missile in missiles {
            prop_assert!(missile.removal.is_none());
            prop_assert_eq!(missile.end_time(), model.log_end());
        }
    }

    #[test]
    fn related_window_matches_linear_scan(
        times in prop::collection::vec(0..1000i64, 0..50),
        at in 0..1000i64,
        epsilon in 0..100i64,
    ) {
        let mut log = LogBuilder::new(MODERN_BUILD);
        let boss = log.npc(BOSS, 15000, "Boss");
        log.player(PLAYER, "Hero", ":Hero.1234");
        log.records(times.iter().map(|&t| hit(t, PLAYER, BOSS, 1, 1)));
        let model = log.finish();

        let mut expected: Vec<Time> = times
            .iter()
            .copied()
            .filter(|&t| (t - at).abs() < epsilon)
            .collect();
        expected.sort_unstable();
        let found: Vec<Time> = evtc::find_related(model.store().damage_taken(boss), at, epsilon)
            .iter()
            .map(|d| d.time)
            .collect();
        prop_assert_eq!(found, expected);
    }
}
