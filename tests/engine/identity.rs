//! Identity resolution through the pipeline
//!
//! Merges, englobed sub-identities and master chains are installed by
//! post-processors and must be honored by every event the model stores.

use crate::common::*;
use evtc::{AgentData, AgentOverrides};

const PLAYER: u64 = 20;
const X: u64 = 30;
const Y: u64 = 40;

fn merge_log() -> (LogBuilder, AgentId, AgentId, AgentId) {
    let mut log = LogBuilder::new(MODERN_BUILD);
    let player = log.player(PLAYER, "Hero", ":Hero.1234");
    let x = log.npc(X, 100, "Shard");
    let y = log.npc(Y, 200, "Core");
    log.records([
        spawn(0, X),
        spawn(0, Y),
        hit(200, PLAYER, X, 1, 10),
        hit(500, PLAYER, X, 1, 20),
        hit(800, PLAYER, Y, 1, 30),
        state(StateChange::Despawn, 1000, X),
        hit(1500, PLAYER, X, 1, 40),
        dead(2000, Y),
    ]);
    (log, player, x, y)
}

fn merge_x_into_y(x: AgentId, y: AgentId) -> impl PostProcessor {
    move |agents: &mut AgentOverrides, _: &[CombatItem], _: &LogHeader| {
        agents.add_merge(x, y, 400, 1000)
    }
}

#[test]
fn resolve_follows_merges_inside_window() {
    let (log, _, x, y) = merge_log();
    let mut parser = log.parser().with_post_processor(merge_x_into_y(x, y));
    let model = parser.finish().unwrap();

    assert_eq!(model.resolve(X, 200), x);
    assert_eq!(model.resolve(X, 400), y);
    assert_eq!(model.resolve(X, 500), y);
    assert_eq!(model.resolve(X, 1000), y);
    assert_eq!(model.resolve(Y, 500), y);
}

#[test]
fn merged_events_are_stored_on_target() {
    let (log, _, x, y) = merge_log();
    let mut parser = log.parser().with_post_processor(merge_x_into_y(x, y));
    let model = parser.finish().unwrap();
    let store = model.store();

    let on_x: Vec<i32> = store
        .damage_taken(x)
        .iter()
        .map(|d| d.health_damage())
        .collect();
    let on_y: Vec<i32> = store
        .damage_taken(y)
        .iter()
        .map(|d| d.health_damage())
        .collect();
    // Outside the merge window X keeps its own events.
    assert_eq!(on_x, vec![10, 40]);
    assert_eq!(on_y, vec![20, 30]);
}

#[test]
fn resolve_is_idempotent_on_merge_target() {
    let (log, _, x, y) = merge_log();
    let mut parser = log.parser().with_post_processor(merge_x_into_y(x, y));
    let model = parser.finish().unwrap();
    let agents: &AgentData = model.agents();

    for time in [0, 200, 400, 700, 1000, 1500] {
        let once = agents.resolve(X, time);
        assert_eq!(agents.englobing_owner(once, time), once, "time {}", time);
    }
}

#[test]
fn unknown_address_resolves_to_sentinel() {
    let (log, _, _, _) = merge_log();
    let model = log.finish();

    let unknown = model.resolve(0xDEAD, 100);
    assert!(unknown.is_unknown());
    assert!(!unknown.is(unknown));
}

#[test]
fn self_merge_aborts_pipeline() {
    let (log, _, x, _) = merge_log();
    let self_merge = move |agents: &mut AgentOverrides, _: &[CombatItem], _: &LogHeader| {
        agents.add_merge(x, x, 0, 10)
    };
    let mut parser = log.parser().with_post_processor(self_merge);
    assert!(matches!(parser.finish(), Err(Error::InvalidOperation(_))));
}

#[test]
fn englobed_agent_sees_parent_events_in_window() {
    let (log, _, _, y) = merge_log();
    let carve = move |agents: &mut AgentOverrides, _: &[CombatItem], _: &LogHeader| {
        agents.add_englobed(y, 700, 2000).map(|_| ())
    };
    let mut parser = log.parser().with_post_processor(carve);
    let model = parser.finish().unwrap();

    let phase = model
        .agents()
        .englobed_children(y)
        .first()
        .copied()
        .expect("sub-identity created");
    let on_phase: Vec<i32> = model
        .store()
        .damage_taken(phase)
        .iter()
        .map(|d| d.health_damage())
        .collect();
    assert_eq!(on_phase, vec![30]);
    assert_eq!(model.store().damage_taken(y).len(), 1);
    assert!(model.agent(phase).unwrap().is_englobed());
}

#[test]
fn merge_into_englobed_agent_aborts_pipeline() {
    let (log, _, x, y) = merge_log();
    let carve_then_merge = move |agents: &mut AgentOverrides, _: &[CombatItem], _: &LogHeader| {
        let child = agents.add_englobed(y, 0, 2000)?;
        agents.add_merge(x, child, 400, 1000)
    };
    let mut parser = log.parser().with_post_processor(carve_then_merge);
    assert!(matches!(parser.finish(), Err(Error::InvalidOperation(_))));
}

#[test]
fn merged_events_reach_englobed_child_through_parent() {
    let (log, _, x, y) = merge_log();
    let carve_and_merge = move |agents: &mut AgentOverrides, _: &[CombatItem], _: &LogHeader| {
        agents.add_englobed(y, 0, 2000)?;
        agents.add_merge(x, y, 400, 1000)
    };
    let mut parser = log.parser().with_post_processor(carve_and_merge);
    let model = parser.finish().unwrap();

    let child = model.agents().englobed_children(y)[0];
    let on_child: Vec<i32> = model
        .store()
        .damage_taken(child)
        .iter()
        .map(|d| d.health_damage())
        .collect();
    assert_eq!(on_child, vec![20, 30]);
}

#[test]
fn minion_hits_count_for_master() {
    const PET: u64 = 50;
    let mut log = LogBuilder::new(MODERN_BUILD);
    let player = log.player(PLAYER, "Hero", ":Hero.1234");
    let boss = log.npc(Y, 200, "Core");
    let pet = log.npc(PET, 300, "Pet");
    log.records([spawn(0, Y), spawn(0, PET), hit(500, PET, Y, 77, 100), dead(900, Y)]);
    let tame = move |agents: &mut AgentOverrides, _: &[CombatItem], _: &LogHeader| {
        agents.set_master(pet, player)
    };
    let mut parser = log.parser().with_post_processor(tame);
    let model = parser.finish().unwrap();

    assert_eq!(model.agents().final_master(pet), player);
    assert!(model.agents().is_master_of(player, pet));
    let correlator = model.correlator();
    assert!(correlator.has_related_hit(77, player, 505));
    assert!(!correlator.has_related_hit(77, pet, 505));
    assert_eq!(model.store().damage_taken(boss).len(), 1);
}
