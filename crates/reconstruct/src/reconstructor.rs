//! Full reconstruction pass over a log's records

use crate::casts::reconstruct_casts;
use crate::context::ResolutionContext;
use crate::dispatch::{collect_metadata, convert, SingleEvent};
use crate::effects::reconstruct_effects;
use crate::info::InfoTables;
use crate::markers::reconstruct_markers;
use crate::missiles::reconstruct_missiles;
use crate::squad_markers::reconstruct_squad_markers;
use evtc_core::events::{
    BuffEvent, CastEvent, DamageEvent, EffectEvent, LogMetadata, MarkerEvent, MissileEvent,
    SquadMarkerEvent, StatusEvent,
};
use evtc_core::{CombatItem, StateChange};
use rayon::prelude::*;
use tracing::info;

/// Every reconstructed event of a log, one collection per category
#[derive(Debug, Clone, Default)]
pub struct EventSet {
    pub status: Vec<StatusEvent>,
    pub buffs: Vec<BuffEvent>,
    pub damage: Vec<DamageEvent>,
    pub casts: Vec<CastEvent>,
    pub markers: Vec<MarkerEvent>,
    pub squad_markers: Vec<SquadMarkerEvent>,
    pub missiles: Vec<MissileEvent>,
    pub effects: Vec<EffectEvent>,
    pub info: InfoTables,
    pub metadata: LogMetadata,
}

/// Records routed to the paired reconstructors
#[derive(Default)]
struct Buckets<'r> {
    casts: Vec<&'r CombatItem>,
    markers: Vec<&'r CombatItem>,
    squad_markers: Vec<&'r CombatItem>,
    missiles: Vec<&'r CombatItem>,
    effects: Vec<&'r CombatItem>,
    info: Vec<&'r CombatItem>,
}

impl<'r> Buckets<'r> {
    fn split(records: &'r [CombatItem]) -> Self {
        let mut buckets = Buckets::default();
        for record in records {
            match record.state_change() {
                StateChange::None => {
                    if record.activation().starts_casting() || record.activation().ends_casting() {
                        buckets.casts.push(record);
                    }
                }
                StateChange::Marker => buckets.markers.push(record),
                StateChange::SquadMarker => buckets.squad_markers.push(record),
                StateChange::MissileCreate
                | StateChange::MissileLaunch
                | StateChange::MissileRemove => buckets.missiles.push(record),
                StateChange::EffectGroundCreate
                | StateChange::EffectGroundRemove
                | StateChange::EffectAgentCreate
                | StateChange::EffectAgentRemove => buckets.effects.push(record),
                StateChange::BuffInfo
                | StateChange::BuffFormula
                | StateChange::SkillInfo
                | StateChange::SkillTiming => buckets.info.push(record),
                _ => {}
            }
        }
        buckets
    }
}

/// Runs every reconstruction pass against one frozen context
pub struct Reconstructor<'a> {
    ctx: ResolutionContext<'a>,
}

impl<'a> Reconstructor<'a> {
    pub fn new(ctx: ResolutionContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ResolutionContext<'a> {
        &self.ctx
    }

    /// Reconstruct every event category from the time-ordered records
    pub fn run(&self, records: &[CombatItem]) -> EventSet {
        let ctx = &self.ctx;
        let buckets = Buckets::split(records);

        let singles: Vec<SingleEvent> = if ctx.parallel {
            records.par_iter().filter_map(|r| convert(ctx, r)).collect()
        } else {
            records.iter().filter_map(|r| convert(ctx, r)).collect()
        };
        let mut set = EventSet::default();
        for event in singles {
            match event {
                SingleEvent::Status(e) => set.status.push(e),
                SingleEvent::Buff(e) => set.buffs.push(e),
                SingleEvent::Damage(e) => set.damage.push(e),
            }
        }

        set.casts = reconstruct_casts(ctx, &buckets.casts);
        set.markers = reconstruct_markers(ctx, &buckets.markers);
        set.squad_markers = reconstruct_squad_markers(ctx, &buckets.squad_markers);
        set.missiles = reconstruct_missiles(ctx, &buckets.missiles);
        set.effects = reconstruct_effects(ctx, &buckets.effects);
        set.info = InfoTables::from_records(&buckets.info);
        set.metadata = collect_metadata(ctx, records);

        info!(
            target: "evtc::reconstruct",
            records = records.len(),
            status = set.status.len(),
            buffs = set.buffs.len(),
            damage = set.damage.len(),
            casts = set.casts.len(),
            markers = set.markers.len(),
            missiles = set.missiles.len(),
            effects = set.effects.len(),
            "Reconstruction complete"
        );
        set
    }
}
