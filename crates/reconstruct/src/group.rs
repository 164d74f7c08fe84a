//! Grouping of records and fan-out of per-group work

use evtc_core::CombatItem;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Split `records` by `key`, keeping record order inside each group and
/// first-seen order across groups
pub(crate) fn group_by<'r, K, F>(records: &[&'r CombatItem], key: F) -> Vec<Vec<&'r CombatItem>>
where
    K: Hash + Eq,
    F: Fn(&CombatItem) -> K,
{
    let mut slots: FxHashMap<K, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<&'r CombatItem>> = Vec::new();
    for &record in records {
        let slot = *slots.entry(key(record)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(record);
    }
    groups
}

/// Run `f` on every group, on the rayon pool when `parallel` is set
///
/// Output order follows group order either way.
pub(crate) fn map_groups<G, T, F>(groups: Vec<G>, parallel: bool, f: F) -> Vec<T>
where
    G: Send,
    T: Send,
    F: Fn(G) -> Vec<T> + Sync + Send,
{
    if parallel {
        groups.into_par_iter().flat_map_iter(|g| f(g)).collect()
    } else {
        groups.into_iter().flat_map(|g| f(g)).collect()
    }
}
