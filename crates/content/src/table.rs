//! Two-way id/GUID table per content category

use evtc_core::{CombatItem, ContentCategory, ContentGuid, LogHeader, StateChange};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Mutable table, filled by a full pass over the records
///
/// Registration is last-write-wins in both directions: a numeric id reused
/// for a different content item maps to the newest GUID, while every GUID
/// keeps resolving to the id it was registered with.
#[derive(Debug, Clone, Default)]
pub struct ContentTableBuilder {
    guid_by_id: FxHashMap<(ContentCategory, u32), ContentGuid>,
    id_by_guid: FxHashMap<(ContentCategory, ContentGuid), u32>,
    ignored: usize,
}

impl ContentTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` stands for `guid` in `category`
    pub fn register(&mut self, category: ContentCategory, id: u32, guid: ContentGuid) {
        if let Some(previous) = self.guid_by_id.insert((category, id), guid) {
            if previous != guid {
                debug!(
                    target: "evtc::content",
                    ?category,
                    id,
                    %previous,
                    %guid,
                    "Content id reassigned"
                );
            }
        }
        self.id_by_guid.insert((category, guid), id);
    }

    /// Register the mapping carried by an id-to-GUID record
    ///
    /// Any other record is ignored, as are mapping records from builds
    /// where they were not yet functional or with an unknown category.
    pub fn observe(&mut self, record: &CombatItem, header: &LogHeader) {
        if record.state_change() != StateChange::IdToGuid {
            return;
        }
        if !header.has_functional_guids() {
            self.ignored += 1;
            return;
        }
        match ContentCategory::from_raw(record.overstack_value) {
            Some(category) => {
                let guid = ContentGuid::from_halves(record.src_agent, record.dst_agent);
                self.register(category, record.skill_id, guid);
            }
            None => self.ignored += 1,
        }
    }

    /// Freeze the table
    pub fn build(self) -> ContentTable {
        debug!(
            target: "evtc::content",
            entries = self.guid_by_id.len(),
            ignored = self.ignored,
            "Content table frozen"
        );
        ContentTable {
            guid_by_id: self.guid_by_id,
            id_by_guid: self.id_by_guid,
        }
    }
}

/// Frozen id/GUID table
#[derive(Debug, Clone, Default)]
pub struct ContentTable {
    guid_by_id: FxHashMap<(ContentCategory, u32), ContentGuid>,
    id_by_guid: FxHashMap<(ContentCategory, ContentGuid), u32>,
}

impl ContentTable {
    /// Build the table from every record of the log
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a CombatItem>,
        header: &LogHeader,
    ) -> ContentTable {
        let mut builder = ContentTableBuilder::new();
        for record in records {
            builder.observe(record, header);
        }
        builder.build()
    }

    /// Numeric id currently standing for `guid`
    pub fn resolve_by_guid(&self, category: ContentCategory, guid: ContentGuid) -> Option<u32> {
        self.id_by_guid.get(&(category, guid)).copied()
    }

    /// GUID the numeric id was last registered with
    pub fn resolve_by_id(&self, category: ContentCategory, id: u32) -> Option<ContentGuid> {
        self.guid_by_id.get(&(category, id)).copied()
    }

    /// Number of registered ids across all categories
    pub fn len(&self) -> usize {
        self.guid_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guid_by_id.is_empty()
    }
}
