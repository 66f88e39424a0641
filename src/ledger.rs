use crate::models::{Location, VisitRecord};
use crate::storage::{KeyValueStore, VISITED_KEY};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Which pools have been visited, and when. Keyed by `Location::id`.
///
/// Every mutation writes the whole mapping back to the store before returning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitLedger {
    records: BTreeMap<String, VisitRecord>,
}

impl VisitLedger {
    /// Reads the ledger blob. An absent or unreadable blob yields an empty ledger.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(raw) = store.get(VISITED_KEY) else {
            return Self::default();
        };

        match serde_json::from_str::<BTreeMap<String, VisitRecord>>(&raw) {
            Ok(mut records) => {
                records.retain(|_, record| record.done);
                Self { records }
            }
            Err(err) => {
                warn!("discarding unreadable visit ledger: {err}");
                Self::default()
            }
        }
    }

    pub fn is_visited(&self, id: &str) -> bool {
        self.record(id).is_some()
    }

    pub fn record(&self, id: &str) -> Option<&VisitRecord> {
        self.records.get(id).filter(|record| record.done)
    }

    /// Visit date used for ordering; unvisited or undated ids sort as "".
    pub fn date_of(&self, id: &str) -> &str {
        self.record(id).map_or("", |record| record.date.as_str())
    }

    pub fn count(&self) -> usize {
        self.records.values().filter(|record| record.done).count()
    }

    /// Flips the visit state of `id`. Returns true if it is now visited.
    pub fn toggle(&mut self, id: &str, today: &str, store: &mut impl KeyValueStore) -> bool {
        let now_visited = if self.is_visited(id) {
            self.records.remove(id);
            false
        } else {
            self.records
                .insert(id.to_string(), VisitRecord::visited_on(today));
            true
        };
        debug!(id, now_visited, "toggled visit");
        self.persist(store);
        now_visited
    }

    /// Stores `date` for `id`, marking it visited. Blank dates change nothing.
    pub fn set_date(&mut self, id: &str, date: &str, store: &mut impl KeyValueStore) -> bool {
        let trimmed = date.trim();
        if trimmed.is_empty() {
            return false;
        }

        self.records
            .insert(id.to_string(), VisitRecord::visited_on(trimmed));
        debug!(id, date = trimmed, "set visit date");
        self.persist(store);
        true
    }

    pub fn clear(&mut self, store: &mut impl KeyValueStore) {
        self.records.clear();
        self.persist(store);
    }

    /// Re-keys records stored under a pool's name onto its id.
    ///
    /// A record already stored under the id is kept and the name-keyed one dropped.
    pub fn migrate_legacy_keys(&mut self, catalog: &[Location], store: &mut impl KeyValueStore) {
        let mut moved = 0usize;
        for location in catalog {
            if location.name == location.id || catalog.iter().any(|l| l.id == location.name) {
                continue;
            }
            let Some(record) = self.records.remove(&location.name) else {
                continue;
            };
            self.records.entry(location.id.clone()).or_insert(record);
            moved += 1;
        }

        if moved > 0 {
            warn!(moved, "migrated name-keyed visit records to pool ids");
            self.persist(store);
        }
    }

    fn persist(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(&self.records) {
            Ok(blob) => store.set(VISITED_KEY, blob),
            // A map of plain strings always serializes.
            Err(err) => warn!("failed to encode visit ledger: {err}"),
        }
    }
}
