use crate::ledger::VisitLedger;
use crate::models::Location;
use crate::paginator::{StampPage, StampPaginator};
use crate::storage::{KeyValueStore, MemoryStore, SELECTION_KEY};
use tracing::{info, warn};

/// Everything one user's passport needs, owned in one place.
///
/// Visit state changes go through [`VisitLedger`]; after each one the
/// paginator recomputes the current page so the stored page stays in range.
#[derive(Debug)]
pub struct Session {
    catalog: Vec<Location>,
    store: MemoryStore,
    ledger: VisitLedger,
    paginator: StampPaginator,
    selected_index: usize,
}

impl Session {
    pub fn new(catalog: Vec<Location>, mut store: MemoryStore, page_size: usize) -> Self {
        let mut ledger = VisitLedger::load(&store);
        ledger.migrate_legacy_keys(&catalog, &mut store);
        let paginator = StampPaginator::load(&store, page_size);
        let selected_index = load_selection(&store, catalog.len());

        let mut session = Self {
            catalog,
            store,
            ledger,
            paginator,
            selected_index,
        };
        session.refresh_stamps();
        info!(
            pools = session.catalog.len(),
            visited = session.ledger.count(),
            page = session.paginator.current_page(),
            "session ready"
        );
        session
    }

    pub fn catalog(&self) -> &[Location] {
        &self.catalog
    }

    pub fn ledger(&self) -> &VisitLedger {
        &self.ledger
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// True while the store holds writes not yet saved to disk.
    pub fn needs_save(&self) -> bool {
        self.store.is_dirty()
    }

    /// Call once the store has been written out successfully.
    pub fn mark_saved(&mut self) {
        self.store.take_dirty();
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.catalog.iter().find(|location| location.id == id)
    }

    /// Visited pools in the catalog, and the catalog size.
    pub fn visited_summary(&self) -> (usize, usize) {
        let visited = self
            .catalog
            .iter()
            .filter(|location| self.ledger.is_visited(&location.id))
            .count();
        (visited, self.catalog.len())
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&Location> {
        self.catalog.get(self.selected_index)
    }

    pub fn select_index(&mut self, index: i64) -> Option<&Location> {
        let len = i64::try_from(self.catalog.len()).ok().filter(|len| *len > 0)?;
        self.selected_index = index.rem_euclid(len) as usize;
        self.store
            .set(SELECTION_KEY, self.selected_index.to_string());
        self.selected()
    }

    pub fn move_selection(&mut self, step: i64) -> Option<&Location> {
        let next = (self.selected_index as i64).saturating_add(step);
        self.select_index(next)
    }

    pub fn toggle_stamp(&mut self, id: &str, today: &str) -> bool {
        let visited = self.ledger.toggle(id, today, &mut self.store);
        self.refresh_stamps();
        visited
    }

    /// Returns false, touching nothing, when `date` is blank.
    pub fn set_stamp_date(&mut self, id: &str, date: &str) -> bool {
        if !self.ledger.set_date(id, date, &mut self.store) {
            return false;
        }
        self.refresh_stamps();
        true
    }

    pub fn reset_stamps(&mut self) {
        self.ledger.clear(&mut self.store);
        self.refresh_stamps();
    }

    pub fn open_stamps_page(&mut self, requested: i64) -> usize {
        self.paginator
            .get_page(&self.catalog, &self.ledger, requested, &mut self.store)
            .page
    }

    pub fn change_stamps_page(&mut self, delta: i64) -> usize {
        self.paginator
            .change_page(&self.catalog, &self.ledger, delta, &mut self.store)
            .page
    }

    /// The current passport page, as last clamped.
    pub fn stamps(&self) -> StampPage<'_> {
        self.paginator.view(&self.catalog, &self.ledger)
    }

    fn refresh_stamps(&mut self) {
        let current = self.paginator.current_page() as i64;
        self.open_stamps_page(current);
    }
}

fn load_selection(store: &impl KeyValueStore, len: usize) -> usize {
    let Some(raw) = store.get(SELECTION_KEY) else {
        return 0;
    };
    match raw.trim().parse::<usize>() {
        Ok(index) if index < len => index,
        _ => {
            warn!("resetting stored selection {raw:?}");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use crate::storage::{STAMPS_PAGE_KEY, VISITED_KEY};

    fn pools(ids: &[&str]) -> Vec<Location> {
        ids.iter()
            .enumerate()
            .map(|(n, id)| Location {
                id: id.to_string(),
                name: format!("Pool {n}"),
                coordinates: Coordinates {
                    lat: -33.0 - n as f64 / 10.0,
                    lng: 151.0,
                },
                stamp: None,
                area: None,
            })
            .collect()
    }

    fn stamp_ids(session: &Session) -> Vec<String> {
        session
            .stamps()
            .items
            .iter()
            .map(|location| location.id.clone())
            .collect()
    }

    #[test]
    fn unmarking_last_stamp_on_last_page_pulls_page_back() {
        let mut session = Session::new(pools(&["a", "b", "c"]), MemoryStore::new(), 2);
        session.toggle_stamp("a", "2024-01-01");
        session.toggle_stamp("b", "2024-01-02");
        session.toggle_stamp("c", "2024-01-03");
        assert_eq!(session.open_stamps_page(1), 1);
        assert_eq!(stamp_ids(&session), ["c"]);

        session.toggle_stamp("c", "2024-01-04");
        let page = session.stamps();
        assert_eq!((page.page, page.total_pages), (0, 1));
        assert_eq!(session.store().get(STAMPS_PAGE_KEY).as_deref(), Some("0"));
        assert_eq!(stamp_ids(&session), ["a", "b"]);
    }

    #[test]
    fn stored_page_is_clamped_at_startup() {
        let mut store = MemoryStore::new();
        store.set(
            VISITED_KEY,
            r#"{"a":{"done":true,"date":"2024-01-01"}}"#.to_string(),
        );
        store.set(STAMPS_PAGE_KEY, "9".to_string());

        let session = Session::new(pools(&["a", "b"]), store, 3);
        assert_eq!(session.stamps().page, 0);
        assert_eq!(session.store().get(STAMPS_PAGE_KEY).as_deref(), Some("0"));
    }

    #[test]
    fn blank_date_edit_writes_nothing() {
        let mut session = Session::new(pools(&["a"]), MemoryStore::new(), 3);
        session.mark_saved();

        assert!(!session.set_stamp_date("a", "  "));
        assert!(!session.needs_save());
        assert!(!session.ledger().is_visited("a"));
    }

    #[test]
    fn date_edit_reorders_passport() {
        let mut session = Session::new(pools(&["a", "b"]), MemoryStore::new(), 3);
        session.toggle_stamp("a", "2024-06-01");
        session.toggle_stamp("b", "2024-06-02");
        assert_eq!(stamp_ids(&session), ["a", "b"]);

        assert!(session.set_stamp_date("a", "2024-07-01"));
        assert_eq!(stamp_ids(&session), ["b", "a"]);
    }

    #[test]
    fn selection_wraps_and_persists() {
        let mut session = Session::new(pools(&["a", "b", "c"]), MemoryStore::new(), 3);
        assert_eq!(session.move_selection(-1).map(|l| l.id.as_str()), Some("c"));
        assert_eq!(session.move_selection(2).map(|l| l.id.as_str()), Some("b"));
        assert_eq!(session.select_index(7).map(|l| l.id.as_str()), Some("b"));
        assert_eq!(session.store().get(SELECTION_KEY).as_deref(), Some("1"));
    }

    #[test]
    fn unsaved_changes_stay_pending_until_marked_saved() {
        let mut session = Session::new(pools(&["a"]), MemoryStore::new(), 3);
        session.mark_saved();

        session.toggle_stamp("a", "2024-01-01");
        assert!(session.needs_save());
        assert!(session.needs_save());

        session.mark_saved();
        assert!(!session.needs_save());
    }

    #[test]
    fn out_of_range_stored_selection_resets() {
        let mut store = MemoryStore::new();
        store.set(SELECTION_KEY, "12".to_string());
        let session = Session::new(pools(&["a", "b"]), store, 3);
        assert_eq!(session.selected_index(), 0);
    }

    #[test]
    fn summary_counts_only_catalog_pools() {
        let mut session = Session::new(pools(&["a", "b"]), MemoryStore::new(), 3);
        session.toggle_stamp("a", "2024-01-01");
        session.toggle_stamp("zzz", "2024-01-01");
        assert_eq!(session.visited_summary(), (1, 2));
        assert_eq!(session.ledger().count(), 2);
        assert_eq!(stamp_ids(&session), ["a"]);
    }

    #[test]
    fn reset_clears_passport() {
        let mut session = Session::new(pools(&["a", "b", "c", "d"]), MemoryStore::new(), 1);
        for id in ["a", "b", "c", "d"] {
            session.toggle_stamp(id, "2024-01-01");
        }
        session.change_stamps_page(3);
        assert_eq!(session.stamps().page, 3);

        session.reset_stamps();
        let page = session.stamps();
        assert!(page.items.is_empty());
        assert_eq!((page.page, page.total_pages), (0, 1));
    }
}
