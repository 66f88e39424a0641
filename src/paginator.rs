use crate::ledger::VisitLedger;
use crate::models::Location;
use crate::storage::{KeyValueStore, STAMPS_PAGE_KEY};
use tracing::{debug, warn};

pub const DEFAULT_PAGE_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct StampPage<'a> {
    pub items: Vec<&'a Location>,
    pub page: usize,
    pub total_pages: usize,
}

impl StampPage<'_> {
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}

/// Visited pools ordered by visit date.
///
/// Dates compare as plain strings, so they must be stored in a form that sorts
/// chronologically (`YYYY-MM-DD`). Equal dates keep catalog order.
pub fn visited_in_order<'a>(catalog: &'a [Location], ledger: &VisitLedger) -> Vec<&'a Location> {
    let mut visited: Vec<&Location> = catalog
        .iter()
        .filter(|location| ledger.is_visited(&location.id))
        .collect();
    visited.sort_by(|a, b| ledger.date_of(&a.id).cmp(ledger.date_of(&b.id)));
    visited
}

pub fn total_pages(visited: usize, page_size: usize) -> usize {
    visited.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let last = total_pages.saturating_sub(1);
    usize::try_from(requested.max(0)).map_or(last, |page| page.min(last))
}

/// Slices `sorted` at `requested`, clamped into range.
pub fn paginate<'a>(sorted: Vec<&'a Location>, requested: i64, page_size: usize) -> StampPage<'a> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(sorted.len(), page_size);
    let page = clamp_page(requested, total_pages);
    let items = sorted
        .into_iter()
        .skip(page * page_size)
        .take(page_size)
        .collect();

    StampPage {
        items,
        page,
        total_pages,
    }
}

/// Owns the passport's current page and keeps it inside the visited set's bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct StampPaginator {
    page_size: usize,
    current_page: usize,
}

impl StampPaginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 0,
        }
    }

    /// Restores the stored page. Absent or unreadable values start at page 0;
    /// out-of-range values are clamped on the next [`Self::get_page`].
    pub fn load(store: &impl KeyValueStore, page_size: usize) -> Self {
        let mut paginator = Self::new(page_size);
        if let Some(raw) = store.get(STAMPS_PAGE_KEY) {
            match raw.trim().parse::<i64>() {
                Ok(page) => paginator.current_page = usize::try_from(page).unwrap_or(0),
                Err(err) => warn!("ignoring stored stamps page {raw:?}: {err}"),
            }
        }
        paginator
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Computes the page at `requested` and stores the clamped page number.
    pub fn get_page<'a>(
        &mut self,
        catalog: &'a [Location],
        ledger: &VisitLedger,
        requested: i64,
        store: &mut impl KeyValueStore,
    ) -> StampPage<'a> {
        let page = paginate(visited_in_order(catalog, ledger), requested, self.page_size);
        if page.page as i64 != requested {
            debug!(requested, clamped = page.page, "clamped stamps page");
        }
        self.current_page = page.page;
        store.set(STAMPS_PAGE_KEY, page.page.to_string());
        page
    }

    pub fn change_page<'a>(
        &mut self,
        catalog: &'a [Location],
        ledger: &VisitLedger,
        delta: i64,
        store: &mut impl KeyValueStore,
    ) -> StampPage<'a> {
        let requested = (self.current_page as i64).saturating_add(delta);
        self.get_page(catalog, ledger, requested, store)
    }

    /// The current page without recomputing bounds or writing.
    pub fn view<'a>(&self, catalog: &'a [Location], ledger: &VisitLedger) -> StampPage<'a> {
        paginate(
            visited_in_order(catalog, ledger),
            self.current_page as i64,
            self.page_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use crate::storage::MemoryStore;

    fn catalog(ids: &[&str]) -> Vec<Location> {
        ids.iter()
            .map(|id| Location {
                id: id.to_string(),
                name: id.to_uppercase(),
                coordinates: Coordinates { lat: 0.0, lng: 0.0 },
                stamp: None,
                area: None,
            })
            .collect()
    }

    fn ids(page: &StampPage<'_>) -> Vec<String> {
        page.items.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn pages_sort_by_visit_date() {
        let pools = catalog(&["a", "b", "c", "d", "e"]);
        let mut store = MemoryStore::new();
        let mut ledger = VisitLedger::default();
        ledger.set_date("a", "2024-01-02", &mut store);
        ledger.set_date("c", "2024-01-01", &mut store);
        ledger.set_date("e", "2024-01-03", &mut store);

        let mut paginator = StampPaginator::new(2);
        let first = paginator.get_page(&pools, &ledger, 0, &mut store);
        assert_eq!(ids(&first), ["c", "a"]);
        assert_eq!((first.page, first.total_pages), (0, 2));

        let second = paginator.get_page(&pools, &ledger, 1, &mut store);
        assert_eq!(ids(&second), ["e"]);
        assert_eq!((second.page, second.total_pages), (1, 2));
    }

    #[test]
    fn shrinking_visited_set_clamps_and_persists_page() {
        let pools = catalog(&["a", "b", "c"]);
        let mut store = MemoryStore::new();
        let mut ledger = VisitLedger::default();
        for id in ["a", "b", "c"] {
            ledger.toggle(id, "2024-05-01", &mut store);
        }

        let mut paginator = StampPaginator::new(2);
        assert_eq!(paginator.get_page(&pools, &ledger, 1, &mut store).page, 1);
        assert_eq!(store.get(STAMPS_PAGE_KEY).as_deref(), Some("1"));

        ledger.toggle("b", "2024-05-01", &mut store);
        let page = paginator.get_page(&pools, &ledger, 1, &mut store);
        assert_eq!((page.page, page.total_pages), (0, 1));
        assert_eq!(paginator.current_page(), 0);
        assert_eq!(store.get(STAMPS_PAGE_KEY).as_deref(), Some("0"));
    }

    #[test]
    fn empty_ledger_yields_single_empty_page() {
        let pools = catalog(&["a", "b"]);
        let mut store = MemoryStore::new();
        let ledger = VisitLedger::default();

        let page = StampPaginator::new(3).get_page(&pools, &ledger, 5, &mut store);
        assert!(page.items.is_empty());
        assert_eq!((page.page, page.total_pages), (0, 1));
        assert!(!page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn equal_dates_keep_catalog_order() {
        let pools = catalog(&["a", "b", "c", "d"]);
        let mut store = MemoryStore::new();
        let mut ledger = VisitLedger::default();
        ledger.set_date("d", "2024-01-01", &mut store);
        ledger.set_date("b", "2024-01-01", &mut store);
        ledger.set_date("c", "2023-12-31", &mut store);
        ledger.set_date("a", "2024-01-01", &mut store);

        let order: Vec<&str> = visited_in_order(&pools, &ledger)
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(order, ["c", "a", "b", "d"]);
    }

    #[test]
    fn undated_records_sort_first() {
        let pools = catalog(&["a", "b"]);
        let mut store = MemoryStore::new();
        store.set(
            crate::storage::VISITED_KEY,
            r#"{"a":{"done":true,"date":"2024-01-01"},"b":{"done":true}}"#.to_string(),
        );
        let ledger = VisitLedger::load(&store);

        let order: Vec<&str> = visited_in_order(&pools, &ledger)
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(order, ["b", "a"]);
    }

    #[test]
    fn total_pages_matches_ceiling_with_floor_of_one() {
        for size in 1..=4 {
            for visited in 0..=10 {
                let expected = std::cmp::max(1, (visited + size - 1) / size);
                assert_eq!(total_pages(visited, size), expected, "n={visited} p={size}");
            }
        }
    }

    #[test]
    fn every_request_lands_in_range() {
        let pools = catalog(&["a", "b", "c", "d", "e", "f", "g"]);
        let mut store = MemoryStore::new();
        let mut ledger = VisitLedger::default();
        let mut paginator = StampPaginator::new(3);

        for (n, location) in pools.iter().enumerate() {
            ledger.toggle(&location.id, &format!("2024-01-{:02}", n + 1), &mut store);
            for requested in [-5, -1, 0, 1, 2, 3, 100, i64::MAX, i64::MIN] {
                let page = paginator.get_page(&pools, &ledger, requested, &mut store);
                assert!(page.page < page.total_pages);
                assert_eq!(page.total_pages, total_pages(n + 1, 3));
                assert!(!page.items.is_empty());
            }
        }
    }

    #[test]
    fn change_page_moves_relative_to_current() {
        let pools = catalog(&["a", "b", "c", "d", "e"]);
        let mut store = MemoryStore::new();
        let mut ledger = VisitLedger::default();
        for id in ["a", "b", "c", "d", "e"] {
            ledger.toggle(id, "2024-01-01", &mut store);
        }

        let mut paginator = StampPaginator::new(2);
        assert_eq!(paginator.change_page(&pools, &ledger, 1, &mut store).page, 1);
        assert_eq!(paginator.change_page(&pools, &ledger, 1, &mut store).page, 2);
        assert_eq!(paginator.change_page(&pools, &ledger, 1, &mut store).page, 2);
        assert_eq!(paginator.change_page(&pools, &ledger, -10, &mut store).page, 0);
    }

    #[test]
    fn load_recovers_from_bad_stored_page() {
        let mut store = MemoryStore::new();
        store.set(STAMPS_PAGE_KEY, "banana".to_string());
        assert_eq!(StampPaginator::load(&store, 3).current_page(), 0);

        store.set(STAMPS_PAGE_KEY, "-4".to_string());
        assert_eq!(StampPaginator::load(&store, 3).current_page(), 0);

        store.set(STAMPS_PAGE_KEY, "7".to_string());
        assert_eq!(StampPaginator::load(&store, 3).current_page(), 7);
    }

    #[test]
    fn zero_page_size_behaves_as_one() {
        assert_eq!(StampPaginator::new(0).page_size(), 1);
        assert_eq!(total_pages(4, 0), 4);
    }
}
