use contracts::system::logs::record::LogRecord;

use super::config::MAX_LIST_LIMIT;

/// The working set: records from exactly one backend call, in backend order.
///
/// Only ever replaced wholesale, so readers never see a mix of two fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct LogStore {
    records: Vec<LogRecord>,
    /// Limit the current records were fetched with (0 before the first load)
    requested_limit: usize,
    /// Backend-reported total from the last list response
    backend_total: Option<u64>,
    /// Largest limit the backend honours; the set never grows past it
    max_limit: usize,
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LogStore {
    pub fn new() -> Self {
        Self::with_cap(MAX_LIST_LIMIT)
    }

    pub fn with_cap(max_limit: usize) -> Self {
        Self {
            records: Vec::new(),
            requested_limit: 0,
            backend_total: None,
            max_limit: max_limit.max(1),
        }
    }

    /// Swap in the result of one `list_logs(requested_limit)` call
    pub fn replace(&mut self, records: Vec<LogRecord>, requested_limit: usize, backend_total: Option<u64>) {
        self.records = records;
        self.requested_limit = requested_limit;
        self.backend_total = backend_total;
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn requested_limit(&self) -> usize {
        self.requested_limit
    }

    pub fn backend_total(&self) -> Option<u64> {
        self.backend_total
    }

    pub fn is_loaded(&self) -> bool {
        self.requested_limit > 0
    }

    pub fn max_limit(&self) -> usize {
        self.max_limit
    }

    /// A full page came back below the cap, so the backend may hold more
    pub fn has_more(&self) -> bool {
        self.is_loaded()
            && self.records.len() >= self.requested_limit
            && self.requested_limit < self.max_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::logs::test_support::record;

    #[test]
    fn replace_swaps_content() {
        let mut store = LogStore::new();
        store.replace(vec![record(1, "info", "api", "a")], 100, Some(1));
        store.replace(vec![record(2, "error", "db", "b"), record(3, "info", "db", "c")], 100, Some(2));
        assert_eq!(store.size(), 2);
        assert_eq!(store.records()[0].id.to_string(), "2");
        assert_eq!(store.backend_total(), Some(2));
    }

    #[test]
    fn short_page_means_no_more() {
        let mut store = LogStore::new();
        assert!(!store.has_more());

        store.replace((0..99).map(|i| record(i, "info", "api", "m")).collect(), 100, None);
        assert!(!store.has_more());

        store.replace((0..100).map(|i| record(i, "info", "api", "m")).collect(), 100, None);
        assert!(store.has_more());
    }

    #[test]
    fn full_page_at_the_cap_is_the_end() {
        let mut store = LogStore::with_cap(1000);
        store.replace((0..1000).map(|i| record(i, "info", "api", "m")).collect(), 1000, Some(5000));
        assert!(!store.has_more());

        store.replace((0..900).map(|i| record(i, "info", "api", "m")).collect(), 900, Some(5000));
        assert!(store.has_more());
    }

    #[test]
    fn empty_result_is_loaded_but_exhausted() {
        let mut store = LogStore::new();
        store.replace(Vec::new(), 100, Some(0));
        assert!(store.is_loaded());
        assert!(!store.has_more());
        assert_eq!(store.size(), 0);
    }
}
