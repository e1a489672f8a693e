//! Filter engine: pure derivation of the filtered view from the working set.

use contracts::system::logs::record::LogRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Active filters. An empty field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact level code, e.g. "error"
    pub level: String,
    /// Exact service name
    pub service: String,
    /// Case-insensitive substring of the message
    pub search: String,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.level.is_empty() && self.service.is_empty() && self.search.is_empty()
    }

    /// Number of non-empty criteria, for the filter badge
    pub fn active_count(&self) -> usize {
        [&self.level, &self.service, &self.search]
            .iter()
            .filter(|c| !c.is_empty())
            .count()
    }

    pub fn matches(&self, record: &LogRecord) -> bool {
        let level_ok = self.level.is_empty() || record.level.code() == self.level;
        let service_ok = self.service.is_empty() || record.service == self.service;
        let search_ok = self.search.is_empty()
            || record
                .message
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        level_ok && service_ok && search_ok
    }
}

/// Records matching `criteria`, in working-set order
pub fn filter_logs(records: &[LogRecord], criteria: &FilterCriteria) -> Vec<LogRecord> {
    if criteria.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

/// Distinct services of the whole working set, first-seen order
pub fn service_options(records: &[LogRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();
    for record in records {
        if seen.insert(record.service.as_str()) {
            options.push(record.service.clone());
        }
    }
    options
}
