use std::time::Duration;

use crate::shared::api_utils::api_base;

/// Rows requested on the first load
pub const DEFAULT_PAGE_SIZE: usize = 100;
/// Rows added by each "load more"
pub const PAGE_INCREMENT: usize = 100;
/// The backend never returns more than this many rows per call
pub const MAX_LIST_LIMIT: usize = 1000;
/// Auto-refresh period
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Prefix for every backend path; empty means same-origin
    pub api_base: String,
    pub page_size: usize,
    pub page_increment: usize,
    pub max_limit: usize,
    pub refresh_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            page_increment: PAGE_INCREMENT,
            max_limit: MAX_LIST_LIMIT,
            refresh_interval: REFRESH_INTERVAL,
        }
    }
}

impl DashboardConfig {
    /// Defaults with the API base resolved from the page location
    pub fn from_location() -> Self {
        Self {
            api_base: api_base(),
            ..Self::default()
        }
    }

    /// Keep a requested limit within `1..=max_limit`
    pub fn clamp_limit(&self, limit: usize) -> usize {
        limit.clamp(1, self.max_limit.max(1))
    }
}
