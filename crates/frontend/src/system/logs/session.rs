//! Session context: the single owner of the working set, filters, stats and
//! load bookkeeping for one dashboard page.
//!
//! All methods are synchronous; the controller calls them between awaits so
//! no borrow is ever held across a backend call.

use contracts::system::logs::record::LogRecord;
use contracts::system::logs::response::{LogListResponse, LogStats};

use super::filter::{filter_logs, service_options, FilterCriteria};
use super::orchestrator::{LoadKind, LoadPhase, LoadTicket, RefreshOrchestrator, Settle};
use super::store::LogStore;
use super::view::DashboardView;

/// Outcome of applying a finished load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Published,
    /// A newer load already published; response dropped
    Discarded,
    /// Load failed; previous state kept, error surfaced
    Failed,
}

/// Mutating actions that lock their own control while running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyAction {
    Append,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&DashboardView)>;

pub struct DashboardSession {
    store: LogStore,
    criteria: FilterCriteria,
    stats: Option<LogStats>,
    filtered: Vec<LogRecord>,
    services: Vec<String>,
    orchestrator: RefreshOrchestrator,
    error: Option<String>,
    appending: bool,
    clearing: bool,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::with_store(LogStore::new())
    }

    /// Session whose working set never grows past `max_limit` records
    pub fn with_max_limit(max_limit: usize) -> Self {
        Self::with_store(LogStore::with_cap(max_limit))
    }

    fn with_store(store: LogStore) -> Self {
        Self {
            store,
            criteria: FilterCriteria::default(),
            stats: None,
            filtered: Vec::new(),
            services: Vec::new(),
            orchestrator: RefreshOrchestrator::new(),
            error: None,
            appending: false,
            clearing: false,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Register a view observer. It is called immediately with the current
    /// snapshot and then after every change. Observers must not call back
    /// into the session.
    pub fn subscribe(&mut self, subscriber: impl Fn(&DashboardView) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        subscriber(&self.view());
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    fn notify(&self) {
        if self.subscribers.is_empty() {
            return;
        }
        let view = self.view();
        for (_, subscriber) in &self.subscribers {
            subscriber(&view);
        }
    }

    pub fn view(&self) -> DashboardView {
        DashboardView {
            logs: self.filtered.clone(),
            loaded: self.store.size(),
            backend_total: self.store.backend_total(),
            stats: self.stats.clone(),
            service_options: self.services.clone(),
            criteria: self.criteria.clone(),
            has_more: self.store.has_more(),
            phase: self.orchestrator.phase(),
            error: self.error.clone(),
            appending: self.appending,
            clearing: self.clearing,
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn stats(&self) -> Option<&LogStats> {
        self.stats.as_ref()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn filtered(&self) -> &[LogRecord] {
        &self.filtered
    }

    pub fn service_options(&self) -> &[String] {
        &self.services
    }

    pub fn phase(&self) -> LoadPhase {
        self.orchestrator.phase()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self, action: BusyAction) -> bool {
        match action {
            BusyAction::Append => self.appending,
            BusyAction::Clear => self.clearing,
        }
    }

    // ------------------------------------------------------------------
    // Filters (bypass the orchestrator)
    // ------------------------------------------------------------------

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if self.criteria == criteria {
            return;
        }
        self.criteria = criteria;
        self.refilter();
        self.notify();
    }

    pub fn update_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) {
        let mut criteria = self.criteria.clone();
        edit(&mut criteria);
        self.set_criteria(criteria);
    }

    fn refilter(&mut self) {
        self.filtered = filter_logs(self.store.records(), &self.criteria);
    }

    // ------------------------------------------------------------------
    // Loads
    // ------------------------------------------------------------------

    /// Start a full refresh with the limit the working set was last fetched
    /// with (`default_limit` before the first load).
    ///
    /// `None` when another load is running; the refresh is then queued and
    /// handed out by [`Self::take_queued_refresh`] once that load settles.
    pub fn begin_refresh(&mut self, default_limit: usize) -> Option<LoadTicket> {
        let limit = self.refresh_limit(default_limit);
        let Some(ticket) = self.orchestrator.begin_refresh(limit) else {
            log::debug!("logs: refresh queued behind a running load");
            return None;
        };
        log::debug!("logs: refresh #{} started (limit {})", ticket.generation, limit);
        self.notify();
        Some(ticket)
    }

    /// The refresh queued while the last load ran, started now
    pub fn take_queued_refresh(&mut self, default_limit: usize) -> Option<LoadTicket> {
        let limit = self.refresh_limit(default_limit);
        let ticket = self.orchestrator.take_queued_refresh(limit)?;
        log::debug!("logs: queued refresh #{} started (limit {})", ticket.generation, limit);
        self.notify();
        Some(ticket)
    }

    fn refresh_limit(&self, default_limit: usize) -> usize {
        match self.store.requested_limit() {
            0 => default_limit.min(self.store.max_limit()),
            current => current,
        }
    }

    /// Start growing the working set by `increment`, capped at the store's
    /// maximum. `None` while another load is running or when there is
    /// nothing more to fetch.
    pub fn begin_load_more(&mut self, increment: usize) -> Option<LoadTicket> {
        if !self.store.has_more() {
            return None;
        }
        let limit = (self.store.size() + increment).min(self.store.max_limit());
        if limit <= self.store.size() {
            return None;
        }
        let ticket = self.orchestrator.begin_load_more(limit)?;
        log::debug!("logs: load more #{} started (limit {})", ticket.generation, limit);
        self.notify();
        Some(ticket)
    }

    /// Apply a finished refresh. Logs and stats land together or not at all.
    pub fn commit_refresh(
        &mut self,
        ticket: LoadTicket,
        result: Result<(LogListResponse, LogStats), String>,
    ) -> Commit {
        debug_assert_eq!(ticket.kind, LoadKind::Refresh);
        let commit = match (self.orchestrator.settle(&ticket), result) {
            (Settle::Stale, Ok(_)) => {
                log::warn!("logs: dropping stale refresh #{}", ticket.generation);
                Commit::Discarded
            }
            (Settle::Stale, Err(e)) => {
                log::warn!("logs: stale refresh #{} failed: {}", ticket.generation, e);
                Commit::Discarded
            }
            (Settle::Current, Ok((list, stats))) => {
                self.publish(&ticket, list);
                self.stats = Some(stats);
                Commit::Published
            }
            (Settle::Current, Err(e)) => {
                log::error!("logs: refresh #{} failed: {}", ticket.generation, e);
                self.error = Some(e);
                Commit::Failed
            }
        };
        self.notify();
        commit
    }

    /// Apply a finished "load more": the larger list replaces the working set.
    pub fn commit_load_more(&mut self, ticket: LoadTicket, result: Result<LogListResponse, String>) -> Commit {
        debug_assert_eq!(ticket.kind, LoadKind::LoadMore);
        let commit = match (self.orchestrator.settle(&ticket), result) {
            (Settle::Stale, Ok(_)) => {
                log::warn!("logs: dropping stale load more #{}", ticket.generation);
                Commit::Discarded
            }
            (Settle::Stale, Err(e)) => {
                log::warn!("logs: stale load more #{} failed: {}", ticket.generation, e);
                Commit::Discarded
            }
            (Settle::Current, Ok(list)) => {
                self.publish(&ticket, list);
                Commit::Published
            }
            (Settle::Current, Err(e)) => {
                log::error!("logs: load more #{} failed: {}", ticket.generation, e);
                self.error = Some(e);
                Commit::Failed
            }
        };
        self.notify();
        commit
    }

    fn publish(&mut self, ticket: &LoadTicket, list: LogListResponse) {
        log::debug!(
            "logs: publishing #{} ({} records, limit {})",
            ticket.generation,
            list.logs.len(),
            ticket.limit
        );
        self.store.replace(list.logs, ticket.limit, list.total);
        self.services = service_options(self.store.records());
        self.refilter();
        self.error = None;
        self.orchestrator.mark_published(ticket);
    }

    // ------------------------------------------------------------------
    // Busy flags for append / clear
    // ------------------------------------------------------------------

    /// Claim `action`'s control. `false` if it is already running.
    pub fn try_mark_busy(&mut self, action: BusyAction) -> bool {
        let flag = match action {
            BusyAction::Append => &mut self.appending,
            BusyAction::Clear => &mut self.clearing,
        };
        if *flag {
            return false;
        }
        *flag = true;
        self.notify();
        true
    }

    pub fn release_busy(&mut self, action: BusyAction) {
        match action {
            BusyAction::Append => self.appending = false,
            BusyAction::Clear => self.clearing = false,
        }
        self.notify();
    }
}
