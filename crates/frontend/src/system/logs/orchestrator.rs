//! Refresh orchestrator: which load is in flight and which responses may land.
//!
//! At most one load runs at a time. A refresh triggered while another load is
//! running is queued, and any number of such triggers collapse into a single
//! rerun once the running load settles. Every load also carries a generation
//! number, and a response may only be published if its generation is ahead of
//! the last published one.

/// What the dashboard is currently waiting on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    /// Full refresh (logs + stats)
    Loading,
    /// Growing the working set
    LoadingMore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Refresh,
    LoadMore,
}

/// Why a refresh was started; only used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Startup,
    Manual,
    Timer,
    AfterMutation,
}

/// Handle for one in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub kind: LoadKind,
    /// `limit` to pass to `list_logs`
    pub limit: usize,
}

/// Result of settling a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Newer than anything published; apply it
    Current,
    /// A later load already published; drop it
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct RefreshOrchestrator {
    last_issued: u64,
    published: u64,
    in_flight: Option<LoadTicket>,
    refresh_queued: bool,
}

impl RefreshOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LoadPhase {
        match self.in_flight {
            None => LoadPhase::Idle,
            Some(LoadTicket { kind: LoadKind::Refresh, .. }) => LoadPhase::Loading,
            Some(LoadTicket { kind: LoadKind::LoadMore, .. }) => LoadPhase::LoadingMore,
        }
    }

    /// Generation of the last published load (0 = nothing yet)
    pub fn published_generation(&self) -> u64 {
        self.published
    }

    /// A refresh is waiting for the running load to settle
    pub fn is_refresh_queued(&self) -> bool {
        self.refresh_queued
    }

    /// Start a refresh from `Idle`. Otherwise queue one and return `None`.
    pub fn begin_refresh(&mut self, limit: usize) -> Option<LoadTicket> {
        if self.in_flight.is_some() {
            self.refresh_queued = true;
            return None;
        }
        Some(self.issue(LoadKind::Refresh, limit))
    }

    /// "Load more" only starts from `Idle`; otherwise the click is ignored.
    pub fn begin_load_more(&mut self, limit: usize) -> Option<LoadTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        Some(self.issue(LoadKind::LoadMore, limit))
    }

    /// Mark a ticket as finished (either way) and say whether it may publish
    pub fn settle(&mut self, ticket: &LoadTicket) -> Settle {
        if self.in_flight.map(|t| t.generation) == Some(ticket.generation) {
            self.in_flight = None;
        }
        if ticket.generation > self.published {
            Settle::Current
        } else {
            Settle::Stale
        }
    }

    /// Record that `ticket`'s data is now on screen
    pub fn mark_published(&mut self, ticket: &LoadTicket) {
        self.published = self.published.max(ticket.generation);
    }

    /// Start the queued refresh, if any, once the orchestrator is idle again
    pub fn take_queued_refresh(&mut self, limit: usize) -> Option<LoadTicket> {
        if !self.refresh_queued || self.in_flight.is_some() {
            return None;
        }
        self.refresh_queued = false;
        Some(self.issue(LoadKind::Refresh, limit))
    }

    fn issue(&mut self, kind: LoadKind, limit: usize) -> LoadTicket {
        self.last_issued += 1;
        let ticket = LoadTicket {
            generation: self.last_issued,
            kind,
            limit,
        };
        self.in_flight = Some(ticket);
        ticket
    }
}
