//! Drives the session from the four triggers: startup/manual/timer refresh,
//! load more, append test log, clear all.

use std::cell::RefCell;
use std::rc::Rc;

use contracts::system::logs::record::LogRecord;
use contracts::system::logs::request::LogDraft;
use contracts::system::logs::response::HealthResponse;

use super::api::{LogGateway, TransportError};
use super::config::DashboardConfig;
use super::generator::LogDraftGenerator;
use super::orchestrator::{LoadTicket, RefreshTrigger};
use super::session::{BusyAction, Commit, DashboardSession};

/// Outcome of a user mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<T> {
    Done(T),
    /// The same action is already running
    AlreadyRunning,
    /// The user declined the confirmation
    Cancelled,
}

/// Holds an action's busy flag for as long as it lives
struct BusyGuard {
    session: Rc<RefCell<DashboardSession>>,
    action: BusyAction,
}

impl BusyGuard {
    fn acquire(session: &Rc<RefCell<DashboardSession>>, action: BusyAction) -> Option<Self> {
        if !session.borrow_mut().try_mark_busy(action) {
            return None;
        }
        Some(Self {
            session: session.clone(),
            action,
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.session.borrow_mut().release_busy(self.action);
    }
}

pub struct DashboardController<G: LogGateway> {
    gateway: Rc<G>,
    session: Rc<RefCell<DashboardSession>>,
    generator: Rc<dyn LogDraftGenerator>,
    config: DashboardConfig,
}

impl<G: LogGateway> Clone for DashboardController<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            session: self.session.clone(),
            generator: self.generator.clone(),
            config: self.config.clone(),
        }
    }
}

impl<G: LogGateway> DashboardController<G> {
    pub fn new(gateway: G, generator: impl LogDraftGenerator + 'static, config: DashboardConfig) -> Self {
        Self {
            gateway: Rc::new(gateway),
            session: Rc::new(RefCell::new(DashboardSession::with_max_limit(config.max_limit))),
            generator: Rc::new(generator),
            config,
        }
    }

    pub fn session(&self) -> &Rc<RefCell<DashboardSession>> {
        &self.session
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Fetch logs and stats concurrently and publish both, or neither.
    ///
    /// `None` when another load is running: the refresh is queued and that
    /// load's driver runs it once it settles.
    pub async fn refresh(&self, trigger: RefreshTrigger) -> Option<Commit> {
        let ticket = self.session.borrow_mut().begin_refresh(self.default_limit());
        let Some(ticket) = ticket else {
            log::debug!("logs: {:?} refresh collapsed into the running load", trigger);
            return None;
        };
        log::debug!("logs: refresh #{} triggered by {:?}", ticket.generation, trigger);
        Some(self.drive_refresh(ticket).await)
    }

    /// Re-fetch with a bigger limit. `None` if ignored (busy or exhausted).
    pub async fn load_more(&self) -> Option<Commit> {
        let ticket = self
            .session
            .borrow_mut()
            .begin_load_more(self.config.page_increment)?;

        let result = self
            .gateway
            .list_logs(ticket.limit)
            .await
            .map_err(|e| e.message);

        let commit = self.session.borrow_mut().commit_load_more(ticket, result);
        if let Some(queued) = self.next_queued_refresh() {
            self.drive_refresh(queued).await;
        }
        Some(commit)
    }

    /// Run `ticket`, then every refresh queued behind it. Returns the last commit.
    async fn drive_refresh(&self, mut ticket: LoadTicket) -> Commit {
        loop {
            let result = tokio::try_join!(
                self.gateway.list_logs(ticket.limit),
                self.gateway.get_stats()
            )
            .map_err(|e| e.message);

            let commit = self.session.borrow_mut().commit_refresh(ticket, result);
            match self.next_queued_refresh() {
                Some(next) => ticket = next,
                None => return commit,
            }
        }
    }

    fn next_queued_refresh(&self) -> Option<LoadTicket> {
        self.session.borrow_mut().take_queued_refresh(self.default_limit())
    }

    fn default_limit(&self) -> usize {
        self.config.clamp_limit(self.config.page_size)
    }

    /// Append a draft, then reload everything. No optimistic insert.
    pub async fn append_log(&self, draft: LogDraft) -> Result<Mutation<LogRecord>, TransportError> {
        let Some(_guard) = BusyGuard::acquire(&self.session, BusyAction::Append) else {
            return Ok(Mutation::AlreadyRunning);
        };

        let created = self.gateway.append_log(&draft).await.map_err(|e| {
            log::error!("logs: failed to add log: {}", e);
            e
        })?;
        log::info!("logs: added {} log #{} from {}", created.level, created.id, created.service);

        self.refresh(RefreshTrigger::AfterMutation).await;
        Ok(Mutation::Done(created))
    }

    /// Append a generated test log
    pub async fn append_test_log(&self) -> Result<Mutation<LogRecord>, TransportError> {
        let draft = self.generator.generate();
        self.append_log(draft).await
    }

    /// Delete every log on the backend. Does nothing unless `confirmed`.
    pub async fn clear_all(&self, confirmed: bool) -> Result<Mutation<String>, TransportError> {
        if !confirmed {
            log::debug!("logs: clear cancelled");
            return Ok(Mutation::Cancelled);
        }
        let Some(_guard) = BusyGuard::acquire(&self.session, BusyAction::Clear) else {
            return Ok(Mutation::AlreadyRunning);
        };

        let ack = self.gateway.clear_all().await.map_err(|e| {
            log::error!("logs: failed to clear logs: {}", e);
            e
        })?;
        log::info!("logs: {}", ack.message);

        self.refresh(RefreshTrigger::AfterMutation).await;
        Ok(Mutation::Done(ack.message))
    }

    pub async fn health(&self) -> Result<HealthResponse, TransportError> {
        self.gateway.health().await.map_err(|e| {
            log::warn!("logs: health check failed: {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::logs::orchestrator::LoadPhase;
    use crate::system::logs::test_support::{page, record, stats_for};
    use async_trait::async_trait;
    use contracts::enums::log_level::LogLevel;
    use contracts::system::logs::record::LogId;
    use contracts::system::logs::response::{ClearLogsResponse, LogListResponse, LogStats};
    use std::cell::Cell;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    /// In-memory backend; optional gates hold `list_logs` calls until released.
    #[derive(Default)]
    struct FakeBackend {
        logs: RefCell<Vec<LogRecord>>,
        next_id: Cell<i64>,
        fail_list: Cell<bool>,
        fail_stats: Cell<bool>,
        fail_append: Cell<bool>,
        list_calls: RefCell<Vec<usize>>,
        clear_calls: Cell<usize>,
        list_gates: RefCell<VecDeque<oneshot::Receiver<Vec<LogRecord>>>>,
    }

    impl FakeBackend {
        fn with_logs(logs: Vec<LogRecord>) -> Self {
            let backend = Self::default();
            backend.next_id.set(logs.len() as i64 + 1);
            *backend.logs.borrow_mut() = logs;
            backend
        }
    }

    #[async_trait(?Send)]
    impl LogGateway for FakeBackend {
        async fn list_logs(&self, limit: usize) -> Result<LogListResponse, TransportError> {
            self.list_calls.borrow_mut().push(limit);
            let gate = self.list_gates.borrow_mut().pop_front();
            let logs = match gate {
                Some(rx) => rx.await.map_err(|_| TransportError::new("gate dropped"))?,
                None => self.logs.borrow().iter().take(limit).cloned().collect(),
            };
            if self.fail_list.get() {
                return Err(TransportError::from_status(500, r#"{"error": "db offline"}"#, "Failed to load logs"));
            }
            Ok(LogListResponse {
                total: Some(self.logs.borrow().len() as u64),
                logs,
                ..Default::default()
            })
        }

        async fn get_stats(&self) -> Result<LogStats, TransportError> {
            if self.fail_stats.get() {
                return Err(TransportError::from_status(503, "", "Failed to load stats"));
            }
            Ok(stats_for(&self.logs.borrow()))
        }

        async fn append_log(&self, draft: &LogDraft) -> Result<LogRecord, TransportError> {
            if self.fail_append.get() {
                return Err(TransportError::new("rejected"));
            }
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let mut created = record(0, draft.level.code(), &draft.service, &draft.message);
            created.id = LogId::Int(id);
            created.data = draft.data.clone();
            self.logs.borrow_mut().insert(0, created.clone());
            Ok(created)
        }

        async fn clear_all(&self) -> Result<ClearLogsResponse, TransportError> {
            self.clear_calls.set(self.clear_calls.get() + 1);
            let count = self.logs.borrow().len();
            self.logs.borrow_mut().clear();
            Ok(ClearLogsResponse {
                success: true,
                message: format!("{} logs cleared", count),
            })
        }

        async fn health(&self) -> Result<HealthResponse, TransportError> {
            Ok(HealthResponse {
                status: "ok".into(),
                database: "connected".into(),
                ..Default::default()
            })
        }
    }

    struct FixedGenerator;

    impl LogDraftGenerator for FixedGenerator {
        fn generate(&self) -> LogDraft {
            LogDraft::new(LogLevel::Warning, "worker", "Rate limit reached")
        }
    }

    fn controller(backend: FakeBackend) -> DashboardController<FakeBackend> {
        DashboardController::new(backend, FixedGenerator, DashboardConfig::default())
    }

    #[tokio::test]
    async fn startup_refresh_loads_logs_and_stats() {
        let c = controller(FakeBackend::with_logs(vec![
            record(1, "error", "api", "boom"),
            record(2, "info", "db", "ok"),
        ]));
        assert_eq!(c.refresh(RefreshTrigger::Startup).await, Some(Commit::Published));

        let session = c.session().borrow();
        assert_eq!(session.store().size(), 2);
        assert_eq!(session.stats().unwrap().total_logs, 2);
        assert_eq!(session.phase(), LoadPhase::Idle);
        assert_eq!(c.gateway.list_calls.borrow().as_slice(), &[100]);
    }

    #[tokio::test]
    async fn failed_stats_leaves_working_set_and_stats_alone() {
        let c = controller(FakeBackend::with_logs(vec![record(1, "info", "api", "a")]));
        c.refresh(RefreshTrigger::Startup).await;
        let store_before = c.session().borrow().store().clone();
        let stats_before = c.session().borrow().stats().cloned();

        c.gateway.logs.borrow_mut().push(record(2, "info", "db", "b"));
        c.gateway.fail_stats.set(true);
        assert_eq!(c.refresh(RefreshTrigger::Manual).await, Some(Commit::Failed));

        let session = c.session().borrow();
        assert_eq!(session.store(), &store_before);
        assert_eq!(session.stats().cloned(), stats_before);
        assert_eq!(session.error(), Some("Failed to load stats (HTTP 503)"));
    }

    #[tokio::test]
    async fn failed_list_surfaces_backend_message() {
        let c = controller(FakeBackend::with_logs(vec![record(1, "info", "api", "a")]));
        c.gateway.fail_list.set(true);
        assert_eq!(c.refresh(RefreshTrigger::Timer).await, Some(Commit::Failed));
        assert_eq!(c.session().borrow().error(), Some("db offline"));
        assert_eq!(c.session().borrow().store().size(), 0);
    }

    #[tokio::test]
    async fn load_more_refetches_with_bigger_limit() {
        let c = controller(FakeBackend::with_logs(page(1, 150, "api")));
        c.refresh(RefreshTrigger::Startup).await;
        assert!(c.session().borrow().view().has_more);

        assert_eq!(c.load_more().await, Some(Commit::Published));
        assert_eq!(c.gateway.list_calls.borrow().as_slice(), &[100, 200]);

        let view = c.session().borrow().view();
        assert_eq!(view.loaded, 150);
        assert!(!view.has_more);
    }

    #[tokio::test]
    async fn overlapping_triggers_commit_once_then_rerun() {
        let newer = vec![record(2, "info", "new-service", "fresh")];
        let older = vec![record(1, "info", "old-service", "stale")];
        let backend = FakeBackend::with_logs(newer.clone());
        let (tx, rx) = oneshot::channel();
        backend.list_gates.borrow_mut().push_back(rx);
        let c = controller(backend);

        let first = c.refresh(RefreshTrigger::Timer);
        let second = c.refresh(RefreshTrigger::Manual);
        let release = async {
            tokio::task::yield_now().await;
            tx.send(older.clone()).unwrap();
        };

        let (a, b, ()) = tokio::join!(first, second, release);
        assert_eq!(a, Some(Commit::Published));
        assert_eq!(b, None);
        assert_eq!(c.gateway.list_calls.borrow().as_slice(), &[100, 100]);

        let session = c.session().borrow();
        assert_eq!(session.store().records(), &newer[..]);
        assert_eq!(session.service_options(), &["new-service".to_string()]);
        assert_eq!(session.phase(), LoadPhase::Idle);
    }

    #[tokio::test]
    async fn timer_tick_during_load_more_keeps_the_grown_list() {
        let c = controller(FakeBackend::with_logs(page(1, 250, "api")));
        c.refresh(RefreshTrigger::Startup).await;
        assert_eq!(c.session().borrow().store().size(), 100);

        let (tx, rx) = oneshot::channel();
        c.gateway.list_gates.borrow_mut().push_back(rx);

        let more = c.load_more();
        let tick = c.refresh(RefreshTrigger::Timer);
        let release = async {
            tokio::task::yield_now().await;
            tx.send(page(1, 200, "api")).unwrap();
        };

        let (more, tick, ()) = tokio::join!(more, tick, release);
        assert_eq!(more, Some(Commit::Published));
        assert_eq!(tick, None);
        assert_eq!(c.gateway.list_calls.borrow().as_slice(), &[100, 200, 200]);

        let view = c.session().borrow().view();
        assert_eq!(view.loaded, 200);
        assert_eq!(view.phase, LoadPhase::Idle);
        assert_eq!(view.stats.map(|s| s.total_logs), Some(250));
        assert!(view.has_more);
    }

    #[tokio::test]
    async fn load_more_stops_at_the_backend_cap() {
        let c = controller(FakeBackend::with_logs(page(1, 1200, "api")));
        c.refresh(RefreshTrigger::Startup).await;

        let mut rounds = 0;
        while c.session().borrow().view().has_more {
            assert_eq!(c.load_more().await, Some(Commit::Published));
            rounds += 1;
            assert!(rounds <= 9, "load more never stopped");
        }

        assert_eq!(rounds, 9);
        assert_eq!(c.session().borrow().store().size(), 1000);
        assert_eq!(c.load_more().await, None);
        assert_eq!(c.gateway.list_calls.borrow().last(), Some(&1000));

        // later refreshes keep the full page without offering more
        assert_eq!(c.refresh(RefreshTrigger::Timer).await, Some(Commit::Published));
        assert_eq!(c.gateway.list_calls.borrow().last(), Some(&1000));
        assert!(!c.session().borrow().view().has_more);
    }

    #[tokio::test]
    async fn load_more_is_ignored_while_refreshing() {
        let backend = FakeBackend::with_logs(page(1, 300, "api"));
        let (tx, rx) = oneshot::channel();
        backend.list_gates.borrow_mut().push_back(rx);
        let c = controller(backend);

        let refresh = c.refresh(RefreshTrigger::Startup);
        let click = async {
            tokio::task::yield_now().await;
            let ignored = c.load_more().await;
            tx.send(page(1, 100, "api")).unwrap();
            ignored
        };
        let (commit, ignored) = tokio::join!(refresh, click);

        assert_eq!(commit, Some(Commit::Published));
        assert_eq!(ignored, None);
        assert_eq!(c.gateway.list_calls.borrow().as_slice(), &[100]);
    }

    #[tokio::test]
    async fn append_reloads_instead_of_inserting_locally() {
        let c = controller(FakeBackend::with_logs(vec![record(1, "info", "api", "a")]));
        c.refresh(RefreshTrigger::Startup).await;

        let outcome = c.append_test_log().await.unwrap();
        let Mutation::Done(created) = outcome else {
            panic!("expected the append to run");
        };
        assert_eq!(created.service, "worker");

        let session = c.session().borrow();
        assert_eq!(session.store().size(), 2);
        assert_eq!(session.store().records()[0].id, created.id);
        assert_eq!(session.stats().unwrap().total_logs, 2);
        assert!(!session.is_busy(BusyAction::Append));
    }

    #[tokio::test]
    async fn failed_append_releases_control_and_keeps_state() {
        let c = controller(FakeBackend::with_logs(vec![record(1, "info", "api", "a")]));
        c.refresh(RefreshTrigger::Startup).await;
        c.gateway.fail_append.set(true);

        let err = c.append_test_log().await.unwrap_err();
        assert_eq!(err.message, "rejected");

        let session = c.session().borrow();
        assert!(!session.is_busy(BusyAction::Append));
        assert_eq!(session.store().size(), 1);
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn second_append_while_running_is_ignored() {
        let c = controller(FakeBackend::with_logs(Vec::new()));
        c.session().borrow_mut().try_mark_busy(BusyAction::Append);

        assert_eq!(c.append_test_log().await.unwrap(), Mutation::AlreadyRunning);
        assert!(c.gateway.logs.borrow().is_empty());
    }

    #[tokio::test]
    async fn clear_without_confirmation_does_nothing() {
        let c = controller(FakeBackend::with_logs(vec![record(1, "info", "api", "a")]));
        c.refresh(RefreshTrigger::Startup).await;
        let before = c.session().borrow().store().clone();

        assert_eq!(c.clear_all(false).await.unwrap(), Mutation::Cancelled);
        assert_eq!(c.gateway.clear_calls.get(), 0);
        assert_eq!(c.session().borrow().store(), &before);
    }

    #[tokio::test]
    async fn confirmed_clear_empties_the_working_set() {
        let c = controller(FakeBackend::with_logs(vec![
            record(1, "info", "api", "a"),
            record(2, "info", "db", "b"),
        ]));
        c.refresh(RefreshTrigger::Startup).await;

        let outcome = c.clear_all(true).await.unwrap();
        assert_eq!(outcome, Mutation::Done("2 logs cleared".to_string()));

        let view = c.session().borrow().view();
        assert_eq!(view.loaded, 0);
        assert!(view.service_options.is_empty());
        assert!(!view.clearing);
        assert_eq!(view.stats.map(|s| s.total_logs), Some(0));
    }

    #[tokio::test]
    async fn health_is_passed_through() {
        let c = controller(FakeBackend::default());
        assert!(c.health().await.unwrap().is_ok());
    }
}
