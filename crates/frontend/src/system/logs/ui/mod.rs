pub mod filter_bar;
pub mod footer;
pub mod header;
pub mod log_list;
pub mod state;

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::filter_bar::FilterBar;
use self::footer::HealthFooter;
use self::header::StatsHeader;
use self::log_list::LogList;
use self::state::{create_health_state, create_view_state, HealthState};
use crate::system::logs::api::HttpLogGateway;
use crate::system::logs::config::DashboardConfig;
use crate::system::logs::controller::{DashboardController, Mutation};
use crate::system::logs::filter::FilterCriteria;
use crate::system::logs::generator::RandomLogGenerator;
use crate::system::logs::orchestrator::{LoadPhase, RefreshTrigger};

type Controller = DashboardController<HttpLogGateway>;

fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn LogDashboard() -> impl IntoView {
    let config = DashboardConfig::from_location();
    log::info!("logs: dashboard using backend '{}'", config.api_base);

    let controller = DashboardController::new(
        HttpLogGateway::new(config.api_base.clone()),
        RandomLogGenerator::new(),
        config.clone(),
    );

    let view_state = create_view_state();
    let health = create_health_state();
    controller
        .session()
        .borrow_mut()
        .subscribe(move |snapshot| view_state.set(snapshot.clone()));

    let controller_sv = StoredValue::new_local(controller);

    let refresh = move |trigger: RefreshTrigger| {
        let controller: Controller = controller_sv.get_value();
        spawn_local(async move {
            controller.refresh(trigger).await;
        });
    };

    let check_health = move || {
        let controller: Controller = controller_sv.get_value();
        spawn_local(async move {
            let result = controller.health().await.map_err(|e| e.message);
            health.set(HealthState::Checked(result));
        });
    };

    refresh(RefreshTrigger::Startup);
    check_health();

    // Auto-refresh for the lifetime of the page
    let alive = Rc::new(Cell::new(true));
    let alive_sv = StoredValue::new_local(alive.clone());
    on_cleanup(move || {
        alive_sv.try_with_value(|alive| alive.set(false));
    });
    let tick_ms = config.refresh_interval.as_millis() as u32;
    spawn_local(async move {
        loop {
            TimeoutFuture::new(tick_ms).await;
            if !alive.get() || alive_sv.is_disposed() {
                log::debug!("logs: auto-refresh stopped");
                break;
            }
            refresh(RefreshTrigger::Timer);
            check_health();
        }
    });

    let load_more = move || {
        let controller: Controller = controller_sv.get_value();
        spawn_local(async move {
            if controller.load_more().await.is_none() {
                log::debug!("logs: load more ignored");
            }
        });
    };

    let add_test_log = move |_| {
        let controller: Controller = controller_sv.get_value();
        spawn_local(async move {
            match controller.append_test_log().await {
                Ok(Mutation::Done(_)) | Ok(Mutation::Cancelled) => {}
                Ok(Mutation::AlreadyRunning) => log::debug!("logs: append already running"),
                Err(e) => alert(&format!("Failed to add log: {}", e)),
            }
        });
    };

    let clear_all = move |_| {
        let confirmed = confirm("Delete ALL logs? This cannot be undone.");
        let controller: Controller = controller_sv.get_value();
        spawn_local(async move {
            match controller.clear_all(confirmed).await {
                Ok(Mutation::Done(message)) => alert(&message),
                Ok(_) => {}
                Err(e) => alert(&format!("Failed to clear logs: {}", e)),
            }
        });
    };

    let on_criteria = Callback::new(move |criteria: FilterCriteria| {
        controller_sv.with_value(|c| c.session().borrow_mut().set_criteria(criteria));
    });

    let loading = Signal::derive(move || view_state.with(|v| v.phase == LoadPhase::Loading));
    let appending = Signal::derive(move || view_state.with(|v| v.appending));
    let clearing = Signal::derive(move || view_state.with(|v| v.clearing));

    view! {
        <div class="log-dashboard" style="padding: 20px;">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 16px;">
                <h2 style="margin: 0; font-size: 24px; font-weight: bold;">"Log Dashboard"</h2>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| refresh(RefreshTrigger::Manual)
                        disabled=loading
                    >
                        "Refresh"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=add_test_log disabled=appending>
                        {move || if appending.get() { "Adding..." } else { "Add test log" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=clear_all disabled=clearing>
                        {move || if clearing.get() { "Clearing..." } else { "Clear all" }}
                    </Button>
                </Space>
            </Flex>

            <StatsHeader state=view_state />
            <FilterBar state=view_state on_change=on_criteria />
            <LogList state=view_state on_load_more=Callback::new(move |_: ()| load_more()) />
            <HealthFooter health=health />
        </div>
    }
}
