use contracts::system::logs::response::HealthResponse;
use leptos::prelude::*;

use crate::system::logs::view::DashboardView;

/// Last known backend health
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HealthState {
    #[default]
    Unknown,
    Checked(Result<HealthResponse, String>),
}

pub fn create_view_state() -> RwSignal<DashboardView> {
    RwSignal::new(DashboardView::default())
}

pub fn create_health_state() -> RwSignal<HealthState> {
    RwSignal::new(HealthState::default())
}
