use chrono::Utc;
use leptos::prelude::*;

use crate::system::logs::view::{DashboardView, HeaderSummary};

#[component]
fn HeaderCard(label: &'static str, #[prop(into)] value: Signal<String>, modifier: &'static str) -> impl IntoView {
    view! {
        <div class=format!("stat-card {}", modifier)>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{move || value.get()}</div>
            </div>
        </div>
    }
}

/// Totals, error/warning counts, last log age and the busiest services
#[component]
pub fn StatsHeader(state: RwSignal<DashboardView>) -> impl IntoView {
    let summary = Memo::new(move |_| state.with(|v| HeaderSummary::from_stats(v.stats.as_ref(), Utc::now())));

    view! {
        <div class="log-stats" style="display: flex; gap: 12px; flex-wrap: wrap; margin-bottom: 16px;">
            <HeaderCard label="Total logs" value=Signal::derive(move || summary.with(|s| s.total.to_string())) modifier="" />
            <HeaderCard
                label="Errors"
                value=Signal::derive(move || summary.with(|s| s.errors.to_string()))
                modifier="stat-card--error"
            />
            <HeaderCard
                label="Warnings"
                value=Signal::derive(move || summary.with(|s| s.warnings.to_string()))
                modifier="stat-card--warning"
            />
            <HeaderCard
                label="Last log"
                value=Signal::derive(move || summary.with(|s| s.last_log.label().to_string()))
                modifier=""
            />
        </div>
        {move || {
            let services = summary.with(|s| s.top_services.clone());
            (!services.is_empty()).then(|| view! {
                <div class="log-services" style="margin-bottom: 16px; font-size: 0.9em; color: var(--colorNeutralForeground2);">
                    "Services: "
                    {services
                        .into_iter()
                        .map(|(name, count)| view! { <span class="log-services__item">{format!("{} ({}) ", name, count)}</span> })
                        .collect_view()}
                </div>
            })
        }}
    }
}
