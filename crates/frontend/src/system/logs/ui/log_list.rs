use chrono::Utc;
use leptos::prelude::*;
use thaw::*;

use crate::system::logs::orchestrator::LoadPhase;
use crate::system::logs::view::{DashboardView, LogRow};

fn row_view(row: LogRow) -> impl IntoView {
    view! {
        <div class="log-entry">
            <div class="log-entry__head" style="display: flex; gap: 12px; align-items: center;">
                <span class=row.level_class>{row.level.to_uppercase()}</span>
                <span class="log-entry__time" title=row.age.clone()>{row.timestamp}</span>
                <span class="log-entry__service" style="font-weight: 600;">{row.service}</span>
            </div>
            <div class="log-entry__message">{row.message}</div>
            {row.data.map(|data| view! { <pre class="log-entry__data">{data}</pre> })}
        </div>
    }
}

/// Filtered records, or the error box that replaces them after a failed load
#[component]
pub fn LogList(state: RwSignal<DashboardView>, on_load_more: Callback<()>) -> impl IntoView {
    let loading_more = move || state.with(|v| v.phase == LoadPhase::LoadingMore);

    view! {
        <div class="log-list">
            <div class="log-list__meta" style="margin-bottom: 8px; color: var(--colorNeutralForeground3);">
                {move || state.with(|v| {
                    let total = v.backend_total.map(|t| t.to_string()).unwrap_or_else(|| "?".to_string());
                    format!("Showing {} of {} loaded ({} total)", v.logs.len(), v.loaded, total)
                })}
            </div>

            {move || {
                let (error, phase, empty) = state.with(|v| (v.error.clone(), v.phase, v.logs.is_empty()));
                if let Some(err) = error {
                    return view! {
                        <div style="padding: 12px; background: var(--color-error-50); border: 1px solid var(--color-error-100); border-radius: 8px; display: flex; align-items: center; gap: 8px; margin-bottom: 16px;">
                            <span style="color: var(--color-error); font-size: 18px;">"⚠"</span>
                            <span style="color: var(--color-error);">{format!("Failed to load logs: {}", err)}</span>
                        </div>
                    }
                    .into_any();
                }
                if empty && phase == LoadPhase::Loading {
                    return view! {
                        <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small style="padding: 40px;">
                            <Spinner />
                            "Loading..."
                        </Flex>
                    }
                    .into_any();
                }
                if empty {
                    return view! {
                        <div style="padding: 40px; text-align: center; color: var(--colorNeutralForeground3);">
                            "No logs found"
                        </div>
                    }
                    .into_any();
                }
                let now = Utc::now();
                state
                    .with(|v| v.logs.iter().map(|r| LogRow::from_record(r, now)).collect::<Vec<_>>())
                    .into_iter()
                    .map(row_view)
                    .collect_view()
                    .into_any()
            }}

            {move || {
                let show = state.with(|v| v.has_more && v.error.is_none());
                show.then(|| view! {
                    <div style="text-align: center; margin-top: 16px;">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| on_load_more.run(())
                            disabled=Signal::derive(loading_more)
                        >
                            {move || if loading_more() { "Loading..." } else { "Load more" }}
                        </Button>
                    </div>
                })
            }}
        </div>
    }
}
