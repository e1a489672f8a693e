use leptos::prelude::*;
use thaw::*;

use super::state::HealthState;

#[component]
pub fn HealthFooter(health: RwSignal<HealthState>) -> impl IntoView {
    view! {
        <div class="log-footer" style="margin-top: 24px; font-size: 0.85em; color: var(--colorNeutralForeground3);">
            {move || match health.get() {
                HealthState::Unknown => view! { <Badge appearance=BadgeAppearance::Tint>"Backend: checking..."</Badge> }.into_any(),
                HealthState::Checked(Ok(h)) if h.is_ok() => view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                        {format!("Backend: {} / database: {}", h.status, h.database)}
                    </Badge>
                }
                .into_any(),
                HealthState::Checked(Ok(h)) => {
                    let detail = h.error.unwrap_or(h.database);
                    view! {
                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>
                            {format!("Backend: {} ({})", h.status, detail)}
                        </Badge>
                    }
                    .into_any()
                }
                HealthState::Checked(Err(e)) => view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>
                        {format!("Backend unreachable: {}", e)}
                    </Badge>
                }
                .into_any(),
            }}
        </div>
    }
}
