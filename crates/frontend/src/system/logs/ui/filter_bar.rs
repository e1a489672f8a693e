use contracts::enums::log_level::LogLevel;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;

use crate::system::logs::filter::FilterCriteria;
use crate::system::logs::view::DashboardView;

/// Level and service dropdowns plus free-text search.
///
/// Every edit sends the full criteria up; filtering itself happens in the session.
#[component]
pub fn FilterBar(state: RwSignal<DashboardView>, on_change: Callback<FilterCriteria>) -> impl IntoView {
    let criteria = move || state.with(|v| v.criteria.clone());
    let search = RwSignal::new(String::new());

    Effect::new(move |_| {
        let term = search.get();
        let mut next = state.with_untracked(|v| v.criteria.clone());
        if next.search != term {
            next.search = term;
            on_change.run(next);
        }
    });

    let set_level = move |ev: ev::Event| {
        let mut next = criteria();
        next.level = event_target_value(&ev);
        on_change.run(next);
    };

    let set_service = move |ev: ev::Event| {
        let mut next = criteria();
        next.service = event_target_value(&ev);
        on_change.run(next);
    };

    let reset = move |_| {
        search.set(String::new());
        on_change.run(FilterCriteria::default());
    };

    view! {
        <Flex align=FlexAlign::Center gap=FlexGap::Medium style="margin-bottom: 16px;">
            <select
                class="log-filter__level"
                on:change=set_level
                prop:value=move || state.with(|v| v.criteria.level.clone())
            >
                <option value="">"All levels"</option>
                {LogLevel::all()
                    .into_iter()
                    .map(|level| view! { <option value=level.code().to_string()>{level.display_name().to_string()}</option> })
                    .collect_view()}
            </select>
            <select
                class="log-filter__service"
                on:change=set_service
                prop:value=move || state.with(|v| v.criteria.service.clone())
            >
                <option value="">"All services"</option>
                {move || {
                    state.with(|v| v.service_options.clone())
                        .into_iter()
                        .map(|service| {
                            let label = service.clone();
                            view! { <option value=service>{label}</option> }
                        })
                        .collect_view()
                }}
            </select>
            <Input value=search placeholder="Search messages..." />
            {move || {
                let active = state.with(|v| v.criteria.active_count());
                (active > 0).then(|| view! {
                    <Button appearance=ButtonAppearance::Transparent on_click=reset>
                        {format!("Reset filters ({})", active)}
                    </Button>
                })
            }}
        </Flex>
    }
}
