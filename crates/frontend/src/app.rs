use crate::system::logs::ui::LogDashboard;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <LogDashboard />
        </ConfigProvider>
    }
}
