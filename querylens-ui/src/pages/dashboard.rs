//! Dashboard Page
//!
//! Tenant analytics: KPI cards, confidence distribution, query trend,
//! user table and the selected user's drilldown.

use leptos::*;

use querylens::Event;

use crate::components::{
    ConfidenceChart, DonutSkeleton, DrilldownPanel, Filters, KeyInsightsPanel, MetricCards,
    Recommendations, TableSkeleton, TrendChart, TrendSkeleton, UserDetailDialog, UserTable,
};
use crate::state::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let model = create_memo(move |_| state.view_model());

    // Every mount starts fresh loads; unmount makes in-flight results stale
    state.dispatch(Event::Start);
    on_cleanup(move || state.dispatch(Event::TearDown));

    let first_load = move || model.with(|m| m.loading_dashboard) && state.view.with(|v| v.dashboard().is_none());

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Query Analytics"</h1>
                <p class="text-gray-400 mt-1">{move || model.with(|m| m.header())}</p>
            </div>

            <Filters model=model />

            <section>
                <MetricCards model=model />
            </section>

            <div class="grid md:grid-cols-2 gap-8">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Confidence Distribution"</h2>
                    {move || {
                        if first_load() {
                            view! { <DonutSkeleton /> }.into_view()
                        } else {
                            view! { <ConfidenceChart model=model /> }.into_view()
                        }
                    }}
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Key Insights"</h2>
                    <KeyInsightsPanel model=model />
                    <h3 class="text-lg font-semibold mt-6 mb-2">"User Drilldown"</h3>
                    <DrilldownPanel />
                </section>
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Query Trend"</h2>
                {move || {
                    if first_load() {
                        view! { <TrendSkeleton /> }.into_view()
                    } else {
                        view! { <TrendChart model=model /> }.into_view()
                    }
                }}
            </section>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"User Query Statistics"</h2>
                {move || {
                    if model.with(|m| m.loading_tenants) && state.view.with(|v| v.tenants().is_empty()) {
                        let rows = state.table.with(|table| table.page_size);
                        view! { <TableSkeleton rows=rows /> }.into_view()
                    } else {
                        view! { <UserTable model=model /> }.into_view()
                    }
                }}
            </section>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Recommendations"</h2>
                <Recommendations model=model />
            </section>

            <UserDetailDialog />
        </div>
    }
}
