//! Metric Card Component
//!
//! The four KPI cards above the charts.

use leptos::*;

use querylens::view_model::MetricCard as CardData;
use querylens::ViewModel;

use super::loading::CardSkeleton;

/// Row of KPI cards; skeletons until the first snapshot arrives
#[component]
pub fn MetricCards(model: Memo<ViewModel>) -> impl IntoView {
    let state = expect_context::<crate::state::GlobalState>();

    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {move || {
                let first_load = state
                    .view
                    .with(|view| view.dashboard().is_none() && model.with(|m| m.loading_dashboard));
                if first_load {
                    (0..4).map(|_| view! { <CardSkeleton /> }).collect_view()
                } else {
                    model
                        .with(|m| m.cards.clone())
                        .into_iter()
                        .map(|card| view! { <MetricCard card=card /> })
                        .collect_view()
                }
            }}
        </div>
    }
}

/// Single KPI card
#[component]
pub fn MetricCard(card: CardData) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <span class="text-gray-400 text-sm">{card.title}</span>
            <div class="text-3xl font-bold mt-2">{card.value}</div>
            <div class="text-sm text-gray-500 mt-2">{card.subtitle}</div>
        </div>
    }
}
