//! Drilldown Panel Component
//!
//! Counts-only breakdown of the selected user.

use leptos::*;

use querylens::interaction::{
    DRILLDOWN_LOADING, DRILLDOWN_MISSING, SELECT_USER_HINT, SELECT_USER_PROMPT,
};
use querylens::LoadCycle;

use crate::state::GlobalState;

#[component]
pub fn DrilldownPanel() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    move || {
        state.view.with(|view| {
            let Some(user_id) = view.selected_user().user_id() else {
                return view! {
                    <p class="text-gray-300">{SELECT_USER_PROMPT}</p>
                    <p class="text-gray-500 text-sm mt-1">{SELECT_USER_HINT}</p>
                }
                .into_view();
            };

            if view.slot_loading(LoadCycle::Drilldown) {
                return view! { <p class="text-gray-400">{DRILLDOWN_LOADING}</p> }.into_view();
            }

            match view.drilldown().filter(|d| d.user_id == user_id && !d.breakdown.is_empty()) {
                Some(drilldown) => view! {
                    <p class="text-sm text-gray-400">
                        {format!(
                            "{} queries • {:.1}% success rate",
                            drilldown.total_queries, drilldown.success_rate_pct
                        )}
                    </p>
                    <ul class="mt-3 space-y-1">
                        {drilldown
                            .breakdown
                            .iter()
                            .map(|entry| view! {
                                <li class="flex justify-between text-sm">
                                    <span>{entry.label.clone()}</span>
                                    <span class="font-semibold">{entry.count}</span>
                                </li>
                            })
                            .collect_view()}
                    </ul>
                }
                .into_view(),
                None => view! { <p class="text-red-400">{DRILLDOWN_MISSING}</p> }.into_view(),
            }
        })
    }
}
