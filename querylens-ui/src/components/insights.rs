//! Insights Components
//!
//! Key-insight badges and the static recommendations list.

use leptos::*;

use querylens::ViewModel;

#[component]
pub fn KeyInsightsPanel(model: Memo<ViewModel>) -> impl IntoView {
    let insights = move || model.with(|m| m.insights.clone());

    view! {
        <div class="grid grid-cols-3 gap-4 text-center">
            <div class="bg-gray-700 rounded-lg p-3">
                <div class="text-2xl font-bold text-green-400">
                    {move || format!("{}%", insights().high_confidence_pct)}
                </div>
                <div class="text-xs text-gray-400">"High Confidence Queries"</div>
            </div>
            <div class="bg-gray-700 rounded-lg p-3">
                <div class="text-2xl font-bold">{move || insights().users_above_90}</div>
                <div class="text-xs text-gray-400">"Users with 90%+ success rate"</div>
            </div>
            <div class="bg-gray-700 rounded-lg p-3">
                <div class="text-2xl font-bold text-yellow-400">
                    {move || insights().users_needing_attention}
                </div>
                <div class="text-xs text-gray-400">"Users need attention"</div>
            </div>
        </div>
    }
}

#[component]
pub fn Recommendations(model: Memo<ViewModel>) -> impl IntoView {
    view! {
        <ul class="space-y-2 text-sm text-gray-300">
            {move || {
                model
                    .with(|m| m.recommendations.clone())
                    .into_iter()
                    .map(|text| view! {
                        <li class="flex space-x-2">
                            <span class="text-primary-400">"•"</span>
                            <span>{text}</span>
                        </li>
                    })
                    .collect_view()
            }}
        </ul>
    }
}
