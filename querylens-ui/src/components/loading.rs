//! Placeholders for the dashboard panels while the first snapshot loads.

use leptos::*;

use querylens::metrics::ConfidenceLevel;

/// Relative heights (percent of the plot area) of the trend placeholder bars
pub fn placeholder_bar_heights(count: usize) -> Vec<u32> {
    (0..count)
        .map(|i| 30 + ((i as u32 * 37) % 60))
        .collect()
}

/// Same shape as a KPI card: title, value, subtitle
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700 animate-pulse">
            <div class="h-3 bg-gray-700 rounded w-24" />
            <div class="h-8 bg-gray-700 rounded w-20 mt-3" />
            <div class="h-3 bg-gray-700 rounded w-32 mt-3" />
        </div>
    }
}

/// Donut ring with one legend row per confidence level
#[component]
pub fn DonutSkeleton() -> impl IntoView {
    view! {
        <div class="flex items-center gap-8 animate-pulse">
            <div class="w-48 h-48 rounded-full border-[24px] border-gray-700" />
            <ul class="space-y-3">
                {ConfidenceLevel::all()
                    .iter()
                    .map(|_| view! {
                        <li class="flex items-center gap-2">
                            <span class="w-3 h-3 rounded-full bg-gray-700" />
                            <span class="h-3 bg-gray-700 rounded w-28" />
                        </li>
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

/// Daily bars over an empty axis
#[component]
pub fn TrendSkeleton() -> impl IntoView {
    view! {
        <div class="h-64 flex items-end gap-1 border-l border-b border-gray-700 px-2 animate-pulse">
            {placeholder_bar_heights(30)
                .into_iter()
                .map(|height| view! {
                    <div class="flex-1 bg-gray-700 rounded-t" style=format!("height: {}%", height) />
                })
                .collect_view()}
        </div>
    }
}

/// One grey row per table row the current page will hold
#[component]
pub fn TableSkeleton(rows: usize) -> impl IntoView {
    view! {
        <div class="space-y-2 animate-pulse">
            <div class="h-4 bg-gray-700 rounded w-full" />
            {(0..rows)
                .map(|_| view! { <div class="h-8 bg-gray-700/60 rounded w-full" /> })
                .collect_view()}
        </div>
    }
}
