//! User Detail Dialog
//!
//! Confidence breakdown of one user, opened from the user table.

use leptos::*;

use querylens::detail::{SegmentKind, UserDetail};

use crate::state::GlobalState;

#[component]
pub fn UserDetailDialog() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    move || {
        state.detail.get().map(|detail| {
            view! {
                <div
                    class="fixed inset-0 z-40 bg-black/60 flex items-center justify-center"
                    on:click=move |_| state.detail.set(None)
                >
                    <div
                        class="bg-gray-800 rounded-xl p-6 w-full max-w-lg"
                        on:click=|ev| ev.stop_propagation()
                    >
                        <DetailBody detail=detail />
                        <div class="flex justify-end mt-6">
                            <button
                                class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg"
                                on:click=move |_| state.detail.set(None)
                            >
                                "Close"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

#[component]
fn DetailBody(detail: UserDetail) -> impl IntoView {
    let title = detail.title();

    view! {
        <h2 class="text-xl font-semibold">{title}</h2>
        <p class="text-gray-400 text-sm mt-1">
            {format!(
                "{} total queries • {}% success rate",
                detail.total_queries, detail.success_rate
            )}
        </p>

        {(!detail.confidence_reported).then(|| view! {
            <p class="text-yellow-400 text-xs mt-2">
                "Confidence counts were not reported for this user."
            </p>
        })}

        <div class="space-y-4 mt-6">
            {detail
                .segments
                .into_iter()
                .map(|segment| {
                    let color = match segment.kind {
                        SegmentKind::Confidence(level) => level.color(),
                        SegmentKind::Failed => "#6b7280",
                    };
                    view! {
                        <div>
                            <div class="flex justify-between text-sm">
                                <span>{segment.label}</span>
                                <span class="text-gray-400">{segment.summary()}</span>
                            </div>
                            <div class="h-2 bg-gray-700 rounded mt-1">
                                <div
                                    class="h-2 rounded"
                                    style=format!(
                                        "width: {:.1}%; background-color: {}",
                                        segment.bar_width_pct(),
                                        color
                                    )
                                />
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
