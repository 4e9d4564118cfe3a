//! Toast Notification Component
//!
//! Renders the notices raised by load cycles and gated actions.

use leptos::*;

use querylens::NoticeLevel;

use crate::state::global::{GlobalState, Toast};

/// Toast notification container
#[component]
pub fn Toasts() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="fixed bottom-20 right-4 z-50 space-y-2 max-w-md">
            {move || {
                state
                    .toasts
                    .get()
                    .into_iter()
                    .map(|toast| view! { <ToastMessage toast=toast /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn ToastMessage(toast: Toast) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let (icon, bg_class) = match toast.notice.level {
        NoticeLevel::Info => ("ℹ", "bg-blue-600"),
        NoticeLevel::Error => ("✕", "bg-red-600"),
    };
    let id = toast.id;

    view! {
        <div
            class=format!(
                "flex items-start space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg \
                 transform transition-all duration-300 ease-out animate-slide-in cursor-pointer",
                bg_class
            )
            on:click=move |_| state.dismiss(id)
        >
            <span class="text-lg">{icon}</span>
            <div>
                <div class="text-sm font-medium">{toast.notice.title}</div>
                {toast.notice.description.map(|text| view! {
                    <div class="text-xs opacity-90 mt-1">{text}</div>
                })}
            </div>
        </div>
    }
}
