//! Filter Bar Component
//!
//! Date window (inputs and presets), tenant and user selection.

use leptos::*;

use querylens::model::{parse_date, DatePreset, UserSelection};
use querylens::{Event, Notice, ViewModel};

use crate::state::GlobalState;

#[component]
pub fn Filters(model: Memo<ViewModel>) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-4 flex flex-wrap items-end gap-4">
            <DateRange />
            <TenantSelect />
            <UserSelect model=model />
        </div>
    }
}

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

#[component]
fn DateRange() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let on_date = move |bound: Bound, value: String| {
        let date = match parse_date(&value) {
            Ok(date) => date,
            Err(err) => {
                state.notify(Notice::error("Invalid date range").with_description(err.to_string()));
                return;
            }
        };
        let window = state.view.with_untracked(|view| view.window());
        let (start, end) = match bound {
            Bound::Start => (date, window.end()),
            Bound::End => (window.start(), date),
        };
        state.dispatch_and_rewind(Event::DateWindowChanged { start, end });
    };

    let on_preset = move |preset: DatePreset| {
        let window = preset.window(chrono::Utc::now().date_naive());
        state.dispatch_and_rewind(Event::DateWindowChanged {
            start: window.start(),
            end: window.end(),
        });
    };

    view! {
        <div class="flex items-end gap-2">
            <label class="flex flex-col text-sm text-gray-400">
                "Start date"
                <input
                    type="date"
                    class="bg-gray-700 text-white rounded px-2 py-1 mt-1"
                    prop:value=move || state.view.with(|v| v.window().start_param())
                    on:change=move |ev| on_date(Bound::Start, event_target_value(&ev))
                />
            </label>
            <label class="flex flex-col text-sm text-gray-400">
                "End date"
                <input
                    type="date"
                    class="bg-gray-700 text-white rounded px-2 py-1 mt-1"
                    prop:value=move || state.view.with(|v| v.window().end_param())
                    on:change=move |ev| on_date(Bound::End, event_target_value(&ev))
                />
            </label>
            <div class="flex space-x-1">
                {DatePreset::all()
                    .iter()
                    .map(|&preset| {
                        let is_active = move || {
                            let today = chrono::Utc::now().date_naive();
                            state.view.with(|v| v.window() == preset.window(today))
                        };
                        view! {
                            <button
                                class=move || {
                                    let base = "px-3 py-1 rounded-lg text-sm font-medium transition-colors";
                                    if is_active() {
                                        format!("{} bg-primary-600 text-white", base)
                                    } else {
                                        format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                                    }
                                }
                                on:click=move |_| on_preset(preset)
                            >
                                {preset.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn TenantSelect() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <label class="flex flex-col text-sm text-gray-400">
            "Tenant"
            <select
                class="bg-gray-700 text-white rounded px-2 py-1 mt-1 min-w-[12rem]"
                prop:value=move || state.view.with(|v| v.tenant_id().unwrap_or_default().to_string())
                on:change=move |ev| state.dispatch_and_rewind(Event::TenantSelected(event_target_value(&ev)))
            >
                {move || {
                    state.view.with(|v| {
                        if v.tenants().is_empty() {
                            return view! { <option value="">"No tenants"</option> }.into_view();
                        }
                        v.tenants()
                            .iter()
                            .map(|t| view! { <option value=t.id.clone()>{t.name.clone()}</option> })
                            .collect_view()
                    })
                }}
            </select>
        </label>
    }
}

#[component]
fn UserSelect(model: Memo<ViewModel>) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <label class="flex flex-col text-sm text-gray-400">
            "User"
            <select
                class="bg-gray-700 text-white rounded px-2 py-1 mt-1 min-w-[12rem]"
                prop:value=move || state.view.with(|v| v.selected_user().as_value().to_string())
                on:change=move |ev| {
                    let selection = UserSelection::from_value(&event_target_value(&ev));
                    state.dispatch_and_rewind(Event::UserSelected(selection));
                }
            >
                {move || {
                    model
                        .with(|m| m.user_options.clone())
                        .into_iter()
                        .map(|o| view! { <option value=o.value>{o.label}</option> })
                        .collect_view()
                }}
            </select>
        </label>
    }
}
