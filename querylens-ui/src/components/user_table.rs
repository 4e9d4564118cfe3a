//! User Table Component
//!
//! Sortable, paginated per-user statistics. Clicking a row opens the
//! detail dialog.

use leptos::*;

use querylens::detail::{RowBadge, SuccessTier, UserDetail};
use querylens::table::{SortDirection, SortKey, PAGE_SIZES};
use querylens::view_model::RowView;
use querylens::ViewModel;

use crate::state::GlobalState;

#[component]
pub fn UserTable(model: Memo<ViewModel>) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let total_pages = move || model.with(|m| m.table.total_pages);

    let on_page_size = move |ev: ev::Event| {
        let Ok(size) = event_target_value(&ev).parse::<usize>() else {
            return;
        };
        if let Some(Err(err)) = state.table.try_update(|table| table.set_page_size(size)) {
            state.notify(querylens::Notice::error(err.to_string()));
        }
    };

    view! {
        <div class="overflow-x-auto">
            <table class="w-full text-sm">
                <thead>
                    <tr class="text-left text-gray-400 border-b border-gray-700">
                        <SortHeader model=model key=SortKey::UserId />
                        <SortHeader model=model key=SortKey::UserName />
                        <SortHeader model=model key=SortKey::TotalQueries />
                        <SortHeader model=model key=SortKey::FailedQueries />
                        <SortHeader model=model key=SortKey::SuccessRate />
                        <SortHeader model=model key=SortKey::HighConfidence />
                        <SortHeader model=model key=SortKey::MediumConfidence />
                        <SortHeader model=model key=SortKey::LowConfidence />
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = model.with(|m| m.rows.clone());
                        if rows.is_empty() {
                            view! {
                                <tr>
                                    <td colspan="8" class="py-8 text-center text-gray-400">
                                        "No users found"
                                    </td>
                                </tr>
                            }
                            .into_view()
                        } else {
                            rows.into_iter()
                                .map(|row| view! { <UserRowView row=row /> })
                                .collect_view()
                        }
                    }}
                </tbody>
            </table>

            <div class="flex flex-wrap items-center justify-between gap-4 mt-4 text-sm">
                <div class="flex items-center space-x-2">
                    <span class="text-gray-400">"Rows per page"</span>
                    <select
                        class="bg-gray-700 rounded px-2 py-1"
                        prop:value=move || state.table.with(|t| t.page_size.to_string())
                        on:change=on_page_size
                    >
                        {PAGE_SIZES
                            .iter()
                            .map(|size| view! { <option value=size.to_string()>{*size}</option> })
                            .collect_view()}
                    </select>
                </div>

                <span class="text-gray-400">{move || model.with(|m| m.table.status_line())}</span>

                <div class="flex space-x-1">
                    <PageButton
                        label="«"
                        enabled=Signal::derive(move || model.with(|m| m.table.can_previous))
                        on_press=move || state.table.update(|t| t.first_page())
                    />
                    <PageButton
                        label="‹"
                        enabled=Signal::derive(move || model.with(|m| m.table.can_previous))
                        on_press=move || state.table.update(|t| t.previous_page())
                    />
                    <PageButton
                        label="›"
                        enabled=Signal::derive(move || model.with(|m| m.table.can_next))
                        on_press=move || state.table.update(|t| t.next_page(total_pages()))
                    />
                    <PageButton
                        label="»"
                        enabled=Signal::derive(move || model.with(|m| m.table.can_next))
                        on_press=move || state.table.update(|t| t.last_page(total_pages()))
                    />
                </div>
            </div>
        </div>
    }
}

/// Column header; clicking toggles the sort
#[component]
fn SortHeader(model: Memo<ViewModel>, key: SortKey) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let arrow = move || {
        model.with(|m| {
            if m.table.sort_key != key {
                ""
            } else if m.table.direction == SortDirection::Ascending {
                " ↑"
            } else {
                " ↓"
            }
        })
    };

    view! {
        <th
            class="py-2 px-3 cursor-pointer select-none hover:text-white"
            on:click=move |_| state.table.update(|t| t.toggle_sort(key))
        >
            {key.label()}
            {arrow}
        </th>
    }
}

#[component]
fn UserRowView(row: RowView) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let detail = UserDetail::from_row(&row.row);
    let tier_class = match row.tier {
        SuccessTier::Good => "bg-green-900 text-green-300",
        SuccessTier::Fair => "bg-yellow-900 text-yellow-300",
        SuccessTier::Poor => "bg-red-900 text-red-300",
    };
    let confidence = |count: u64| {
        if row.row.confidence_reported {
            count.to_string()
        } else {
            "—".to_string()
        }
    };
    let r = &row.row;

    view! {
        <tr
            class="border-b border-gray-800 hover:bg-gray-750 cursor-pointer"
            on:click=move |_| state.detail.set(Some(detail.clone()))
        >
            <td class="py-2 px-3 text-gray-400">{r.user_id.clone()}</td>
            <td class="py-2 px-3">
                {r.user_name.clone()}
                {row.badges
                    .iter()
                    .map(|badge| {
                        let class = match badge {
                            RowBadge::Top => "ml-2 px-2 rounded text-xs bg-primary-600",
                            RowBadge::Low => "ml-2 px-2 rounded text-xs bg-gray-600",
                        };
                        view! { <span class=class>{badge.label()}</span> }
                    })
                    .collect_view()}
            </td>
            <td class="py-2 px-3">{r.total_queries}</td>
            <td class="py-2 px-3">{r.failed_queries}</td>
            <td class="py-2 px-3">
                <span class=format!("px-2 rounded {}", tier_class)>{format!("{}%", r.success_rate)}</span>
            </td>
            <td class="py-2 px-3">{confidence(r.high_confidence)}</td>
            <td class="py-2 px-3">{confidence(r.medium_confidence)}</td>
            <td class="py-2 px-3">{confidence(r.low_confidence)}</td>
        </tr>
    }
}

#[component]
fn PageButton<F>(label: &'static str, enabled: Signal<bool>, on_press: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <button
            class="px-3 py-1 rounded bg-gray-700 hover:bg-gray-600 disabled:opacity-40"
            disabled=move || !enabled.get()
            on:click=move |_| on_press()
        >
            {label}
        </button>
    }
}
