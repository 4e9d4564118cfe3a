//! Global Application State
//!
//! Reactive wrapper around the core `ViewState`: events go in through
//! [`GlobalState::dispatch`], fetch effects run on `spawn_local`, notices
//! become toasts.

use leptos::*;

use querylens::detail::UserDetail;
use querylens::model::DatePreset;
use querylens::{Effect, Event, Notice, TableState, ViewModel, ViewSettings, ViewState};

use crate::api;

/// How long a toast stays up, in milliseconds
const INFO_TOAST_MS: u32 = 3000;
const ERROR_TOAST_MS: u32 = 5000;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Filters, tenant list and the three load cycles
    pub view: RwSignal<ViewState>,
    /// Sort and paging of the user table
    pub table: RwSignal<TableState>,
    /// User whose detail dialog is open
    pub detail: RwSignal<Option<UserDetail>>,
    /// Visible notices, oldest first
    pub toasts: RwSignal<Vec<Toast>>,
    next_toast_id: StoredValue<u64>,
}

/// A notice on screen
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let today = chrono::Utc::now().date_naive();
    let view = ViewState::new(ViewSettings::default(), DatePreset::Last30.window(today));

    let state = GlobalState {
        view: create_rw_signal(view),
        table: create_rw_signal(TableState::default()),
        detail: create_rw_signal(None),
        toasts: create_rw_signal(Vec::new()),
        next_toast_id: store_value(0),
    };

    provide_context(state);
}

impl GlobalState {
    /// Apply an event and start whatever it asks for
    pub fn dispatch(self, event: Event) {
        let effects = self
            .view
            .try_update(|view| view.handle(event))
            .unwrap_or_default();

        for effect in effects {
            match effect {
                Effect::Fetch(request) => {
                    spawn_local(async move {
                        let completion = api::execute(request).await;
                        self.dispatch(completion);
                    });
                }
                Effect::Notify(notice) => self.notify(notice),
            }
        }
    }

    /// Render-ready projection of the current state
    pub fn view_model(self) -> ViewModel {
        self.view
            .with(|view| self.table.with(|table| ViewModel::build(view, table)))
    }

    /// Show a notice (auto-clears after timeout)
    pub fn notify(self, notice: Notice) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id + 1);

        if notice.is_error() {
            web_sys::console::warn_1(&notice.to_string().into());
        }
        let timeout = if notice.is_error() {
            ERROR_TOAST_MS
        } else {
            INFO_TOAST_MS
        };
        self.toasts.update(|toasts| toasts.push(Toast { id, notice }));

        let toasts = self.toasts;
        gloo_timers::callback::Timeout::new(timeout, move || {
            toasts.update(|toasts| toasts.retain(|t| t.id != id));
        })
        .forget();
    }

    pub fn dismiss(self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    /// Any change to the row set starts the table over at page one
    pub fn dispatch_and_rewind(self, event: Event) {
        self.table.update(|table| table.first_page());
        self.dispatch(event);
    }
}
