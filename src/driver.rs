//! Async host for [`ViewState`]
//!
//! Runs the fetch effects of each transition on a tokio `JoinSet` and feeds
//! the completions back in as events, in completion order. Notices are
//! collected for the caller to display.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::client::AnalyticsApi;
use crate::view::{Effect, Event, FetchRequest, Notice, ViewState};

/// Perform one fetch and wrap the outcome as the matching completion event
pub async fn execute<A: AnalyticsApi + ?Sized>(api: &A, request: FetchRequest) -> Event {
    match request {
        FetchRequest::Tenants { token, query } => Event::TenantsLoaded {
            token,
            result: api.fetch_tenants(&query).await,
        },
        FetchRequest::Dashboard { token, query } => Event::DashboardLoaded {
            token,
            result: api.fetch_dashboard(&query).await,
        },
        FetchRequest::Drilldown { token, query } => Event::DrilldownLoaded {
            token,
            result: api.fetch_user_drilldown(&query).await,
        },
    }
}

pub struct Driver<A: AnalyticsApi + ?Sized + 'static> {
    api: Arc<A>,
    view: ViewState,
    tasks: JoinSet<Event>,
    notices: Vec<Notice>,
}

impl<A: AnalyticsApi + ?Sized + 'static> Driver<A> {
    pub fn new(api: Arc<A>, view: ViewState) -> Self {
        Self {
            api,
            view,
            tasks: JoinSet::new(),
            notices: Vec::new(),
        }
    }

    /// Apply an event and start whatever it asks for
    pub fn dispatch(&mut self, event: Event) {
        for effect in self.view.handle(event) {
            match effect {
                Effect::Fetch(request) => self.spawn(request),
                Effect::Notify(notice) => {
                    tracing::debug!(title = %notice.title, "Notice");
                    self.notices.push(notice);
                }
            }
        }
    }

    fn spawn(&mut self, request: FetchRequest) {
        let token = request.token();
        tracing::debug!(
            cycle = token.cycle.as_str(),
            generation = token.generation,
            "Starting load"
        );
        let api = Arc::clone(&self.api);
        self.tasks.spawn(async move { execute(api.as_ref(), request).await });
    }

    /// Wait for the next completion and apply it
    ///
    /// Returns `false` once nothing is in flight.
    pub async fn step(&mut self) -> bool {
        match self.tasks.join_next().await {
            Some(Ok(event)) => {
                self.dispatch(event);
                true
            }
            Some(Err(err)) => {
                tracing::error!(error = %err, "Load task aborted");
                true
            }
            None => false,
        }
    }

    /// Process completions until no load is in flight
    pub async fn run_until_idle(&mut self) {
        while self.step().await {}
    }

    /// Number of fetches still running, stale ones included
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn into_view(self) -> ViewState {
        self.view
    }
}
