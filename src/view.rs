//! Dashboard view state
//!
//! `ViewState` owns the filter inputs and the three load cycles (tenant list,
//! dashboard snapshot, user drilldown). Every input change goes through
//! [`ViewState::handle`], which mutates the state and returns the effects a
//! host must carry out: fetches to start and notices to show.
//!
//! Each cycle lives in a [`LoadSlot`] with a generation counter. Starting a
//! load hands out a [`LoadToken`]; a completion whose token is no longer
//! current is dropped without touching the state.

use serde::{Deserialize, Serialize};

use crate::decode::DashboardSnapshot;
use crate::dto::UserDrilldown;
use crate::error::{ApiError, ApiResult};
use crate::model::{DateWindow, TenantSummary, UserSelection};
use crate::query::{DashboardQuery, DrilldownQuery, TenantQuery};

/// The three independent load cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadCycle {
    Tenants,
    Dashboard,
    Drilldown,
}

impl LoadCycle {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadCycle::Tenants => "tenants",
            LoadCycle::Dashboard => "dashboard",
            LoadCycle::Drilldown => "drilldown",
        }
    }

    /// Title of the notice shown when this cycle fails
    pub fn failure_title(self) -> &'static str {
        match self {
            LoadCycle::Tenants => "Failed to load tenants",
            LoadCycle::Dashboard => "Failed to load dashboard",
            LoadCycle::Drilldown => "Failed to load user drilldown",
        }
    }
}

/// Ticket identifying one started load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadToken {
    pub cycle: LoadCycle,
    pub generation: u64,
}

/// Value, in-flight flag and generation of one load cycle
#[derive(Debug, Clone)]
pub struct LoadSlot<T> {
    cycle: LoadCycle,
    value: Option<T>,
    loading: bool,
    generation: u64,
    last_error: Option<ApiError>,
}

impl<T> LoadSlot<T> {
    pub fn new(cycle: LoadCycle) -> Self {
        Self {
            cycle,
            value: None,
            loading: false,
            generation: 0,
            last_error: None,
        }
    }

    /// Start a load; any load already in flight becomes stale
    pub fn begin(&mut self) -> LoadToken {
        self.generation += 1;
        self.loading = true;
        LoadToken {
            cycle: self.cycle,
            generation: self.generation,
        }
    }

    /// Whether a completion carrying `token` is still wanted
    pub fn accepts(&self, token: LoadToken) -> bool {
        token.cycle == self.cycle && token.generation == self.generation
    }

    /// Invalidate in-flight loads without touching the value
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    /// Invalidate in-flight loads and drop the value
    pub fn clear(&mut self) {
        self.invalidate();
        self.value = None;
        self.last_error = None;
    }

    fn succeed(&mut self, value: T) {
        self.value = Some(value);
        self.loading = false;
        self.last_error = None;
    }

    fn fail(&mut self, error: ApiError, keep_value: bool) {
        if !keep_value {
            self.value = None;
        }
        self.loading = false;
        self.last_error = Some(error);
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Error of the most recent completed load, cleared by the next success
    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }
}

/// Severity of a transient notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient, user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.title, description),
            None => write!(f, "{}", self.title),
        }
    }
}

/// A fetch the host must perform, tagged with the token to report back with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Tenants { token: LoadToken, query: TenantQuery },
    Dashboard { token: LoadToken, query: DashboardQuery },
    Drilldown { token: LoadToken, query: DrilldownQuery },
}

impl FetchRequest {
    pub fn token(&self) -> LoadToken {
        match self {
            FetchRequest::Tenants { token, .. }
            | FetchRequest::Dashboard { token, .. }
            | FetchRequest::Drilldown { token, .. } => *token,
        }
    }
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(FetchRequest),
    Notify(Notice),
}

/// Inputs to [`ViewState::handle`]
#[derive(Debug, Clone)]
pub enum Event {
    /// The view was mounted; kicks off the first loads
    Start,
    DateWindowChanged {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    TenantSelected(String),
    UserSelected(UserSelection),
    TenantsLoaded {
        token: LoadToken,
        result: ApiResult<Vec<TenantSummary>>,
    },
    DashboardLoaded {
        token: LoadToken,
        result: ApiResult<DashboardSnapshot>,
    },
    DrilldownLoaded {
        token: LoadToken,
        result: ApiResult<UserDrilldown>,
    },
    /// The view went away; every pending result becomes stale and only a
    /// later `Start` (remount) is handled
    TearDown,
}

/// Request parameters that are not part of the filter inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub tenant_limit: u32,
    pub tenant_sort: String,
    pub snapshot_page: u32,
    pub snapshot_page_size: u32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            tenant_limit: 50,
            tenant_sort: "queries_desc".to_string(),
            snapshot_page: 1,
            snapshot_page_size: 25,
        }
    }
}

/// Complete state of one dashboard view
#[derive(Debug, Clone)]
pub struct ViewState {
    settings: ViewSettings,
    window: DateWindow,
    tenant_id: Option<String>,
    selected_user: UserSelection,
    tenants: LoadSlot<Vec<TenantSummary>>,
    dashboard: LoadSlot<DashboardSnapshot>,
    drilldown: LoadSlot<UserDrilldown>,
    torn_down: bool,
}

impl ViewState {
    pub fn new(settings: ViewSettings, window: DateWindow) -> Self {
        Self {
            settings,
            window,
            tenant_id: None,
            selected_user: UserSelection::All,
            tenants: LoadSlot::new(LoadCycle::Tenants),
            dashboard: LoadSlot::new(LoadCycle::Dashboard),
            drilldown: LoadSlot::new(LoadCycle::Drilldown),
            torn_down: false,
        }
    }

    /// Preselect a tenant before the view starts
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into()).filter(|id: &String| !id.is_empty());
        self
    }

    /// Apply one event and return the effects it requires
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        if self.torn_down {
            if !matches!(event, Event::Start) {
                tracing::debug!(?event, "Ignoring event after teardown");
                return Vec::new();
            }
            // Remount: fresh loads, tokens from before teardown stay stale
            tracing::debug!("Restarting view after teardown");
            self.torn_down = false;
        }

        let mut effects = Vec::new();
        match event {
            Event::Start => {
                self.load_tenants(&mut effects);
                self.load_dashboard(&mut effects);
                self.load_drilldown(&mut effects);
            }
            Event::DateWindowChanged { start, end } => self.change_window(start, end, &mut effects),
            Event::TenantSelected(tenant_id) => {
                if self.tenant_id.as_deref() != Some(tenant_id.as_str()) && !tenant_id.is_empty() {
                    self.tenant_id = Some(tenant_id);
                    self.load_dashboard(&mut effects);
                    self.load_drilldown(&mut effects);
                }
            }
            Event::UserSelected(selection) => {
                if selection != self.selected_user {
                    self.selected_user = selection;
                    self.load_drilldown(&mut effects);
                }
            }
            Event::TenantsLoaded { token, result } => {
                if self.is_stale(token, self.tenants.accepts(token)) {
                    return effects;
                }
                self.tenants_loaded(result, &mut effects);
            }
            Event::DashboardLoaded { token, result } => {
                if self.is_stale(token, self.dashboard.accepts(token)) {
                    return effects;
                }
                self.dashboard_loaded(result, &mut effects);
            }
            Event::DrilldownLoaded { token, result } => {
                if self.is_stale(token, self.drilldown.accepts(token)) {
                    return effects;
                }
                match result {
                    Ok(drilldown) => self.drilldown.succeed(drilldown),
                    Err(err) => {
                        effects.push(failure_notice(LoadCycle::Drilldown, &err));
                        self.drilldown.fail(err, false);
                    }
                }
            }
            Event::TearDown => {
                self.tenants.invalidate();
                self.dashboard.invalidate();
                self.drilldown.invalidate();
                self.torn_down = true;
            }
        }
        effects
    }

    fn is_stale(&self, token: LoadToken, accepted: bool) -> bool {
        if !accepted {
            tracing::debug!(
                cycle = token.cycle.as_str(),
                generation = token.generation,
                "Discarding stale result"
            );
        }
        !accepted
    }

    fn change_window(
        &mut self,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
        effects: &mut Vec<Effect>,
    ) {
        let window = match DateWindow::new(start, end) {
            Ok(window) => window,
            Err(err) => {
                effects.push(Effect::Notify(
                    Notice::error("Invalid date range").with_description(err.to_string()),
                ));
                return;
            }
        };
        if window == self.window {
            return;
        }
        self.window = window;
        self.load_tenants(effects);
        self.load_dashboard(effects);
        self.load_drilldown(effects);
    }

    fn tenants_loaded(&mut self, result: ApiResult<Vec<TenantSummary>>, effects: &mut Vec<Effect>) {
        match result {
            Ok(tenants) => {
                let first = tenants.first().map(|t| t.id.clone());
                self.tenants.succeed(tenants);
                if self.tenant_id.is_none() {
                    if let Some(first) = first {
                        tracing::debug!(tenant_id = %first, "Auto-selecting first tenant");
                        self.tenant_id = Some(first);
                        self.load_dashboard(effects);
                        self.load_drilldown(effects);
                    }
                }
            }
            Err(err) => {
                effects.push(failure_notice(LoadCycle::Tenants, &err));
                self.tenants.fail(err, true);
            }
        }
    }

    fn dashboard_loaded(&mut self, result: ApiResult<DashboardSnapshot>, effects: &mut Vec<Effect>) {
        match result {
            Ok(snapshot) => {
                self.dashboard.succeed(snapshot);
                if !self.selected_user.is_all() {
                    self.selected_user = UserSelection::All;
                    self.load_drilldown(effects);
                }
            }
            Err(err) => {
                effects.push(failure_notice(LoadCycle::Dashboard, &err));
                self.dashboard.fail(err, false);
            }
        }
    }

    fn load_tenants(&mut self, effects: &mut Vec<Effect>) {
        let token = self.tenants.begin();
        effects.push(Effect::Fetch(FetchRequest::Tenants {
            token,
            query: TenantQuery {
                window: Some(self.window),
                limit: Some(self.settings.tenant_limit),
                sort: Some(self.settings.tenant_sort.clone()).filter(|s| !s.is_empty()),
            },
        }));
    }

    fn load_dashboard(&mut self, effects: &mut Vec<Effect>) {
        let Some(tenant_id) = self.tenant_id.clone() else {
            return;
        };
        let token = self.dashboard.begin();
        let query = DashboardQuery::new(tenant_id, self.window)
            .page(self.settings.snapshot_page, self.settings.snapshot_page_size);
        effects.push(Effect::Fetch(FetchRequest::Dashboard { token, query }));
    }

    /// Reload the drilldown for the current inputs, or clear it for `All`
    fn load_drilldown(&mut self, effects: &mut Vec<Effect>) {
        let (Some(tenant_id), Some(user_id)) = (self.tenant_id.clone(), self.selected_user.user_id())
        else {
            self.drilldown.clear();
            return;
        };
        let query = DrilldownQuery::new(tenant_id, user_id, self.window);
        // A previous user's breakdown must never show while the new one loads
        self.drilldown.clear();
        let token = self.drilldown.begin();
        effects.push(Effect::Fetch(FetchRequest::Drilldown { token, query }));
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// Display name of the selected tenant, empty until the list knows it
    pub fn tenant_name(&self) -> &str {
        let Some(id) = self.tenant_id.as_deref() else {
            return "";
        };
        self.tenants()
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
            .unwrap_or("")
    }

    pub fn selected_user(&self) -> &UserSelection {
        &self.selected_user
    }

    pub fn tenants(&self) -> &[TenantSummary] {
        self.tenants.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dashboard(&self) -> Option<&DashboardSnapshot> {
        self.dashboard.value()
    }

    pub fn drilldown(&self) -> Option<&UserDrilldown> {
        self.drilldown.value()
    }

    pub fn slot_loading(&self, cycle: LoadCycle) -> bool {
        match cycle {
            LoadCycle::Tenants => self.tenants.is_loading(),
            LoadCycle::Dashboard => self.dashboard.is_loading(),
            LoadCycle::Drilldown => self.drilldown.is_loading(),
        }
    }

    pub fn last_error(&self, cycle: LoadCycle) -> Option<&ApiError> {
        match cycle {
            LoadCycle::Tenants => self.tenants.last_error(),
            LoadCycle::Dashboard => self.dashboard.last_error(),
            LoadCycle::Drilldown => self.drilldown.last_error(),
        }
    }

    /// True while any of the three cycles has a load in flight
    pub fn is_busy(&self) -> bool {
        self.tenants.is_loading() || self.dashboard.is_loading() || self.drilldown.is_loading()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

fn failure_notice(cycle: LoadCycle, err: &ApiError) -> Effect {
    tracing::warn!(cycle = cycle.as_str(), error = %err, "Load failed");
    Effect::Notify(Notice::error(cycle.failure_title()).with_description(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_snapshot, window};

    fn tenants() -> Vec<TenantSummary> {
        vec![
            TenantSummary {
                id: "t1".to_string(),
                name: "Acme".to_string(),
                total_queries: 1200,
            },
            TenantSummary {
                id: "t2".to_string(),
                name: "Globex".to_string(),
                total_queries: 800,
            },
        ]
    }

    fn drilldown(user_id: &str) -> UserDrilldown {
        UserDrilldown {
            tenant_id: "t1".to_string(),
            user_id: user_id.to_string(),
            total_queries: 300,
            success_rate_pct: 90.0,
            breakdown: Vec::new(),
            view_details_supported: false,
        }
    }

    fn fetches(effects: &[Effect]) -> Vec<&FetchRequest> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Fetch(request) => Some(request),
                Effect::Notify(_) => None,
            })
            .collect()
    }

    fn notices(effects: &[Effect]) -> Vec<&Notice> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notify(notice) => Some(notice),
                Effect::Fetch(_) => None,
            })
            .collect()
    }

    fn token_for(effects: &[Effect], cycle: LoadCycle) -> LoadToken {
        fetches(effects)
            .into_iter()
            .map(FetchRequest::token)
            .find(|t| t.cycle == cycle)
            .unwrap()
    }

    /// A view with tenants and a dashboard loaded for `t1`
    fn loaded_view() -> ViewState {
        let mut view = ViewState::new(ViewSettings::default(), window());
        let effects = view.handle(Event::Start);
        let effects = view.handle(Event::TenantsLoaded {
            token: token_for(&effects, LoadCycle::Tenants),
            result: Ok(tenants()),
        });
        view.handle(Event::DashboardLoaded {
            token: token_for(&effects, LoadCycle::Dashboard),
            result: Ok(sample_snapshot()),
        });
        view
    }

    #[test]
    fn test_load_slot_generations() {
        let mut slot: LoadSlot<u32> = LoadSlot::new(LoadCycle::Tenants);
        let first = slot.begin();
        let second = slot.begin();
        assert!(!slot.accepts(first));
        assert!(slot.accepts(second));
        assert!(slot.is_loading());

        slot.clear();
        assert!(!slot.accepts(second));
        assert!(!slot.is_loading());

        let other = LoadToken {
            cycle: LoadCycle::Dashboard,
            generation: slot.generation(),
        };
        assert!(!slot.accepts(other));
    }

    #[test]
    fn test_start_without_tenant_only_loads_tenants() {
        let mut view = ViewState::new(ViewSettings::default(), window());
        let effects = view.handle(Event::Start);
        let requests = fetches(&effects);
        assert_eq!(requests.len(), 1);
        match requests[0] {
            FetchRequest::Tenants { query, .. } => {
                assert_eq!(query.limit, Some(50));
                assert_eq!(query.sort.as_deref(), Some("queries_desc"));
                assert_eq!(query.window, Some(window()));
            }
            other => panic!("unexpected request {:?}", other),
        }
        assert!(view.slot_loading(LoadCycle::Tenants));
    }

    #[test]
    fn test_first_tenant_is_auto_selected() {
        let mut view = ViewState::new(ViewSettings::default(), window());
        let effects = view.handle(Event::Start);
        let effects = view.handle(Event::TenantsLoaded {
            token: token_for(&effects, LoadCycle::Tenants),
            result: Ok(tenants()),
        });

        assert_eq!(view.tenant_id(), Some("t1"));
        assert_eq!(view.tenant_name(), "Acme");
        match fetches(&effects).as_slice() {
            [FetchRequest::Dashboard { query, .. }] => {
                assert_eq!(query.tenant_id, "t1");
                assert_eq!(query.page, Some(1));
                assert_eq!(query.page_size, Some(25));
            }
            other => panic!("unexpected requests {:?}", other),
        }
    }

    #[test]
    fn test_preselected_tenant_is_kept() {
        let mut view = ViewState::new(ViewSettings::default(), window()).with_tenant("t2");
        let effects = view.handle(Event::Start);
        assert_eq!(fetches(&effects).len(), 2);
        view.handle(Event::TenantsLoaded {
            token: token_for(&effects, LoadCycle::Tenants),
            result: Ok(tenants()),
        });
        assert_eq!(view.tenant_id(), Some("t2"));
        assert_eq!(view.tenant_name(), "Globex");
    }

    #[test]
    fn test_stale_dashboard_is_discarded() {
        let mut view = loaded_view();
        let first = view.handle(Event::TenantSelected("t2".to_string()));
        let second = view.handle(Event::TenantSelected("t1".to_string()));

        let stale = view.handle(Event::DashboardLoaded {
            token: token_for(&first, LoadCycle::Dashboard),
            result: Err(ApiError::from_status(500, None)),
        });
        assert!(stale.is_empty());
        assert!(view.dashboard().is_some());
        assert!(view.slot_loading(LoadCycle::Dashboard));

        view.handle(Event::DashboardLoaded {
            token: token_for(&second, LoadCycle::Dashboard),
            result: Ok(sample_snapshot()),
        });
        assert!(!view.slot_loading(LoadCycle::Dashboard));
    }

    #[test]
    fn test_dashboard_failure_clears_snapshot_and_notifies() {
        let mut view = loaded_view();
        let effects = view.handle(Event::TenantSelected("t2".to_string()));
        let effects = view.handle(Event::DashboardLoaded {
            token: token_for(&effects, LoadCycle::Dashboard),
            result: Err(ApiError::from_status(503, Some("maintenance".to_string()))),
        });

        assert!(view.dashboard().is_none());
        let notices = notices(&effects);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Failed to load dashboard");
        assert_eq!(notices[0].description.as_deref(), Some("HTTP 503: maintenance"));
        assert!(notices[0].is_error());
        assert_eq!(view.last_error(LoadCycle::Dashboard).and_then(ApiError::status), Some(503));
    }

    #[test]
    fn test_tenant_failure_keeps_previous_list() {
        let mut view = loaded_view();
        let effects = view.handle(Event::DateWindowChanged {
            start: window().start(),
            end: window().end() - chrono::Duration::days(1),
        });
        let effects = view.handle(Event::TenantsLoaded {
            token: token_for(&effects, LoadCycle::Tenants),
            result: Err(ApiError::Transport("connection refused".to_string())),
        });
        assert_eq!(view.tenants().len(), 2);
        assert_eq!(notices(&effects)[0].title, "Failed to load tenants");
    }

    #[test]
    fn test_window_change_reloads_every_cycle() {
        let mut view = loaded_view();
        view.handle(Event::UserSelected(UserSelection::User("u2".to_string())));
        let effects = view.handle(Event::DateWindowChanged {
            start: window().start() + chrono::Duration::days(1),
            end: window().end(),
        });
        let cycles: Vec<LoadCycle> = fetches(&effects).iter().map(|r| r.token().cycle).collect();
        assert_eq!(
            cycles,
            vec![LoadCycle::Tenants, LoadCycle::Dashboard, LoadCycle::Drilldown]
        );
    }

    #[test]
    fn test_unchanged_window_is_a_no_op() {
        let mut view = loaded_view();
        let effects = view.handle(Event::DateWindowChanged {
            start: window().start(),
            end: window().end(),
        });
        assert!(effects.is_empty());
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let mut view = loaded_view();
        let effects = view.handle(Event::DateWindowChanged {
            start: window().end(),
            end: window().start(),
        });
        assert!(fetches(&effects).is_empty());
        assert_eq!(notices(&effects)[0].title, "Invalid date range");
        assert_eq!(view.window(), window());
    }

    #[test]
    fn test_selecting_all_clears_drilldown() {
        let mut view = loaded_view();
        let effects = view.handle(Event::UserSelected(UserSelection::User("u2".to_string())));
        let token = token_for(&effects, LoadCycle::Drilldown);
        view.handle(Event::DrilldownLoaded {
            token,
            result: Ok(drilldown("u2")),
        });
        assert!(view.drilldown().is_some());

        let effects = view.handle(Event::UserSelected(UserSelection::All));
        assert!(effects.is_empty());
        assert!(view.drilldown().is_none());
        assert!(!view.slot_loading(LoadCycle::Drilldown));
    }

    #[test]
    fn test_late_drilldown_for_previous_user_is_dropped() {
        let mut view = loaded_view();
        let first = view.handle(Event::UserSelected(UserSelection::User("u1".to_string())));
        view.handle(Event::UserSelected(UserSelection::User("u2".to_string())));

        view.handle(Event::DrilldownLoaded {
            token: token_for(&first, LoadCycle::Drilldown),
            result: Ok(drilldown("u1")),
        });
        assert!(view.drilldown().is_none());
        assert!(view.slot_loading(LoadCycle::Drilldown));
    }

    #[test]
    fn test_dashboard_success_resets_user_selection() {
        let mut view = loaded_view();
        view.handle(Event::UserSelected(UserSelection::User("u2".to_string())));
        let effects = view.handle(Event::TenantSelected("t2".to_string()));
        assert_eq!(fetches(&effects).len(), 2);

        let effects = view.handle(Event::DashboardLoaded {
            token: token_for(&effects, LoadCycle::Dashboard),
            result: Ok(sample_snapshot()),
        });
        assert!(effects.is_empty());
        assert!(view.selected_user().is_all());
        assert!(!view.slot_loading(LoadCycle::Drilldown));
    }

    #[test]
    fn test_drilldown_failure_notifies() {
        let mut view = loaded_view();
        let effects = view.handle(Event::UserSelected(UserSelection::User("u2".to_string())));
        let effects = view.handle(Event::DrilldownLoaded {
            token: token_for(&effects, LoadCycle::Drilldown),
            result: Err(ApiError::from_status(404, None)),
        });
        assert_eq!(notices(&effects)[0].title, "Failed to load user drilldown");
        assert_eq!(
            notices(&effects)[0].description.as_deref(),
            Some("HTTP 404: Request failed (404)")
        );
        assert!(view.drilldown().is_none());
    }

    #[test]
    fn test_teardown_discards_everything() {
        let mut view = loaded_view();
        let effects = view.handle(Event::TenantSelected("t2".to_string()));
        view.handle(Event::TearDown);

        let late = view.handle(Event::DashboardLoaded {
            token: token_for(&effects, LoadCycle::Dashboard),
            result: Ok(sample_snapshot()),
        });
        assert!(late.is_empty());
        assert!(view.is_torn_down());
        assert!(!view.is_busy());
        assert!(view.handle(Event::TenantSelected("t3".to_string())).is_empty());
    }

    #[test]
    fn test_start_after_teardown_reloads() {
        let mut view = loaded_view();
        let before = view.handle(Event::TenantSelected("t2".to_string()));
        view.handle(Event::TearDown);

        let effects = view.handle(Event::Start);
        assert!(!view.is_torn_down());
        let cycles: Vec<LoadCycle> = fetches(&effects).iter().map(|r| r.token().cycle).collect();
        assert!(cycles.contains(&LoadCycle::Tenants));
        assert!(cycles.contains(&LoadCycle::Dashboard));

        let late = view.handle(Event::DashboardLoaded {
            token: token_for(&before, LoadCycle::Dashboard),
            result: Ok(sample_snapshot()),
        });
        assert!(late.is_empty());
        assert!(view.is_busy());

        let effects = view.handle(Event::TenantSelected("t3".to_string()));
        token_for(&effects, LoadCycle::Dashboard);
    }
}
