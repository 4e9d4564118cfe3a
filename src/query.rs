//! Request construction
//!
//! Endpoint paths, query-parameter building and the typed inputs of the three
//! fetch operations. Only defined, non-empty parameters are ever sent.

use crate::error::{ApiError, ApiResult};
use crate::model::DateWindow;

pub const TENANTS_PATH: &str = "/api/v1/tenants";
pub const DASHBOARD_PATH: &str = "/api/v1/analytics/dashboard";

/// Path of the per-user drilldown endpoint, with the user id percent-encoded
pub fn drilldown_path(user_id: &str) -> String {
    format!(
        "/api/v1/analytics/users/{}/drilldown",
        urlencoding::encode(user_id)
    )
}

/// Ordered list of query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter; empty values are skipped
    pub fn push(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key, value));
        }
        self
    }

    /// Add a parameter only when it is defined
    pub fn push_opt<V: ToString>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `key=value&...` with values percent-encoded
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Join a base URL, a path and encoded parameters into a request URL
pub fn build_url(base: &str, path: &str, params: &QueryParams) -> String {
    let mut url = format!("{}{}", base.trim_end_matches('/'), path);
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.encode());
    }
    url
}

/// Filters for the tenant list
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TenantQuery {
    pub window: Option<DateWindow>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
}

impl TenantQuery {
    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_opt("start_date", self.window.map(|w| w.start_param()))
            .push_opt("end_date", self.window.map(|w| w.end_param()))
            .push_opt("limit", self.limit)
            .push_opt("sort", self.sort.as_deref());
        params
    }
}

/// Inputs of one dashboard snapshot fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DashboardQuery {
    pub tenant_id: String,
    pub window: DateWindow,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl DashboardQuery {
    pub fn new(tenant_id: impl Into<String>, window: DateWindow) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            window,
            page: None,
            page_size: None,
        }
    }

    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn validate(&self) -> ApiResult<()> {
        require_id("tenant_id", &self.tenant_id)
    }

    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("tenant_id", &self.tenant_id)
            .push("start_date", self.window.start_param())
            .push("end_date", self.window.end_param())
            .push_opt("page", self.page)
            .push_opt("page_size", self.page_size);
        params
    }
}

/// Inputs of one per-user drilldown fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrilldownQuery {
    pub tenant_id: String,
    pub user_id: String,
    pub window: DateWindow,
}

impl DrilldownQuery {
    pub fn new(tenant_id: impl Into<String>, user_id: impl Into<String>, window: DateWindow) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            user_id: user_id.into(),
            window,
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        require_id("tenant_id", &self.tenant_id)?;
        require_id("user_id", &self.user_id)
    }

    pub fn path(&self) -> String {
        drilldown_path(&self.user_id)
    }

    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("tenant_id", &self.tenant_id)
            .push("start_date", self.window.start_param())
            .push("end_date", self.window.end_param());
        params
    }
}

fn require_id(name: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        Err(ApiError::InvalidRequest(format!("{} must not be empty", name)))
    } else {
        Ok(())
    }
}
