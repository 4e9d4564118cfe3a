//! Response decoding
//!
//! Turns raw response bodies into validated values. Shape mismatches and
//! impossible numbers fail with [`ApiError::MalformedResponse`]; softer
//! inconsistencies are logged and let through.

use std::ops::Deref;

use crate::dto::{
    DashboardData, DashboardResponse, TenantListResponse, UserDrilldown, UserDrilldownResponse,
};
use crate::error::{ApiError, ApiResult};
use crate::model::{parse_date, DateWindow, TenantSummary};
use crate::query::{DASHBOARD_PATH, TENANTS_PATH};

const DRILLDOWN_ENDPOINT: &str = "/api/v1/analytics/users/{user_id}/drilldown";

/// One validated dashboard fetch result
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    data: DashboardData,
    window: DateWindow,
}

impl DashboardSnapshot {
    /// Validate already-parsed dashboard data
    pub fn new(data: DashboardData) -> ApiResult<Self> {
        let window = check_dashboard(&data)?;
        for warning in soft_warnings(&data) {
            tracing::warn!(tenant_id = %data.tenant_id, "{}", warning);
        }
        Ok(Self { data, window })
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// Queries that did not fail; denominator of the confidence percentages
    pub fn answered_queries(&self) -> u64 {
        self.data.summary.total_queries - self.data.summary.failed_queries
    }

    pub fn into_data(self) -> DashboardData {
        self.data
    }
}

impl Deref for DashboardSnapshot {
    type Target = DashboardData;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// Decode a tenant list body
pub fn decode_tenants(body: &str) -> ApiResult<Vec<TenantSummary>> {
    let response: TenantListResponse = parse(TENANTS_PATH, body)?;

    response
        .tenants
        .into_iter()
        .map(|t| {
            if t.tenant_id.trim().is_empty() {
                return Err(ApiError::malformed(TENANTS_PATH, "tenant with empty tenant_id"));
            }
            Ok(TenantSummary {
                id: t.tenant_id,
                name: t.tenant_name,
                total_queries: t.total_queries,
            })
        })
        .collect()
}

/// Decode a dashboard body
pub fn decode_dashboard(body: &str) -> ApiResult<DashboardSnapshot> {
    let response: DashboardResponse = parse(DASHBOARD_PATH, body)?;
    DashboardSnapshot::new(response.data)
}

/// Decode a per-user drilldown body
pub fn decode_drilldown(body: &str) -> ApiResult<UserDrilldown> {
    let response: UserDrilldownResponse = parse(DRILLDOWN_ENDPOINT, body)?;
    let data = response.data;

    if data.user_id.trim().is_empty() {
        return Err(ApiError::malformed(DRILLDOWN_ENDPOINT, "empty user_id"));
    }
    check_pct(DRILLDOWN_ENDPOINT, "success_rate_pct", data.success_rate_pct)?;

    Ok(data)
}

fn parse<T: serde::de::DeserializeOwned>(endpoint: &str, body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| ApiError::malformed(endpoint, e.to_string()))
}

fn check_pct(endpoint: &str, field: &str, value: f64) -> ApiResult<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::malformed(
            endpoint,
            format!("{} out of range: {}", field, value),
        ))
    }
}

fn check_dashboard(data: &DashboardData) -> ApiResult<DateWindow> {
    let malformed = |reason: String| ApiError::malformed(DASHBOARD_PATH, reason);

    let window = DateWindow::parse(&data.window.start_date, &data.window.end_date)
        .map_err(|e| malformed(e.to_string()))?;

    let summary = &data.summary;
    if summary.failed_queries > summary.total_queries {
        return Err(malformed(format!(
            "failed_queries {} exceeds total_queries {}",
            summary.failed_queries, summary.total_queries
        )));
    }
    if summary.active_users > 0 && summary.min_queries_per_user > summary.max_queries_per_user {
        return Err(malformed(format!(
            "min_queries_per_user {} exceeds max_queries_per_user {}",
            summary.min_queries_per_user, summary.max_queries_per_user
        )));
    }
    check_pct(DASHBOARD_PATH, "success_rate_pct", summary.success_rate_pct)?;

    let dist = &data.confidence_distribution;
    for (name, bucket) in [("high", &dist.high), ("medium", &dist.medium), ("low", &dist.low)] {
        check_pct(DASHBOARD_PATH, &format!("{}.pct_of_answered", name), bucket.pct_of_answered)?;
    }

    for point in &data.query_timeseries.series {
        parse_date(&point.date).map_err(|e| malformed(e.to_string()))?;
        if point.failed_queries > point.total_queries {
            return Err(malformed(format!(
                "timeseries point {} has more failed than total queries",
                point.date
            )));
        }
    }

    for user in &data.user_query_stats.users {
        if user.user_id.trim().is_empty() {
            return Err(malformed("user with empty user_id".to_string()));
        }
        if user.failed_queries > user.total_queries {
            return Err(malformed(format!(
                "user {} has more failed than total queries",
                user.user_id
            )));
        }
        check_pct(DASHBOARD_PATH, "user success_rate_pct", user.success_rate_pct)?;
    }

    Ok(window)
}

/// Inconsistencies that are suspicious but still renderable
pub fn soft_warnings(data: &DashboardData) -> Vec<String> {
    let mut warnings = Vec::new();
    let summary = &data.summary;
    let answered = summary.total_queries.saturating_sub(summary.failed_queries);

    let bucket_sum = data.confidence_distribution.total_count();
    if bucket_sum != answered {
        warnings.push(format!(
            "confidence buckets sum to {} but {} queries were answered",
            bucket_sum, answered
        ));
    }

    for user in &data.user_query_stats.users {
        if user.total_queries < summary.min_queries_per_user
            || user.total_queries > summary.max_queries_per_user
        {
            warnings.push(format!(
                "user {} total {} outside [{}, {}]",
                user.user_id,
                user.total_queries,
                summary.min_queries_per_user,
                summary.max_queries_per_user
            ));
        }
    }

    let dates: Vec<&str> = data
        .query_timeseries
        .series
        .iter()
        .map(|p| p.date.as_str())
        .collect();
    if dates.windows(2).any(|pair| pair[0] > pair[1]) {
        warnings.push("timeseries is not in chronological order".to_string());
    }

    warnings
}
