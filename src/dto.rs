//! Wire DTOs
//!
//! Request/response shapes of the analytics REST API. These mirror the JSON
//! exactly; validation happens in [`crate::decode`].

use serde::{Deserialize, Serialize};

/// `GET /api/v1/tenants`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantListResponse {
    /// Opaque, never interpreted
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub window: Option<WindowDto>,
    #[serde(default)]
    pub limit: Option<u32>,
    pub tenants: Vec<TenantDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDto {
    pub tenant_id: String,
    pub tenant_name: String,
    pub total_queries: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDto {
    pub start_date: String,
    pub end_date: String,
}

/// `GET /api/v1/analytics/dashboard`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub data: DashboardData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub tenant_id: String,
    pub window: WindowDto,
    pub summary: SummaryDto,
    pub confidence_distribution: ConfidenceDistribution,
    pub query_timeseries: QueryTimeseries,
    pub user_query_stats: UserQueryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDto {
    pub total_queries: u64,
    pub failed_queries: u64,
    pub success_rate_pct: f64,
    pub active_users: u64,
    pub max_queries_per_user: u64,
    pub min_queries_per_user: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceDistribution {
    pub high: ConfidenceBucket,
    pub medium: ConfidenceBucket,
    pub low: ConfidenceBucket,
}

impl ConfidenceDistribution {
    /// Sum of the three bucket counts
    pub fn total_count(&self) -> u64 {
        self.high.count + self.medium.count + self.low.count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBucket {
    pub count: u64,
    /// Percentage of answered (not total) queries
    pub pct_of_answered: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTimeseries {
    #[serde(default = "default_granularity")]
    pub granularity: String,
    pub series: Vec<TimeseriesPoint>,
}

fn default_granularity() -> String {
    "day".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeseriesPoint {
    pub date: String,
    pub total_queries: u64,
    pub failed_queries: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserQueryStats {
    pub pagination: Pagination,
    pub users: Vec<UserQueryStat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_records: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserQueryStat {
    pub user_id: String,
    pub display_name: String,
    pub total_queries: u64,
    pub failed_queries: u64,
    pub success_rate_pct: f64,
    /// Per-user confidence counts, when the backend reports them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<UserConfidenceCounts>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfidenceCounts {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

/// `GET /api/v1/analytics/users/{user_id}/drilldown`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDrilldownResponse {
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub data: UserDrilldown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDrilldown {
    pub tenant_id: String,
    pub user_id: String,
    pub total_queries: u64,
    pub success_rate_pct: f64,
    pub breakdown: Vec<BreakdownEntry>,
    #[serde(default)]
    pub view_details_supported: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_stat_without_confidence() {
        let json = r#"{
            "user_id": "u001",
            "display_name": "Ada",
            "total_queries": 40,
            "failed_queries": 2,
            "success_rate_pct": 95.0
        }"#;
        let stat: UserQueryStat = serde_json::from_str(json).unwrap();
        assert_eq!(stat.confidence, None);

        let back = serde_json::to_value(&stat).unwrap();
        assert!(back.get("confidence").is_none());
    }

    #[test]
    fn test_tenant_list_tolerates_missing_envelope_fields() {
        let json = r#"{"tenants": [{"tenant_id": "t1", "tenant_name": "Acme", "total_queries": 12}]}"#;
        let list: TenantListResponse = serde_json::from_str(json).unwrap();
        assert!(list.metadata.is_null());
        assert_eq!(list.window, None);
        assert_eq!(list.tenants.len(), 1);
    }

    #[test]
    fn test_granularity_defaults_to_day() {
        let json = r#"{"series": []}"#;
        let ts: QueryTimeseries = serde_json::from_str(json).unwrap();
        assert_eq!(ts.granularity, "day");
    }
}
