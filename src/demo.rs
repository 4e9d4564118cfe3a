//! Deterministic demo data source
//!
//! Serves the three endpoints from a fixed roster of tenants and users. Every
//! number is derived from a hash of (tenant, user, date), so the same query
//! always returns the same response. Responses are rendered to JSON and run
//! through the regular decoders, exactly like live responses.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use crate::client::AnalyticsApi;
use crate::decode::{decode_dashboard, decode_drilldown, decode_tenants, DashboardSnapshot};
use crate::dto::{
    BreakdownEntry, ConfidenceBucket, ConfidenceDistribution, DashboardData, DashboardResponse,
    Pagination, QueryTimeseries, SummaryDto, TenantDto, TenantListResponse, TimeseriesPoint,
    UserConfidenceCounts, UserDrilldown, UserDrilldownResponse, UserQueryStat, UserQueryStats,
    WindowDto,
};
use crate::error::{ApiError, ApiResult};
use crate::metrics::pct_of;
use crate::model::{DateWindow, TenantSummary};
use crate::query::{DashboardQuery, DrilldownQuery, TenantQuery};

struct DemoTenant {
    id: &'static str,
    name: &'static str,
    /// Average queries per user per day
    daily_volume: u64,
    users: &'static [(&'static str, &'static str)],
}

const TENANTS: &[DemoTenant] = &[
    DemoTenant {
        id: "acme",
        name: "Acme Corp",
        daily_volume: 14,
        users: &[
            ("u001", "Ada Lovelace"),
            ("u002", "Linus Torvalds"),
            ("u003", "Grace Hopper"),
            ("u004", "Alan Turing"),
            ("u005", "Barbara Liskov"),
            ("u006", "Ken Thompson"),
            ("u007", "Margaret Hamilton"),
        ],
    },
    DemoTenant {
        id: "globex",
        name: "Globex",
        daily_volume: 9,
        users: &[
            ("u101", "Hank Scorpio"),
            ("u102", "Homer Simpson"),
            ("u103", "Lenny Leonard"),
            ("u104", "Carl Carlson"),
        ],
    },
    DemoTenant {
        id: "initech",
        name: "Initech",
        daily_volume: 5,
        users: &[
            ("u201", "Peter Gibbons"),
            ("u202", "Samir Nagheenanajar"),
            ("u203", "Michael Bolton"),
            ("u204", "Milton Waddams"),
            ("u205", "Joanna"),
        ],
    },
];

/// FNV-1a over the parts, separated so ("ab", "c") and ("a", "bc") differ
fn mix(parts: &[&str]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for part in parts {
        for byte in part.bytes().chain(std::iter::once(0xff)) {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
    }
    hash
}

fn days(window: DateWindow) -> impl Iterator<Item = NaiveDate> {
    window
        .start()
        .iter_days()
        .take_while(move |day| *day <= window.end())
}

/// Totals of one user over a window
#[derive(Debug, Clone, Copy, Default)]
struct UserTotals {
    total: u64,
    failed: u64,
    confidence: UserConfidenceCounts,
}

impl UserTotals {
    fn answered(&self) -> u64 {
        self.total - self.failed
    }
}

/// Queries and failures of one user on one day
fn user_day(tenant: &DemoTenant, user_id: &str, day: NaiveDate) -> (u64, u64) {
    let date = day.to_string();
    let seed = mix(&[tenant.id, user_id, date.as_str()]);
    let total = seed % (tenant.daily_volume * 2 + 1);
    // 0-7% failures
    let failed = total * ((seed >> 16) % 8) / 100;
    (total, failed)
}

fn user_totals(tenant: &DemoTenant, user_id: &str, window: DateWindow) -> UserTotals {
    let (total, failed) = days(window)
        .map(|day| user_day(tenant, user_id, day))
        .fold((0, 0), |(t, f), (dt, df)| (t + dt, f + df));
    let answered = total - failed;

    let seed = mix(&[tenant.id, user_id, "confidence"]);
    let high_pct = 45 + seed % 40;
    let medium_share = 40 + (seed >> 8) % 40;
    let high = answered * high_pct / 100;
    let medium = (answered - high) * medium_share / 100;

    UserTotals {
        total,
        failed,
        confidence: UserConfidenceCounts {
            high,
            medium,
            low: answered - high - medium,
        },
    }
}

fn find_tenant(tenant_id: &str) -> ApiResult<&'static DemoTenant> {
    TENANTS
        .iter()
        .find(|t| t.id == tenant_id)
        .ok_or_else(|| ApiError::from_status(404, Some(format!("Unknown tenant: {}", tenant_id))))
}

fn window_dto(window: DateWindow) -> WindowDto {
    WindowDto {
        start_date: window.start_param(),
        end_date: window.end_param(),
    }
}

fn tenant_list(query: &TenantQuery, window: DateWindow) -> TenantListResponse {
    let mut tenants: Vec<TenantDto> = TENANTS
        .iter()
        .map(|tenant| TenantDto {
            tenant_id: tenant.id.to_string(),
            tenant_name: tenant.name.to_string(),
            total_queries: tenant
                .users
                .iter()
                .map(|(user_id, _)| user_totals(tenant, user_id, window).total)
                .sum(),
        })
        .collect();

    match query.sort.as_deref() {
        Some("queries_asc") => tenants.sort_by_key(|t| t.total_queries),
        Some("name") => tenants.sort_by(|a, b| a.tenant_name.cmp(&b.tenant_name)),
        _ => tenants.sort_by(|a, b| b.total_queries.cmp(&a.total_queries)),
    }
    if let Some(limit) = query.limit {
        tenants.truncate(limit as usize);
    }

    TenantListResponse {
        metadata: json!({"source": "demo"}),
        window: Some(window_dto(window)),
        limit: query.limit,
        tenants,
    }
}

fn dashboard(query: &DashboardQuery) -> ApiResult<DashboardResponse> {
    let tenant = find_tenant(&query.tenant_id)?;
    let window = query.window;

    let mut users: Vec<UserQueryStat> = tenant
        .users
        .iter()
        .map(|(user_id, name)| {
            let totals = user_totals(tenant, user_id, window);
            UserQueryStat {
                user_id: user_id.to_string(),
                display_name: name.to_string(),
                total_queries: totals.total,
                failed_queries: totals.failed,
                success_rate_pct: pct_of(totals.answered(), totals.total),
                confidence: Some(totals.confidence),
            }
        })
        .filter(|u| u.total_queries > 0)
        .collect();
    users.sort_by(|a, b| b.total_queries.cmp(&a.total_queries));

    let total: u64 = users.iter().map(|u| u.total_queries).sum();
    let failed: u64 = users.iter().map(|u| u.failed_queries).sum();
    let answered = total - failed;
    let counts = users
        .iter()
        .filter_map(|u| u.confidence)
        .fold(UserConfidenceCounts::default(), |acc, c| UserConfidenceCounts {
            high: acc.high + c.high,
            medium: acc.medium + c.medium,
            low: acc.low + c.low,
        });
    let bucket = |count: u64| ConfidenceBucket {
        count,
        pct_of_answered: pct_of(count, answered),
    };

    let series = days(window)
        .filter_map(|day| {
            let (day_total, day_failed) = tenant
                .users
                .iter()
                .map(|(user_id, _)| user_day(tenant, user_id, day))
                .fold((0, 0), |(t, f), (dt, df)| (t + dt, f + df));
            (day_total > 0).then(|| TimeseriesPoint {
                date: day.to_string(),
                total_queries: day_total,
                failed_queries: day_failed,
            })
        })
        .collect();

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(25).max(1);
    let total_records = users.len() as u64;
    let page_users = users
        .iter()
        .skip(((page - 1) * page_size) as usize)
        .take(page_size as usize)
        .cloned()
        .collect();

    Ok(DashboardResponse {
        metadata: json!({"source": "demo"}),
        data: DashboardData {
            tenant_id: tenant.id.to_string(),
            window: window_dto(window),
            summary: SummaryDto {
                total_queries: total,
                failed_queries: failed,
                success_rate_pct: pct_of(answered, total),
                active_users: total_records,
                max_queries_per_user: users.first().map(|u| u.total_queries).unwrap_or(0),
                min_queries_per_user: users.last().map(|u| u.total_queries).unwrap_or(0),
            },
            confidence_distribution: ConfidenceDistribution {
                high: bucket(counts.high),
                medium: bucket(counts.medium),
                low: bucket(counts.low),
            },
            query_timeseries: QueryTimeseries {
                granularity: "day".to_string(),
                series,
            },
            user_query_stats: UserQueryStats {
                pagination: Pagination {
                    page,
                    page_size,
                    total_records,
                },
                users: page_users,
            },
        },
    })
}

fn drilldown(query: &DrilldownQuery) -> ApiResult<UserDrilldownResponse> {
    let tenant = find_tenant(&query.tenant_id)?;
    if !tenant.users.iter().any(|(id, _)| *id == query.user_id) {
        return Err(ApiError::from_status(
            404,
            Some(format!("Unknown user: {}", query.user_id)),
        ));
    }
    let totals = user_totals(tenant, &query.user_id, query.window);
    let entry = |label: &str, count: u64| BreakdownEntry {
        label: label.to_string(),
        count,
    };

    Ok(UserDrilldownResponse {
        metadata: json!({"source": "demo"}),
        data: UserDrilldown {
            tenant_id: tenant.id.to_string(),
            user_id: query.user_id.clone(),
            total_queries: totals.total,
            success_rate_pct: pct_of(totals.answered(), totals.total),
            breakdown: vec![
                entry("High", totals.confidence.high),
                entry("Medium", totals.confidence.medium),
                entry("Low", totals.confidence.low),
                entry("Failed", totals.failed),
            ],
            view_details_supported: false,
        },
    })
}

fn render<T: serde::Serialize>(value: &T) -> ApiResult<String> {
    serde_json::to_string(value).map_err(|e| ApiError::Transport(e.to_string()))
}

/// [`AnalyticsApi`] over the built-in demo roster
#[derive(Debug, Clone, Default)]
pub struct DemoApi {
    latency: Option<Duration>,
    /// Window used when a tenant query has none
    default_window: Option<DateWindow>,
}

impl DemoApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response, to make in-flight states observable
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_default_window(mut self, window: DateWindow) -> Self {
        self.default_window = Some(window);
        self
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl AnalyticsApi for DemoApi {
    async fn fetch_tenants(&self, query: &TenantQuery) -> ApiResult<Vec<TenantSummary>> {
        self.pause().await;
        let window = query
            .window
            .or(self.default_window)
            .ok_or_else(|| ApiError::InvalidRequest("demo tenants need a date window".to_string()))?;
        decode_tenants(&render(&tenant_list(query, window))?)
    }

    async fn fetch_dashboard(&self, query: &DashboardQuery) -> ApiResult<DashboardSnapshot> {
        query.validate()?;
        self.pause().await;
        decode_dashboard(&render(&dashboard(query)?)?)
    }

    async fn fetch_user_drilldown(&self, query: &DrilldownQuery) -> ApiResult<UserDrilldown> {
        query.validate()?;
        self.pause().await;
        decode_drilldown(&render(&drilldown(query)?)?)
    }
}
