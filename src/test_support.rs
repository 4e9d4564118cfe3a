//! Shared fixtures for unit tests

use crate::decode::DashboardSnapshot;
use crate::dto::*;
use crate::model::DateWindow;

pub fn window() -> DateWindow {
    DateWindow::parse("2026-01-19", "2026-02-18").unwrap()
}

pub fn user(id: &str, total: u64, failed: u64, pct: f64) -> UserQueryStat {
    UserQueryStat {
        user_id: id.to_string(),
        display_name: format!("User {}", id),
        total_queries: total,
        failed_queries: failed,
        success_rate_pct: pct,
        confidence: None,
    }
}

/// Snapshot for tenant `t1` holding the given users
pub fn snapshot_with_users(users: Vec<UserQueryStat>) -> DashboardSnapshot {
    let total: u64 = users.iter().map(|u| u.total_queries).sum();
    let failed: u64 = users.iter().map(|u| u.failed_queries).sum();
    let max = users.iter().map(|u| u.total_queries).max().unwrap_or(0);
    let min = users.iter().map(|u| u.total_queries).min().unwrap_or(0);
    let answered = total - failed;
    let high = answered / 2;
    let medium = answered / 3;
    let low = answered - high - medium;
    let bucket = |count: u64| ConfidenceBucket {
        count,
        pct_of_answered: crate::metrics::pct_of(count, answered),
    };

    DashboardSnapshot::new(DashboardData {
        tenant_id: "t1".to_string(),
        window: WindowDto {
            start_date: "2026-01-19".to_string(),
            end_date: "2026-02-18".to_string(),
        },
        summary: SummaryDto {
            total_queries: total,
            failed_queries: failed,
            success_rate_pct: crate::metrics::pct_of(answered, total),
            active_users: users.len() as u64,
            max_queries_per_user: max,
            min_queries_per_user: min,
        },
        confidence_distribution: ConfidenceDistribution {
            high: bucket(high),
            medium: bucket(medium),
            low: bucket(low),
        },
        query_timeseries: QueryTimeseries {
            granularity: "day".to_string(),
            series: vec![
                TimeseriesPoint {
                    date: "2026-01-19".into(),
                    total_queries: 40,
                    failed_queries: 4,
                },
                TimeseriesPoint {
                    date: "2026-01-21".into(),
                    total_queries: 25,
                    failed_queries: 0,
                },
            ],
        },
        user_query_stats: UserQueryStats {
            pagination: Pagination {
                page: 1,
                page_size: 25,
                total_records: users.len() as u64,
            },
            users,
        },
    })
    .unwrap()
}

/// The 1000-query snapshot used across the derivation tests
pub fn sample_snapshot() -> DashboardSnapshot {
    let mut data = snapshot_with_users(vec![
        user("u1", 500, 10, 98.0),
        UserQueryStat {
            confidence: Some(UserConfidenceCounts {
                high: 50,
                medium: 100,
                low: 120,
            }),
            ..user("u2", 300, 30, 89.5)
        },
        user("u3", 200, 10, 95.0),
    ])
    .into_data();

    data.summary.success_rate_pct = 94.5;
    data.confidence_distribution = ConfidenceDistribution {
        high: ConfidenceBucket { count: 400, pct_of_answered: 42.1 },
        medium: ConfidenceBucket { count: 350, pct_of_answered: 36.8 },
        low: ConfidenceBucket { count: 200, pct_of_answered: 21.1 },
    };
    DashboardSnapshot::new(data).unwrap()
}

/// Twelve users whose totals are 120, 110, ... 10 (already ranked)
pub fn twelve_users() -> DashboardSnapshot {
    snapshot_with_users(
        (0..12u64)
            .map(|i| {
                let total = 120 - i * 10;
                user(&format!("u{:03}", i + 1), total, i, 90.0)
            })
            .collect(),
    )
}
