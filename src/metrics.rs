//! Derived metrics
//!
//! Pure transformations from a dashboard snapshot into the aggregates the
//! cards, charts and table render. Nothing here depends on fetch timing; an
//! absent snapshot yields empty series and zero scalars.

use serde::Serialize;

use crate::decode::DashboardSnapshot;
use crate::dto::{ConfidenceBucket, TimeseriesPoint, UserQueryStat};

/// Round half up (`floor(x + 0.5)`), the same rule for every percentage
pub fn round_pct(value: f64) -> i64 {
    if value.is_finite() {
        (value + 0.5).floor() as i64
    } else {
        0
    }
}

/// `part / whole * 100`, or 0 when `whole` is zero
pub fn pct_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// The three confidence buckets, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn all() -> &'static [ConfidenceLevel] {
        &[ConfidenceLevel::High, ConfidenceLevel::Medium, ConfidenceLevel::Low]
    }

    /// Legend label, including the score band
    pub fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High (>90%)",
            ConfidenceLevel::Medium => "Medium (70-90%)",
            ConfidenceLevel::Low => "Low (<70%)",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "#10b981",
            ConfidenceLevel::Medium => "#f59e0b",
            ConfidenceLevel::Low => "#ef4444",
        }
    }
}

impl std::str::FromStr for ConfidenceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(ConfidenceLevel::High),
            "medium" => Ok(ConfidenceLevel::Medium),
            "low" => Ok(ConfidenceLevel::Low),
            other => Err(format!("Unknown confidence level: {}", other)),
        }
    }
}

/// One slice of the confidence pie chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceSlice {
    pub level: ConfidenceLevel,
    pub name: &'static str,
    pub value: u64,
    pub percentage: i64,
    pub color: &'static str,
}

/// Pie-chart series: high, medium, low
pub fn confidence_series(snapshot: Option<&DashboardSnapshot>) -> Vec<ConfidenceSlice> {
    let Some(snapshot) = snapshot else {
        return Vec::new();
    };
    let dist = &snapshot.confidence_distribution;

    let slice = |level: ConfidenceLevel, bucket: &ConfidenceBucket| ConfidenceSlice {
        level,
        name: level.label(),
        value: bucket.count,
        percentage: round_pct(bucket.pct_of_answered),
        color: level.color(),
    };

    vec![
        slice(ConfidenceLevel::High, &dist.high),
        slice(ConfidenceLevel::Medium, &dist.medium),
        slice(ConfidenceLevel::Low, &dist.low),
    ]
}

/// One point of the query-trend chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub total: u64,
    pub failed: u64,
    pub successful: u64,
}

impl From<&TimeseriesPoint> for TrendPoint {
    fn from(point: &TimeseriesPoint) -> Self {
        Self {
            date: point.date.clone(),
            total: point.total_queries,
            failed: point.failed_queries,
            successful: point.total_queries.saturating_sub(point.failed_queries),
        }
    }
}

/// Trend series in source order; missing dates stay missing
pub fn trend_series(snapshot: Option<&DashboardSnapshot>) -> Vec<TrendPoint> {
    snapshot
        .map(|s| s.query_timeseries.series.iter().map(TrendPoint::from).collect())
        .unwrap_or_default()
}

/// A user's row in the statistics table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub user_id: String,
    pub user_name: String,
    pub total_queries: u64,
    pub failed_queries: u64,
    pub success_rate: i64,
    pub high_confidence: u64,
    pub medium_confidence: u64,
    pub low_confidence: u64,
    /// False when the backend sent no per-user confidence counts
    pub confidence_reported: bool,
}

impl From<&UserQueryStat> for UserRow {
    fn from(stat: &UserQueryStat) -> Self {
        let counts = stat.confidence.unwrap_or_default();
        Self {
            user_id: stat.user_id.clone(),
            user_name: stat.display_name.clone(),
            total_queries: stat.total_queries,
            failed_queries: stat.failed_queries,
            success_rate: round_pct(stat.success_rate_pct),
            high_confidence: counts.high,
            medium_confidence: counts.medium,
            low_confidence: counts.low,
            confidence_reported: stat.confidence.is_some(),
        }
    }
}

/// Table rows, in the order the backend listed the users
pub fn user_rows(snapshot: Option<&DashboardSnapshot>) -> Vec<UserRow> {
    snapshot
        .map(|s| s.user_query_stats.users.iter().map(UserRow::from).collect())
        .unwrap_or_default()
}

/// Scalars shown on the KPI cards and table header
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryScalars {
    pub total_queries: u64,
    pub failed_queries: u64,
    pub failure_rate_pct: f64,
    /// Tenant-wide success rate, rounded; not an average over users
    pub avg_success_rate: i64,
    pub active_users: u64,
    pub max_queries_per_user: u64,
    pub min_queries_per_user: u64,
}

impl SummaryScalars {
    pub fn from_snapshot(snapshot: Option<&DashboardSnapshot>) -> Self {
        let Some(snapshot) = snapshot else {
            return Self::default();
        };
        let summary = &snapshot.summary;
        Self {
            total_queries: summary.total_queries,
            failed_queries: summary.failed_queries,
            failure_rate_pct: 100.0 - summary.success_rate_pct,
            avg_success_rate: round_pct(summary.success_rate_pct),
            active_users: summary.active_users,
            max_queries_per_user: summary.max_queries_per_user,
            min_queries_per_user: summary.min_queries_per_user,
        }
    }
}

/// Headline badges for the insights panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyInsights {
    pub high_confidence_pct: i64,
    pub users_above_90: usize,
    /// Users with more low- than high-confidence answers
    pub users_needing_attention: usize,
}

impl KeyInsights {
    pub fn derive(slices: &[ConfidenceSlice], rows: &[UserRow]) -> Self {
        Self {
            high_confidence_pct: slices
                .iter()
                .find(|s| s.level == ConfidenceLevel::High)
                .map(|s| s.percentage)
                .unwrap_or(0),
            users_above_90: rows.iter().filter(|r| r.success_rate >= 90).count(),
            users_needing_attention: rows
                .iter()
                .filter(|r| r.low_confidence > r.high_confidence)
                .count(),
        }
    }
}

/// Static guidance listed under the charts
pub const RECOMMENDATIONS: [&str; 3] = [
    "Focus on improving content quality for low confidence queries to boost overall performance",
    "Investigate users with high failure rates to identify common query patterns",
    "Consider adding more training data for areas with consistently low confidence scores",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_snapshot as snapshot;

    #[test]
    fn test_round_pct_is_half_up() {
        assert_eq!(round_pct(42.1), 42);
        assert_eq!(round_pct(36.8), 37);
        assert_eq!(round_pct(2.5), 3);
        assert_eq!(round_pct(3.5), 4);
        assert_eq!(round_pct(f64::NAN), 0);
    }

    #[test]
    fn test_pct_of_guards_zero() {
        assert_eq!(pct_of(5, 0), 0.0);
        assert_eq!(pct_of(1, 4), 25.0);
    }

    #[test]
    fn test_confidence_series_example() {
        let snapshot = snapshot();
        let slices = confidence_series(Some(&snapshot));
        let labels: Vec<String> = slices
            .iter()
            .map(|s| format!("{}: {}%", s.name, s.percentage))
            .collect();
        assert_eq!(
            labels,
            vec!["High (>90%): 42%", "Medium (70-90%): 37%", "Low (<70%): 21%"]
        );
        assert_eq!(slices[0].color, "#10b981");
        assert_eq!(slices[2].color, "#ef4444");

        let answered: u64 = slices.iter().map(|s| s.value).sum();
        assert_eq!(answered, snapshot.answered_queries());
    }

    #[test]
    fn test_absent_snapshot_yields_empty_series() {
        assert!(confidence_series(None).is_empty());
        assert!(trend_series(None).is_empty());
        assert!(user_rows(None).is_empty());
        assert_eq!(SummaryScalars::from_snapshot(None), SummaryScalars::default());
    }

    #[test]
    fn test_trend_series_keeps_gaps_and_order() {
        let trend = trend_series(Some(&snapshot()));
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].successful, 36);
        assert_eq!(trend[1].date, "2026-01-21");
    }

    #[test]
    fn test_user_rows() {
        let rows = user_rows(Some(&snapshot()));
        assert_eq!(rows[0].success_rate, 98);
        assert_eq!(rows[1].success_rate, 90);
        assert!(!rows[0].confidence_reported);
        assert_eq!(rows[0].high_confidence, 0);
        assert!(rows[1].confidence_reported);
        assert_eq!(rows[1].low_confidence, 120);
    }

    #[test]
    fn test_summary_scalars() {
        let scalars = SummaryScalars::from_snapshot(Some(&snapshot()));
        assert_eq!(scalars.avg_success_rate, 95);
        assert_eq!(format!("{:.1}", scalars.failure_rate_pct), "5.5");
        assert_eq!(scalars.max_queries_per_user, 500);
        assert_eq!(scalars.min_queries_per_user, 200);
    }

    #[test]
    fn test_key_insights() {
        let snapshot = snapshot();
        let insights = KeyInsights::derive(
            &confidence_series(Some(&snapshot)),
            &user_rows(Some(&snapshot)),
        );
        assert_eq!(insights.high_confidence_pct, 42);
        assert_eq!(insights.users_above_90, 3);
        assert_eq!(insights.users_needing_attention, 1);
    }

    #[test]
    fn test_confidence_level_parse() {
        assert_eq!("HIGH".parse::<ConfidenceLevel>(), Ok(ConfidenceLevel::High));
        assert!("extreme".parse::<ConfidenceLevel>().is_err());
    }
}
