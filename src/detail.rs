//! Per-user detail view and row badges

use serde::Serialize;

use crate::metrics::{pct_of, ConfidenceLevel, UserRow};

/// What a detail segment counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Confidence(ConfidenceLevel),
    Failed,
}

impl SegmentKind {
    pub fn label(self) -> &'static str {
        match self {
            SegmentKind::Confidence(ConfidenceLevel::High) => "High Confidence (>90%)",
            SegmentKind::Confidence(ConfidenceLevel::Medium) => "Medium Confidence (70-90%)",
            SegmentKind::Confidence(ConfidenceLevel::Low) => "Low Confidence (<70%)",
            SegmentKind::Failed => "Failed Queries",
        }
    }
}

/// One line of the detail breakdown: count, share and bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailSegment {
    pub kind: SegmentKind,
    pub label: &'static str,
    pub count: u64,
    /// Share of the user's total queries, 0 when the total is 0
    pub pct_of_total: f64,
}

impl DetailSegment {
    fn new(kind: SegmentKind, count: u64, total: u64) -> Self {
        Self {
            kind,
            label: kind.label(),
            count,
            pct_of_total: pct_of(count, total),
        }
    }

    /// "12 queries (3.4%)"
    pub fn summary(&self) -> String {
        format!("{} queries ({:.1}%)", self.count, self.pct_of_total)
    }

    /// Width of the proportional bar, clamped to `[0, 100]`
    pub fn bar_width_pct(&self) -> f64 {
        self.pct_of_total.clamp(0.0, 100.0)
    }
}

/// Detail surface opened from a table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDetail {
    pub user_id: String,
    pub user_name: String,
    pub total_queries: u64,
    pub success_rate: i64,
    pub confidence_reported: bool,
    pub segments: Vec<DetailSegment>,
}

impl UserDetail {
    pub fn from_row(row: &UserRow) -> Self {
        let total = row.total_queries;
        Self {
            user_id: row.user_id.clone(),
            user_name: row.user_name.clone(),
            total_queries: total,
            success_rate: row.success_rate,
            confidence_reported: row.confidence_reported,
            segments: vec![
                DetailSegment::new(
                    SegmentKind::Confidence(ConfidenceLevel::High),
                    row.high_confidence,
                    total,
                ),
                DetailSegment::new(
                    SegmentKind::Confidence(ConfidenceLevel::Medium),
                    row.medium_confidence,
                    total,
                ),
                DetailSegment::new(
                    SegmentKind::Confidence(ConfidenceLevel::Low),
                    row.low_confidence,
                    total,
                ),
                DetailSegment::new(SegmentKind::Failed, row.failed_queries, total),
            ],
        }
    }

    pub fn title(&self) -> String {
        format!("{} - Query Confidence Breakdown", self.user_name)
    }
}

/// Marker shown next to a user's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowBadge {
    /// Highest query count in the tenant
    Top,
    /// Lowest query count in the tenant
    Low,
}

impl RowBadge {
    pub fn label(self) -> &'static str {
        match self {
            RowBadge::Top => "Top",
            RowBadge::Low => "Low",
        }
    }
}

pub fn row_badges(row: &UserRow, max_queries: u64, min_queries: u64) -> Vec<RowBadge> {
    let mut badges = Vec::new();
    if row.total_queries == max_queries {
        badges.push(RowBadge::Top);
    }
    if row.total_queries == min_queries {
        badges.push(RowBadge::Low);
    }
    badges
}

/// Colour band of a success-rate badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SuccessTier {
    Good,
    Fair,
    Poor,
}

impl SuccessTier {
    pub fn for_rate(success_rate: i64) -> Self {
        if success_rate >= 90 {
            SuccessTier::Good
        } else if success_rate >= 70 {
            SuccessTier::Fair
        } else {
            SuccessTier::Poor
        }
    }
}
