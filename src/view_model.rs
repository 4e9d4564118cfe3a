//! Render-ready projection of the view state
//!
//! Both frontends draw from a [`ViewModel`]: the CLI prints it, the web
//! dashboard binds its fields to components.

use serde::Serialize;

use crate::detail::{row_badges, RowBadge, SuccessTier};
use crate::metrics::{
    confidence_series, trend_series, user_rows, ConfidenceSlice, KeyInsights, SummaryScalars,
    TrendPoint, UserRow, RECOMMENDATIONS,
};
use crate::model::ALL_USERS;
use crate::table::{TablePage, TableState};
use crate::view::{LoadCycle, ViewState};

/// One KPI card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: String,
}

/// Entry of the user selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserOption {
    pub value: String,
    pub label: String,
}

/// A table row with its badges
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    #[serde(flatten)]
    pub row: UserRow,
    pub badges: Vec<RowBadge>,
    pub tier: SuccessTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub tenant_name: String,
    pub window_text: String,
    pub cards: Vec<MetricCard>,
    pub scalars: SummaryScalars,
    pub confidence: Vec<ConfidenceSlice>,
    pub trend: Vec<TrendPoint>,
    pub insights: KeyInsights,
    pub recommendations: Vec<&'static str>,
    pub table: TablePage,
    pub rows: Vec<RowView>,
    pub user_options: Vec<UserOption>,
    pub loading_tenants: bool,
    pub loading_dashboard: bool,
    pub loading_drilldown: bool,
}

impl ViewModel {
    pub fn build(view: &ViewState, table: &TableState) -> Self {
        let snapshot = view.dashboard();
        let scalars = SummaryScalars::from_snapshot(snapshot);
        let confidence = confidence_series(snapshot);
        let all_rows = user_rows(snapshot);
        let insights = KeyInsights::derive(&confidence, &all_rows);
        let page = table.render(&all_rows, view.selected_user());

        let rows = page
            .rows
            .iter()
            .map(|row| RowView {
                badges: row_badges(row, scalars.max_queries_per_user, scalars.min_queries_per_user),
                tier: SuccessTier::for_rate(row.success_rate),
                row: row.clone(),
            })
            .collect();

        let mut user_options = vec![UserOption {
            value: ALL_USERS.to_string(),
            label: "All Users".to_string(),
        }];
        user_options.extend(all_rows.iter().map(|r| UserOption {
            value: r.user_id.clone(),
            label: r.user_name.clone(),
        }));

        Self {
            tenant_name: view.tenant_name().to_string(),
            window_text: view.window().to_string(),
            cards: metric_cards(&scalars),
            scalars,
            confidence,
            trend: trend_series(snapshot),
            insights,
            recommendations: RECOMMENDATIONS.to_vec(),
            table: page,
            rows,
            user_options,
            loading_tenants: view.slot_loading(LoadCycle::Tenants),
            loading_dashboard: view.slot_loading(LoadCycle::Dashboard),
            loading_drilldown: view.slot_loading(LoadCycle::Drilldown),
        }
    }

    /// "Showing analytics for: Acme • 2026-01-19 to 2026-02-18"
    pub fn header(&self) -> String {
        format!("Showing analytics for: {} • {}", self.tenant_name, self.window_text)
    }
}

fn metric_cards(scalars: &SummaryScalars) -> Vec<MetricCard> {
    vec![
        MetricCard {
            title: "Total Queries",
            value: group_thousands(scalars.total_queries),
            subtitle: "Across all users".to_string(),
        },
        MetricCard {
            title: "Failed Queries",
            value: group_thousands(scalars.failed_queries),
            subtitle: format!("{:.1}% failure rate", scalars.failure_rate_pct),
        },
        MetricCard {
            title: "Average Success Rate",
            value: format!("{}%", scalars.avg_success_rate),
            subtitle: "Across all queries".to_string(),
        },
        MetricCard {
            title: "Active Users",
            value: scalars.active_users.to_string(),
            subtitle: format!(
                "{} min, {} max queries",
                scalars.min_queries_per_user, scalars.max_queries_per_user
            ),
        },
    ]
}

/// `1234567` as `"1,234,567"`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
