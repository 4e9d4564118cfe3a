//! UI Components
//!
//! Leptos components rendering the dashboard `ViewModel`.

pub mod confidence_chart;
pub mod drilldown_panel;
pub mod filters;
pub mod insights;
pub mod loading;
pub mod metric_card;
pub mod toast;
pub mod trend_chart;
pub mod user_detail;
pub mod user_table;

pub use confidence_chart::ConfidenceChart;
pub use drilldown_panel::DrilldownPanel;
pub use filters::Filters;
pub use insights::{KeyInsightsPanel, Recommendations};
pub use loading::{CardSkeleton, DonutSkeleton, TableSkeleton, TrendSkeleton};
pub use metric_card::MetricCards;
pub use toast::Toasts;
pub use trend_chart::TrendChart;
pub use user_detail::UserDetailDialog;
pub use user_table::UserTable;
