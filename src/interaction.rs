//! User actions that read view state without changing it

use crate::dto::BreakdownEntry;
use crate::metrics::ConfidenceLevel;
use crate::view::{LoadCycle, Notice, ViewState};

pub const SELECT_USER_PROMPT: &str = "Select a user to view drilldown counts";
pub const SELECT_USER_HINT: &str = "Drilldown is counts-only per user (v1).";
pub const DRILLDOWN_LOADING: &str = "Loading drilldown...";
pub const DRILLDOWN_MISSING: &str = "No drilldown data available for this user";

/// Result of clicking a confidence segment
///
/// Always a notice: the action never starts a fetch and never fails.
pub fn segment_drilldown(view: &ViewState, level: ConfidenceLevel) -> Notice {
    let Some(user_id) = view.selected_user().user_id() else {
        return Notice::info(SELECT_USER_PROMPT).with_description(SELECT_USER_HINT);
    };

    if view.slot_loading(LoadCycle::Drilldown) {
        return Notice::info(DRILLDOWN_LOADING);
    }

    match view.drilldown() {
        Some(drilldown) if drilldown.user_id == user_id && !drilldown.breakdown.is_empty() => {
            Notice::info(format!("User drilldown: {}", level.label()))
                .with_description(breakdown_line(&drilldown.breakdown))
        }
        _ => Notice::error(DRILLDOWN_MISSING),
    }
}

/// "High: 300 • Low: 70"
pub fn breakdown_line(breakdown: &[BreakdownEntry]) -> String {
    breakdown
        .iter()
        .map(|b| format!("{}: {}", b.label, b.count))
        .collect::<Vec<_>>()
        .join(" • ")
}
