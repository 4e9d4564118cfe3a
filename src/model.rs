//! Core domain types
//!
//! - `TenantSummary`: a selectable tenant
//! - `DateWindow`: an inclusive `[start, end]` date range
//! - `UserSelection`: the user filter ("all" or one user)

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire format for every date exchanged with the backend
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Value used by selectors to mean "no specific user"
pub const ALL_USERS: &str = "all";

/// A tenant as listed by the tenants endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSummary {
    pub id: String,
    pub name: String,
    pub total_queries: u64,
}

/// Inclusive date window shared by every query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked bounds, validated by [`DateWindow::new`] on deserialize
#[derive(Deserialize)]
struct WindowBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<WindowBounds> for DateWindow {
    type Error = ModelError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        DateWindow::new(bounds.start, bounds.end)
    }
}

impl DateWindow {
    /// Create a window, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ModelError> {
        if start > end {
            return Err(ModelError::InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds from `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self, ModelError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// The `days`-long window ending on `today`
    ///
    /// `last_days(today, 30)` spans 30 days back, matching the dashboard's
    /// "30d" preset (both bounds inclusive).
    /// Ranges reaching past the earliest representable date start there.
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        let start = today
            .checked_sub_days(Days::new(days.max(0) as u64))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// Number of calendar days covered, counting both ends
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `date` falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start_param(), self.end_param())
    }
}

/// Quick-pick ranges offered next to the date inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatePreset {
    #[serde(rename = "7d")]
    Last7,
    #[serde(rename = "30d")]
    Last30,
    #[serde(rename = "90d")]
    Last90,
}

impl DatePreset {
    pub fn all() -> &'static [DatePreset] {
        &[DatePreset::Last7, DatePreset::Last30, DatePreset::Last90]
    }

    pub fn days(self) -> i64 {
        match self {
            DatePreset::Last7 => 7,
            DatePreset::Last30 => 30,
            DatePreset::Last90 => 90,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DatePreset::Last7 => "7d",
            DatePreset::Last30 => "30d",
            DatePreset::Last90 => "90d",
        }
    }

    pub fn window(self, today: NaiveDate) -> DateWindow {
        DateWindow::last_days(today, self.days())
    }
}

impl std::str::FromStr for DatePreset {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7d" => Ok(DatePreset::Last7),
            "30d" => Ok(DatePreset::Last30),
            "90d" => Ok(DatePreset::Last90),
            other => Err(ModelError::UnknownPreset(other.to_string())),
        }
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, ModelError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ModelError::InvalidDate(value.to_string()))
}

/// Which users the table and drilldown are scoped to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum UserSelection {
    #[default]
    All,
    User(String),
}

impl UserSelection {
    /// Build from a selector value where `"all"` (or empty) means every user
    pub fn from_value(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_USERS {
            UserSelection::All
        } else {
            UserSelection::User(value.to_string())
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            UserSelection::All => None,
            UserSelection::User(id) => Some(id),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, UserSelection::All)
    }

    /// Selector value, the inverse of [`UserSelection::from_value`]
    pub fn as_value(&self) -> &str {
        self.user_id().unwrap_or(ALL_USERS)
    }
}

/// Errors raised when building domain values from user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid date window: start {start} is after end {end}")]
    InvertedWindow { start: NaiveDate, end: NaiveDate },

    #[error("Unknown date preset '{0}': expected 7d, 30d or 90d")]
    UnknownPreset(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_window_rejects_inverted_range() {
        let err = DateWindow::new(date("2026-02-18"), date("2026-01-19")).unwrap_err();
        assert!(matches!(err, ModelError::InvertedWindow { .. }));
    }

    #[test]
    fn test_deserialize_checks_order() {
        let window: DateWindow =
            serde_json::from_str(r#"{"start": "2026-01-19", "end": "2026-02-18"}"#).unwrap();
        assert_eq!(window.len_days(), 31);

        let err = serde_json::from_str::<DateWindow>(r#"{"start": "2026-02-18", "end": "2026-01-19"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("start 2026-02-18 is after end 2026-01-19"));
    }

    #[test]
    fn test_single_day_window() {
        let window = DateWindow::parse("2026-01-19", "2026-01-19").unwrap();
        assert_eq!(window.len_days(), 1);
        assert!(window.contains(date("2026-01-19")));
    }

    #[test]
    fn test_window_params_and_display() {
        let window = DateWindow::parse("2026-01-19", "2026-02-18").unwrap();
        assert_eq!(window.start_param(), "2026-01-19");
        assert_eq!(window.end_param(), "2026-02-18");
        assert_eq!(window.to_string(), "2026-01-19 to 2026-02-18");
        assert_eq!(window.len_days(), 31);
    }

    #[test]
    fn test_last_days() {
        let window = DateWindow::last_days(date("2026-02-18"), 30);
        assert_eq!(window.start_param(), "2026-01-19");
        assert_eq!(window.end(), date("2026-02-18"));
    }

    #[test]
    fn test_last_days_saturates() {
        let window = DateWindow::last_days(date("2026-02-18"), i64::MAX);
        assert_eq!(window.start(), NaiveDate::MIN);
        assert_eq!(window.end(), date("2026-02-18"));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(
            parse_date("02/18/2026").unwrap_err(),
            ModelError::InvalidDate("02/18/2026".to_string())
        );
    }

    #[test]
    fn test_user_selection_values() {
        assert_eq!(UserSelection::from_value("all"), UserSelection::All);
        assert_eq!(UserSelection::from_value(""), UserSelection::All);
        let user = UserSelection::from_value("u002");
        assert_eq!(user.user_id(), Some("u002"));
        assert_eq!(user.as_value(), "u002");
        assert_eq!(UserSelection::All.as_value(), "all");
    }

    #[test]
    fn test_date_presets() {
        let preset: DatePreset = "90d".parse().unwrap();
        let window = preset.window(date("2026-02-18"));
        assert_eq!(window.start_param(), "2025-11-20");
        assert_eq!(DatePreset::Last7.label(), "7d");
        assert!("1y".parse::<DatePreset>().is_err());
    }
}
