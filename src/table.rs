//! User table engine
//!
//! Sorting, filtering and pagination of per-user rows. The state is a plain
//! value; every transition that changes what is shown goes back to page 1.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::UserRow;
use crate::model::UserSelection;

/// Page sizes offered by the "rows per page" selector
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Column a table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    UserId,
    UserName,
    TotalQueries,
    FailedQueries,
    SuccessRate,
    HighConfidence,
    MediumConfidence,
    LowConfidence,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::UserId,
            SortKey::UserName,
            SortKey::TotalQueries,
            SortKey::FailedQueries,
            SortKey::SuccessRate,
            SortKey::HighConfidence,
            SortKey::MediumConfidence,
            SortKey::LowConfidence,
        ]
    }

    /// Ascending comparison of two rows on this column
    pub fn compare(self, a: &UserRow, b: &UserRow) -> Ordering {
        match self {
            SortKey::UserId => a.user_id.cmp(&b.user_id),
            SortKey::UserName => a.user_name.cmp(&b.user_name),
            SortKey::TotalQueries => a.total_queries.cmp(&b.total_queries),
            SortKey::FailedQueries => a.failed_queries.cmp(&b.failed_queries),
            SortKey::SuccessRate => a.success_rate.cmp(&b.success_rate),
            SortKey::HighConfidence => a.high_confidence.cmp(&b.high_confidence),
            SortKey::MediumConfidence => a.medium_confidence.cmp(&b.medium_confidence),
            SortKey::LowConfidence => a.low_confidence.cmp(&b.low_confidence),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::UserId => "User ID",
            SortKey::UserName => "User",
            SortKey::TotalQueries => "Total Queries",
            SortKey::FailedQueries => "Failed",
            SortKey::SuccessRate => "Success Rate",
            SortKey::HighConfidence => "High",
            SortKey::MediumConfidence => "Medium",
            SortKey::LowConfidence => "Low",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "user_id" => Ok(SortKey::UserId),
            "user" | "user_name" | "name" => Ok(SortKey::UserName),
            "total" | "total_queries" => Ok(SortKey::TotalQueries),
            "failed" | "failed_queries" => Ok(SortKey::FailedQueries),
            "success" | "success_rate" => Ok(SortKey::SuccessRate),
            "high" | "high_confidence" => Ok(SortKey::HighConfidence),
            "medium" | "medium_confidence" => Ok(SortKey::MediumConfidence),
            "low" | "low_confidence" => Ok(SortKey::LowConfidence),
            _ => Err(TableError::UnknownSortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Stable sort; equal rows keep their input order in both directions
pub fn sort_rows(rows: &mut [UserRow], key: SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| direction.apply(key.compare(a, b)));
}

/// Restrict rows to the selected user, or keep all of them
pub fn filter_rows(rows: &[UserRow], selection: &UserSelection) -> Vec<UserRow> {
    match selection {
        UserSelection::All => rows.to_vec(),
        UserSelection::User(id) => rows.iter().filter(|r| &r.user_id == id).cloned().collect(),
    }
}

/// `ceil(count / page_size)`; zero rows means zero pages
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        count.div_ceil(page_size)
    }
}

/// Items of the 1-based `page`; out-of-range pages are empty
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Sort, page and page-size state of the user table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    pub sort_key: SortKey,
    pub direction: SortDirection,
    /// 1-based
    pub current_page: usize,
    pub page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort_key: SortKey::TotalQueries,
            direction: SortDirection::Descending,
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableState {
    /// Same key flips the direction, a new key starts ascending
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = self.direction.flip();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Ascending;
        }
        self.current_page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(TableError::UnsupportedPageSize(page_size));
        }
        self.page_size = page_size;
        self.current_page = 1;
        Ok(())
    }

    pub fn first_page(&mut self) {
        self.current_page = 1;
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.current_page = (self.current_page + 1).min(total_pages.max(1));
    }

    pub fn last_page(&mut self, total_pages: usize) {
        self.current_page = total_pages.max(1);
    }

    /// Jump to `page`, clamped to the available pages
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    /// Rows in display order: filtered, then sorted
    pub fn arrange(&self, rows: &[UserRow], selection: &UserSelection) -> Vec<UserRow> {
        let mut visible = filter_rows(rows, selection);
        sort_rows(&mut visible, self.sort_key, self.direction);
        visible
    }

    /// The page currently on screen
    ///
    /// A page past the end (the row set shrank since navigation) is shown as
    /// the last page.
    pub fn render(&self, rows: &[UserRow], selection: &UserSelection) -> TablePage {
        let arranged = self.arrange(rows, selection);
        let total_rows = arranged.len();
        let total_pages = total_pages(total_rows, self.page_size);
        let current_page = self.current_page.clamp(1, total_pages.max(1));

        TablePage {
            rows: page_slice(&arranged, current_page, self.page_size).to_vec(),
            current_page,
            total_pages,
            total_rows,
            page_size: self.page_size,
            sort_key: self.sort_key,
            direction: self.direction,
            can_previous: current_page > 1,
            can_next: current_page < total_pages,
        }
    }
}

/// One rendered page of the user table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePage {
    pub rows: Vec<UserRow>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub page_size: usize,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub can_previous: bool,
    pub can_next: bool,
}

impl TablePage {
    /// "Page 1 of 3 (12 total)"
    pub fn status_line(&self) -> String {
        format!(
            "Page {} of {} ({} total)",
            self.current_page, self.total_pages, self.total_rows
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Unsupported page size {0}: expected one of 5, 10, 20, 50")]
    UnsupportedPageSize(usize),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::user_rows;
    use crate::test_support::{snapshot_with_users, twelve_users, user};

    fn ids(rows: &[UserRow]) -> Vec<&str> {
        rows.iter().map(|r| r.user_id.as_str()).collect()
    }

    #[test]
    fn test_default_state() {
        let state = TableState::default();
        assert_eq!(state.sort_key, SortKey::TotalQueries);
        assert_eq!(state.direction, SortDirection::Descending);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.page_size, 5);
    }

    #[test]
    fn test_twelve_users_page_three() {
        let rows = user_rows(Some(&twelve_users()));
        let mut state = TableState::default();
        state.current_page = 3;

        let page = state.render(&rows, &UserSelection::All);
        assert_eq!(page.total_pages, 3);
        assert_eq!(ids(&page.rows), vec!["u011", "u012"]);
        assert!(!page.can_next);
        assert!(page.can_previous);
        assert_eq!(page.status_line(), "Page 3 of 3 (12 total)");

        state.first_page();
        let page = state.render(&rows, &UserSelection::All);
        assert_eq!(ids(&page.rows), vec!["u001", "u002", "u003", "u004", "u005"]);
        assert!(!page.can_previous);
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = TableState::default();
        state.current_page = 2;

        state.toggle_sort(SortKey::TotalQueries);
        assert_eq!(state.direction, SortDirection::Ascending);
        assert_eq!(state.current_page, 1);

        state.toggle_sort(SortKey::TotalQueries);
        assert_eq!(state.direction, SortDirection::Descending);

        state.toggle_sort(SortKey::SuccessRate);
        assert_eq!(state.sort_key, SortKey::SuccessRate);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_ties_keep_input_order_both_ways() {
        let snapshot = snapshot_with_users(vec![
            user("a", 10, 0, 100.0),
            user("b", 20, 0, 100.0),
            user("c", 10, 0, 100.0),
            user("d", 20, 0, 100.0),
        ]);
        let mut rows = user_rows(Some(&snapshot));

        sort_rows(&mut rows, SortKey::TotalQueries, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["a", "c", "b", "d"]);

        sort_rows(&mut rows, SortKey::TotalQueries, SortDirection::Descending);
        assert_eq!(ids(&rows), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_page_size_change() {
        let mut state = TableState::default();
        state.current_page = 3;
        assert_eq!(
            state.set_page_size(7),
            Err(TableError::UnsupportedPageSize(7))
        );
        assert_eq!(state.current_page, 3);

        state.set_page_size(10).unwrap();
        assert_eq!(state.page_size, 10);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_navigation_clamps() {
        let mut state = TableState::default();
        state.previous_page();
        assert_eq!(state.current_page, 1);

        state.next_page(2);
        state.next_page(2);
        assert_eq!(state.current_page, 2);

        state.last_page(0);
        assert_eq!(state.current_page, 1);

        state.go_to(9, 3);
        assert_eq!(state.current_page, 3);
    }

    #[test]
    fn test_filter_to_single_user() {
        let rows = user_rows(Some(&twelve_users()));
        let mut state = TableState::default();
        state.current_page = 3;

        let page = state.render(&rows, &UserSelection::User("u007".to_string()));
        assert_eq!(ids(&page.rows), vec!["u007"]);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);

        let page = state.render(&rows, &UserSelection::All);
        assert_eq!(page.total_rows, 12);
        assert_eq!(page.current_page, 3);
    }

    #[test]
    fn test_empty_table() {
        let page = TableState::default().render(&[], &UserSelection::All);
        assert_eq!(page.total_pages, 0);
        assert!(page.rows.is_empty());
        assert!(!page.can_next);
        assert!(!page.can_previous);
    }

    #[test]
    fn test_page_slice_bounds() {
        let items = [1, 2, 3, 4, 5, 6, 7];
        assert_eq!(page_slice(&items, 2, 5), &[6, 7]);
        assert_eq!(page_slice(&items, 3, 5), &[] as &[i32]);
        assert_eq!(page_slice(&items, 0, 5), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("total-queries".parse::<SortKey>(), Ok(SortKey::TotalQueries));
        assert_eq!("success".parse::<SortKey>(), Ok(SortKey::SuccessRate));
        assert!("color".parse::<SortKey>().is_err());
    }
}
