//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page number when absent or unparseable.
const DEFAULT_PAGE: i64 = 1;

/// Default page size when absent or unparseable.
const DEFAULT_PER_PAGE: i64 = 10;

/// Pagination parameters (`?page=&perPage=`).
///
/// Parsed leniently: absent or non-numeric values fall back to the defaults
/// instead of rejecting the request, so `?page=abc` behaves like `?page=1`.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    page: Option<String>,
    #[serde(rename = "perPage")]
    per_page: Option<String>,
}

impl PageParams {
    /// Effective page number, at least 1.
    pub fn page(&self) -> i64 {
        parse_or(&self.page, DEFAULT_PAGE)
    }

    /// Effective page size, at least 1.
    pub fn per_page(&self) -> i64 {
        parse_or(&self.per_page, DEFAULT_PER_PAGE)
    }

    /// Number of records to skip: `(page - 1) * perPage`.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

fn parse_or(value: &Option<String>, default: i64) -> i64 {
    value
        .as_deref()
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(default)
}

/// Total number of pages for a record count at the given page size.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + per_page - 1) / per_page
    }
}
