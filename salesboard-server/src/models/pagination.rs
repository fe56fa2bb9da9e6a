//! Search and pagination parameters

use serde::Deserialize;

/// Default items per page
const DEFAULT_PER_PAGE: u32 = 10;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination; page and per-page are clamped to a minimum of 1.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.per_page as i64
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Query parameters for `GET /transactions-search`.
///
/// Everything arrives as a string; numbers that don't parse fall back to
/// their defaults rather than rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl SearchParams {
    /// Search text, empty when absent.
    pub fn text(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    pub fn pagination(&self) -> Pagination {
        let page = parse_or(self.page.as_deref(), 1);
        let per_page = parse_or(self.per_page.as_deref(), DEFAULT_PER_PAGE);
        Pagination::new(page, per_page)
    }
}

fn parse_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
