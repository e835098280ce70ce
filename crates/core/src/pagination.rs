//! Offset pagination for list endpoints.
//!
//! Query values arrive as raw strings so that non-numeric input can fall back
//! to the defaults instead of failing the request.

use serde::Serialize;

/// Page number used when none (or an invalid one) is supplied.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when none (or an invalid one) is supplied.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated `(page, page_size)` pair. Both values are always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a page request from raw query values.
    ///
    /// Missing, non-numeric, or `< 1` values fall back to the defaults.
    /// Oversized page sizes are capped at [`MAX_PAGE_SIZE`].
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = parse_positive(page).unwrap_or(DEFAULT_PAGE);
        let page_size = parse_positive(page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        Self { page, page_size }
    }

    /// Rows to skip: `(page - 1) * page_size`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Rows to fetch. One more than the page size so the caller can tell
    /// whether another page exists.
    pub fn fetch_limit(&self) -> i64 {
        self.page_size + 1
    }

    /// Trim an over-fetched row set down to the page and wrap it.
    pub fn into_page<T>(self, mut rows: Vec<T>) -> Page<T> {
        let page_size = usize::try_from(self.page_size).unwrap_or(usize::MAX);
        let has_more = rows.len() > page_size;
        rows.truncate(page_size);
        Page {
            data: rows,
            page: self.page,
            page_size: self.page_size,
            has_more,
        }
    }
}

/// One page of a listing, serialized as
/// `{ "data": [...], "page": n, "pageSize": n, "hasMore": bool }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub has_more: bool,
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
}
