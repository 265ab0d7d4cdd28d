//! Offset pagination arithmetic and search-pattern helpers.
//!
//! List endpoints take `?page=&limit=`, skip `(page - 1) * limit` rows and
//! report [`PageInfo`] alongside the data.

use serde::Serialize;

/// Default page size for contact listings.
pub const DEFAULT_CONTACT_LIMIT: i64 = 10;
/// Default page size for the public portfolio grid.
pub const DEFAULT_PORTFOLIO_LIMIT: i64 = 12;
/// Default page size for the public services list.
pub const DEFAULT_SERVICE_LIMIT: i64 = 10;
/// Upper bound on any page size.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided page size to `1..=max`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>, default_limit: i64) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit, default_limit, MAX_PAGE_LIMIT),
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Pagination metadata returned with every list response.
///
/// The total row count is reported by the caller under an entity-specific
/// key (`totalContacts`, `totalProjects`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageInfo {
    pub fn new(request: &PageRequest, total: i64) -> Self {
        let total = total.max(0);
        let total_pages = (total + request.limit - 1) / request.limit;
        Self {
            current_page: request.page,
            total_pages,
            has_next_page: request.page.saturating_mul(request.limit) < total,
            has_prev_page: request.page > 1,
        }
    }
}

/// Build a `LIKE`/`ILIKE` pattern matching `search` as a literal substring.
///
/// `%`, `_` and `\` in the input are escaped so they match themselves.
pub fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Trim a search query, treating blank input as absent.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(Some(1), Some(10), 10).offset(), 0);
        assert_eq!(PageRequest::new(Some(3), Some(10), 10).offset(), 20);
    }

    #[test]
    fn page_and_limit_are_clamped() {
        let req = PageRequest::new(Some(0), Some(0), 10);
        assert_eq!(req, PageRequest { page: 1, limit: 1 });

        let req = PageRequest::new(Some(-4), Some(10_000), 10);
        assert_eq!(req, PageRequest { page: 1, limit: MAX_PAGE_LIMIT });

        let req = PageRequest::new(None, None, DEFAULT_PORTFOLIO_LIMIT);
        assert_eq!(req.limit, 12);
    }

    #[test]
    fn page_info_middle_page() {
        let info = PageInfo::new(&PageRequest::new(Some(2), Some(10), 10), 25);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next_page);
        assert!(info.has_prev_page);
    }

    #[test]
    fn page_info_last_page_exact_multiple() {
        let info = PageInfo::new(&PageRequest::new(Some(2), Some(10), 10), 20);
        assert_eq!(info.total_pages, 2);
        assert!(!info.has_next_page);
    }

    #[test]
    fn page_beyond_total_has_no_next() {
        // 7 rows, 3 per page -> 3 pages; page 4 is past the end.
        let info = PageInfo::new(&PageRequest::new(Some(4), Some(3), 10), 7);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.current_page, 4);
        assert!(!info.has_next_page);
        assert!(info.has_prev_page);
    }

    #[test]
    fn empty_table() {
        let info = PageInfo::new(&PageRequest::new(None, None, 10), 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next_page);
        assert!(!info.has_prev_page);
    }

    #[test]
    fn page_info_serializes_camel_case() {
        let info = PageInfo::new(&PageRequest::new(Some(1), Some(10), 10), 5);
        let json = serde_json::to_value(info).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["hasNextPage"], false);
        assert_eq!(json["hasPrevPage"], false);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("web"), "%web%");
        assert_eq!(like_pattern("100%_done"), "%100\\%\\_done%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn blank_search_is_absent() {
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(Some(" quote ")), Some("quote".to_string()));
        assert_eq!(normalize_search(None), None);
    }
}
