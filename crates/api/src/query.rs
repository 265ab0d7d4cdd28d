//! Shared query parameter types for API handlers.
//!
//! Page and limit are declared inline on each struct: `#[serde(flatten)]`
//! does not let `serde_urlencoded` parse numbers.

use serde::Deserialize;
use showcase_core::pagination::{normalize_search, PageRequest};

/// Query parameters for `GET /api/contact`.
#[derive(Debug, Default, Deserialize)]
pub struct ContactListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
}

impl ContactListParams {
    /// Clamped page request; see [`PageRequest::new`].
    pub fn page_request(&self, default_limit: i64) -> PageRequest {
        PageRequest::new(self.page, self.limit, default_limit)
    }

    pub fn search(&self) -> Option<String> {
        normalize_search(self.search.as_deref())
    }
}

/// Query parameters for the public portfolio and services listings.
#[derive(Debug, Default, Deserialize)]
pub struct ContentListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    /// Only `featured=true` filters; any other value lists everything.
    pub featured: Option<String>,
    pub search: Option<String>,
}

impl ContentListParams {
    pub fn page_request(&self, default_limit: i64) -> PageRequest {
        PageRequest::new(self.page, self.limit, default_limit)
    }

    pub fn featured_only(&self) -> Option<bool> {
        self.featured
            .as_deref()
            .filter(|v| v.eq_ignore_ascii_case("true"))
            .map(|_| true)
    }

    /// Category filter, trimmed and lower-cased; blank means no filter.
    pub fn category(&self) -> Option<String> {
        normalize_search(self.category.as_deref()).map(|c| c.to_lowercase())
    }

    pub fn search(&self) -> Option<String> {
        normalize_search(self.search.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn featured_flag_only_true() {
        let params = |v: &str| ContentListParams {
            featured: Some(v.to_string()),
            ..Default::default()
        };
        assert_eq!(params("true").featured_only(), Some(true));
        assert_eq!(params("TRUE").featured_only(), Some(true));
        assert_eq!(params("false").featured_only(), None);
        assert_eq!(ContentListParams::default().featured_only(), None);
    }

    #[test]
    fn blank_filters_are_ignored() {
        let params = ContentListParams {
            category: Some("  ".into()),
            search: Some(" rust ".into()),
            ..Default::default()
        };
        assert_eq!(params.category(), None);
        assert_eq!(params.search().as_deref(), Some("rust"));
    }
}
