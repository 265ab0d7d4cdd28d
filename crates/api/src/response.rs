//! Shared response envelope types for API handlers.
//!
//! Single resources use a `{ "data": ... }` envelope, paginated listings add
//! a `pagination` object, and writes that carry a user-facing confirmation
//! add a `message`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use showcase_core::pagination::{PageInfo, PageRequest};

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ..., "data": T }` envelope for writes.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl MessageResponse<()> {
    /// A response with only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// `{ "data": [...], "pagination": {...} }` envelope for list endpoints.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Page metadata plus the total row count under an entity-specific key
/// (`totalContacts`, `totalProjects`, `totalServices`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub info: PageInfo,
    pub total_key: &'static str,
    pub total: i64,
}

impl Pagination {
    pub fn new(request: &PageRequest, total: i64, total_key: &'static str) -> Self {
        Self {
            info: PageInfo::new(request, total),
            total_key,
            total,
        }
    }
}

impl Serialize for Pagination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("currentPage", &self.info.current_page)?;
        map.serialize_entry("totalPages", &self.info.total_pages)?;
        map.serialize_entry(self.total_key, &self.total)?;
        map.serialize_entry("hasNextPage", &self.info.has_next_page)?;
        map.serialize_entry("hasPrevPage", &self.info.has_prev_page)?;
        map.end()
    }
}
