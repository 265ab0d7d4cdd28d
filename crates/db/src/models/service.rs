//! Service offering model.

use serde::Serialize;
use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub icon: Option<String>,
    pub category: String,
    pub features: Vec<String>,
    pub technologies: Vec<String>,
    pub pricing: String,
    pub estimated_duration: Option<String>,
    pub image: Option<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filters for the public services listing.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
}
