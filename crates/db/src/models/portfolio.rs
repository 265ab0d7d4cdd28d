//! Portfolio item model.

use chrono::NaiveDate;
use serde::Serialize;
use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `portfolio_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub category: String,
    pub technologies: Vec<String>,
    /// Public `/uploads/...` paths, oldest first.
    pub images: Vec<String>,
    pub thumbnail: Option<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub client: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub is_featured: bool,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filters for the public portfolio listing. Inactive items are never listed.
#[derive(Debug, Clone, Default)]
pub struct PortfolioFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

/// Active item count for one category.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}
