//! Repository for the `portfolio_items` table.

use showcase_core::content::PortfolioInput;
use showcase_core::pagination::like_pattern;
use showcase_core::types::DbId;
use sqlx::PgPool;

use crate::models::portfolio::{CategoryCount, PortfolioFilter, PortfolioItem};

/// Column list for `portfolio_items` queries.
const COLUMNS: &str = "\
    id, title, description, short_description, category, technologies, images, \
    thumbnail, live_url, github_url, client, start_date, end_date, \
    is_completed, is_featured, is_active, sort_order, created_at, updated_at";

/// Public listing order: curated position first, then newest.
const ORDER_BY: &str = "ORDER BY sort_order ASC, created_at DESC, id DESC";

/// Provides CRUD and listing queries for portfolio items.
pub struct PortfolioRepo;

impl PortfolioRepo {
    /// Insert a portfolio item. `image` (a public upload path) becomes both
    /// the thumbnail and the first entry of `images`.
    pub async fn create(
        pool: &PgPool,
        input: &PortfolioInput,
        image: Option<&str>,
    ) -> Result<PortfolioItem, sqlx::Error> {
        let images: Vec<String> = image.map(|p| vec![p.to_string()]).unwrap_or_default();
        let query = format!(
            "INSERT INTO portfolio_items \
                (title, description, short_description, category, technologies, images, \
                 thumbnail, live_url, github_url, client, start_date, end_date, \
                 is_completed, is_featured, is_active, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PortfolioItem>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.short_description)
            .bind(&input.category)
            .bind(&input.technologies)
            .bind(&images)
            .bind(image)
            .bind(&input.live_url)
            .bind(&input.github_url)
            .bind(&input.client)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.is_completed.unwrap_or(true))
            .bind(input.is_featured.unwrap_or(false))
            .bind(input.is_active.unwrap_or(true))
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Find a portfolio item by ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PortfolioItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM portfolio_items WHERE id = $1");
        sqlx::query_as::<_, PortfolioItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active items matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &PortfolioFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PortfolioItem>, sqlx::Error> {
        let (where_clause, param_idx) = where_clause(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM portfolio_items {where_clause} {ORDER_BY} \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, PortfolioItem>(&query);
        if let Some(category) = &filter.category {
            q = q.bind(category);
        }
        if let Some(featured) = filter.featured {
            q = q.bind(featured);
        }
        if let Some(search) = &filter.search {
            q = q.bind(like_pattern(search)).bind(search);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count active items matching `filter`.
    pub async fn count(pool: &PgPool, filter: &PortfolioFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = where_clause(filter);
        let query = format!("SELECT COUNT(*) FROM portfolio_items {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        if let Some(category) = &filter.category {
            q = q.bind(category);
        }
        if let Some(featured) = filter.featured {
            q = q.bind(featured);
        }
        if let Some(search) = &filter.search {
            q = q.bind(like_pattern(search)).bind(search);
        }
        q.fetch_one(pool).await
    }

    /// Count every row, active or not.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM portfolio_items")
            .fetch_one(pool)
            .await
    }

    /// Active items per category, most populous first.
    pub async fn categories(pool: &PgPool) -> Result<Vec<CategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryCount>(
            "SELECT category, COUNT(*) AS count FROM portfolio_items \
             WHERE is_active = TRUE \
             GROUP BY category \
             ORDER BY count DESC, category ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Up to `limit` featured active items.
    pub async fn featured(pool: &PgPool, limit: i64) -> Result<Vec<PortfolioItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM portfolio_items \
             WHERE is_active = TRUE AND is_featured = TRUE {ORDER_BY} LIMIT $1"
        );
        sqlx::query_as::<_, PortfolioItem>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Replace an item's editable fields.
    ///
    /// Flags and sort order keep their current value when not supplied. A new
    /// `image` replaces the thumbnail and is appended to `images`. Returns
    /// `None` if no item has the given `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &PortfolioInput,
        image: Option<&str>,
    ) -> Result<Option<PortfolioItem>, sqlx::Error> {
        let query = format!(
            "UPDATE portfolio_items SET
                title = $2,
                description = $3,
                short_description = $4,
                category = $5,
                technologies = $6,
                live_url = $7,
                github_url = $8,
                client = $9,
                start_date = $10,
                end_date = $11,
                is_completed = COALESCE($12, is_completed),
                is_featured = COALESCE($13, is_featured),
                is_active = COALESCE($14, is_active),
                sort_order = COALESCE($15, sort_order),
                thumbnail = COALESCE($16::TEXT, thumbnail),
                images = CASE WHEN $16::TEXT IS NULL THEN images
                              ELSE array_append(images, $16::TEXT) END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PortfolioItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.short_description)
            .bind(&input.category)
            .bind(&input.technologies)
            .bind(&input.live_url)
            .bind(&input.github_url)
            .bind(&input.client)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.is_completed)
            .bind(input.is_featured)
            .bind(input.is_active)
            .bind(input.sort_order)
            .bind(image)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolio_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build the `WHERE` clause for a public listing.
///
/// Bind order: category, featured, then the search pattern followed by the
/// raw search text (matched exactly against technologies).
fn where_clause(filter: &PortfolioFilter) -> (String, usize) {
    let mut conditions: Vec<String> = vec!["is_active = TRUE".to_string()];
    let mut param_idx: usize = 1;

    if filter.category.is_some() {
        conditions.push(format!("category = ${param_idx}"));
        param_idx += 1;
    }
    if filter.featured.is_some() {
        conditions.push(format!("is_featured = ${param_idx}"));
        param_idx += 1;
    }
    if filter.search.is_some() {
        conditions.push(format!(
            "(title ILIKE ${param_idx} OR description ILIKE ${param_idx} \
              OR EXISTS (SELECT 1 FROM unnest(technologies) AS t(tech) \
                         WHERE LOWER(t.tech) = LOWER(${})))",
            param_idx + 1
        ));
        param_idx += 2;
    }

    (format!("WHERE {}", conditions.join(" AND ")), param_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_restricted_to_active() {
        let (clause, next) = where_clause(&PortfolioFilter::default());
        assert_eq!(clause, "WHERE is_active = TRUE");
        assert_eq!(next, 1);
    }

    #[test]
    fn search_consumes_two_parameters() {
        let filter = PortfolioFilter {
            category: Some("saas".into()),
            featured: None,
            search: Some("rust".into()),
        };
        let (clause, next) = where_clause(&filter);
        assert!(clause.contains("category = $1"));
        assert!(clause.contains("title ILIKE $2"));
        assert!(clause.contains("LOWER($3)"));
        assert_eq!(next, 4);
    }
}
