//! Repository for the `services` table.

use showcase_core::content::ServiceInput;
use showcase_core::types::DbId;
use sqlx::PgPool;

use crate::models::portfolio::CategoryCount;
use crate::models::service::{Service, ServiceFilter};

/// Column list for `services` queries.
const COLUMNS: &str = "\
    id, title, description, short_description, icon, category, features, technologies, \
    pricing, estimated_duration, image, is_featured, is_active, sort_order, \
    created_at, updated_at";

const ORDER_BY: &str = "ORDER BY sort_order ASC, created_at DESC, id DESC";

/// Provides CRUD and listing queries for services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a service, returning the full row.
    pub async fn create(
        pool: &PgPool,
        input: &ServiceInput,
        image: Option<&str>,
    ) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services \
                (title, description, short_description, icon, category, features, \
                 technologies, pricing, estimated_duration, image, \
                 is_featured, is_active, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.short_description)
            .bind(&input.icon)
            .bind(&input.category)
            .bind(&input.features)
            .bind(&input.technologies)
            .bind(&input.pricing)
            .bind(&input.estimated_duration)
            .bind(image)
            .bind(input.is_featured.unwrap_or(false))
            .bind(input.is_active.unwrap_or(true))
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Find a service by ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active services matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &ServiceFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Service>, sqlx::Error> {
        let (where_clause, param_idx) = where_clause(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM services {where_clause} {ORDER_BY} \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Service>(&query);
        if let Some(category) = &filter.category {
            q = q.bind(category);
        }
        if let Some(featured) = filter.featured {
            q = q.bind(featured);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count active services matching `filter`.
    pub async fn count(pool: &PgPool, filter: &ServiceFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = where_clause(filter);
        let query = format!("SELECT COUNT(*) FROM services {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        if let Some(category) = &filter.category {
            q = q.bind(category);
        }
        if let Some(featured) = filter.featured {
            q = q.bind(featured);
        }
        q.fetch_one(pool).await
    }

    /// Count every row, active or not.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM services")
            .fetch_one(pool)
            .await
    }

    /// Active services per category, most populous first.
    pub async fn categories(pool: &PgPool) -> Result<Vec<CategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryCount>(
            "SELECT category, COUNT(*) AS count FROM services \
             WHERE is_active = TRUE \
             GROUP BY category \
             ORDER BY count DESC, category ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Up to `limit` featured active services.
    pub async fn featured(pool: &PgPool, limit: i64) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services \
             WHERE is_active = TRUE AND is_featured = TRUE {ORDER_BY} LIMIT $1"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Replace a service's editable fields. A new `image` replaces the old one.
    ///
    /// Returns `None` if no service has the given `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ServiceInput,
        image: Option<&str>,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET
                title = $2,
                description = $3,
                short_description = $4,
                icon = $5,
                category = $6,
                features = $7,
                technologies = $8,
                pricing = $9,
                estimated_duration = $10,
                is_featured = COALESCE($11, is_featured),
                is_active = COALESCE($12, is_active),
                sort_order = COALESCE($13, sort_order),
                image = COALESCE($14, image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.short_description)
            .bind(&input.icon)
            .bind(&input.category)
            .bind(&input.features)
            .bind(&input.technologies)
            .bind(&input.pricing)
            .bind(&input.estimated_duration)
            .bind(input.is_featured)
            .bind(input.is_active)
            .bind(input.sort_order)
            .bind(image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a service. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn where_clause(filter: &ServiceFilter) -> (String, usize) {
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

    (format!("WHERE {}", conditions.join(" AND ")), param_idx)
}
