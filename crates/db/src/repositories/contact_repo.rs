//! Repository for the `contacts` table.

use showcase_core::pagination::like_pattern;
use showcase_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact::{
    Contact, ContactDetail, ContactFilter, ContactRow, CreateContact, StatusCount, UpdateContact,
};

/// Column list for plain `contacts` queries.
const COLUMNS: &str = "\
    id, name, email, subject, message, status, priority, source, \
    admin_notes, replied_by, ip_address, user_agent, created_at, updated_at";

/// Contact columns plus the handling user's public fields.
///
/// Expects the contact relation aliased as `c` and `users` as `u`.
const DETAIL_COLUMNS: &str = "\
    c.id, c.name, c.email, c.subject, c.message, c.status, c.priority, c.source, \
    c.admin_notes, c.replied_by, c.ip_address, c.user_agent, c.created_at, c.updated_at, \
    u.name AS replied_by_name, u.email AS replied_by_email, u.role AS replied_by_role";

const DETAIL_FROM: &str = "FROM contacts c LEFT JOIN users u ON u.id = c.replied_by";

/// Provides intake, triage and statistics queries for contacts.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new contact, returning the full row.
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts \
                (name, email, subject, message, status, priority, source, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(&input.source)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Find a contact by ID, with its `repliedBy` user resolved.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactDetail>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_FROM} WHERE c.id = $1");
        let row = sqlx::query_as::<_, ContactRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ContactDetail::from))
    }

    /// List contacts matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ContactFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContactDetail>, sqlx::Error> {
        let (where_clause, param_idx) = where_clause(filter);
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM} {where_clause} \
             ORDER BY c.created_at DESC, c.id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, ContactRow>(&query);
        if let Some(status) = &filter.status {
            q = q.bind(status);
        }
        if let Some(priority) = &filter.priority {
            q = q.bind(priority);
        }
        if let Some(search) = &filter.search {
            q = q.bind(like_pattern(search));
        }
        q = q.bind(limit).bind(offset);

        let rows = q.fetch_all(pool).await?;
        Ok(rows.into_iter().map(ContactDetail::from).collect())
    }

    /// Count contacts matching `filter`.
    pub async fn count(pool: &PgPool, filter: &ContactFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = where_clause(filter);
        let query = format!("SELECT COUNT(*) FROM contacts c {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        if let Some(status) = &filter.status {
            q = q.bind(status);
        }
        if let Some(priority) = &filter.priority {
            q = q.bind(priority);
        }
        if let Some(search) = &filter.search {
            q = q.bind(like_pattern(search));
        }
        q.fetch_one(pool).await
    }

    /// Apply a triage update. Only non-`None` fields in `input` are written.
    ///
    /// Returns `None` if no contact has the given `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContact,
    ) -> Result<Option<ContactDetail>, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                UPDATE contacts SET
                    status = COALESCE($2, status),
                    priority = COALESCE($3, priority),
                    admin_notes = COALESCE($4, admin_notes),
                    replied_by = COALESCE($5, replied_by)
                WHERE id = $1
                RETURNING *
             )
             SELECT {DETAIL_COLUMNS} FROM c LEFT JOIN users u ON u.id = c.replied_by"
        );
        let row = sqlx::query_as::<_, ContactRow>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(&input.admin_notes)
            .bind(input.replied_by)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ContactDetail::from))
    }

    /// Delete a contact. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of contacts per status. Statuses with no rows are omitted.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM contacts GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }
}

/// Build the `WHERE` clause for `filter`.
///
/// Returns the clause (empty when unfiltered) and the next free parameter
/// index. Parameters must be bound in the order status, priority, search.
fn where_clause(filter: &ContactFilter) -> (String, usize) {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_idx: usize = 1;

    if filter.status.is_some() {
        conditions.push(format!("c.status = ${param_idx}"));
        param_idx += 1;
    }
    if filter.priority.is_some() {
        conditions.push(format!("c.priority = ${param_idx}"));
        param_idx += 1;
    }
    if filter.search.is_some() {
        conditions.push(format!(
            "(c.name ILIKE ${param_idx} OR c.email ILIKE ${param_idx} \
              OR c.subject ILIKE ${param_idx} OR c.message ILIKE ${param_idx})"
        ));
        param_idx += 1;
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, param_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_has_no_where() {
        let (clause, next) = where_clause(&ContactFilter::default());
        assert!(clause.is_empty());
        assert_eq!(next, 1);
    }

    #[test]
    fn parameters_are_numbered_in_bind_order() {
        let filter = ContactFilter {
            status: None,
            priority: Some("HIGH".into()),
            search: Some("quote".into()),
        };
        let (clause, next) = where_clause(&filter);
        assert!(clause.starts_with("WHERE c.priority = $1 AND (c.name ILIKE $2"));
        assert!(clause.contains("c.message ILIKE $2"));
        assert_eq!(next, 3);
    }
}
