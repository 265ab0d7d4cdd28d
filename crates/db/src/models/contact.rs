//! Contact entity model and DTOs.

use serde::Serialize;
use showcase_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// One of `NEW`, `IN_PROGRESS`, `COMPLETED`, `SPAM`.
    pub status: String,
    /// One of `LOW`, `MEDIUM`, `HIGH`.
    pub priority: String,
    pub source: String,
    pub admin_notes: Option<String>,
    #[serde(rename = "repliedById")]
    pub replied_by: Option<DbId>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A contact joined with the public fields of the user who handled it.
#[derive(Debug, Clone, FromRow)]
pub struct ContactRow {
    #[sqlx(flatten)]
    pub contact: Contact,
    pub replied_by_name: Option<String>,
    pub replied_by_email: Option<String>,
    pub replied_by_role: Option<String>,
}

/// API representation of a contact with its `repliedBy` user embedded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetail {
    #[serde(flatten)]
    pub contact: Contact,
    pub replied_by: Option<UserSummary>,
}

impl From<ContactRow> for ContactDetail {
    fn from(row: ContactRow) -> Self {
        let replied_by = match (
            row.contact.replied_by,
            row.replied_by_name,
            row.replied_by_email,
            row.replied_by_role,
        ) {
            (Some(id), Some(name), Some(email), Some(role)) => Some(UserSummary {
                id,
                name,
                email,
                role,
            }),
            _ => None,
        };
        Self {
            contact: row.contact,
            replied_by,
        }
    }
}

/// DTO for inserting a new contact.
#[derive(Debug, Clone)]
pub struct CreateContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub priority: String,
    pub source: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// DTO for the admin triage update. Only non-`None` fields are written.
#[derive(Debug, Clone, Default)]
pub struct UpdateContact {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub admin_notes: Option<String>,
    pub replied_by: Option<DbId>,
}

impl UpdateContact {
    /// `true` when none of the admin-editable fields are set.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.admin_notes.is_none()
    }
}

/// Filters for the admin contact listing.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    /// Already-trimmed search text; matched case-insensitively as a substring.
    pub search: Option<String>,
}

/// Number of contacts in one status.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
