//! Handlers for the `/contact` resource: public intake and admin triage.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use showcase_core::contact::{
    validate_notes, ContactPriority, ContactSource, ContactStatus, ContactSubmission,
};
use showcase_core::error::CoreError;
use showcase_core::pagination::DEFAULT_CONTACT_LIMIT;
use showcase_core::types::{DbId, Timestamp};
use showcase_db::models::contact::{
    Contact, ContactFilter, CreateContact, StatusCount, UpdateContact,
};
use showcase_db::repositories::ContactRepo;

use crate::config::MailDelivery;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::client::ClientMeta;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ContactListParams;
use crate::response::{DataResponse, MessageResponse, PagedResponse, Pagination};
use crate::state::AppState;

const THANK_YOU: &str = "Thank you for your message! We will get back to you soon.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Public acknowledgement of a stored submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub submitted_at: Timestamp,
}

impl From<&Contact> for SubmissionReceipt {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name.clone(),
            email: contact.email.clone(),
            subject: contact.subject.clone(),
            submitted_at: contact.created_at,
        }
    }
}

/// Request body for `PUT /contact/{id}`. Unrecognised fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateContactRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(alias = "adminNotes")]
    pub notes: Option<String>,
}

impl UpdateContactRequest {
    /// Validate enumerations and notes, producing the repository update.
    fn into_update(self, acting_user: DbId) -> Result<UpdateContact, CoreError> {
        let status = self
            .status
            .map(|s| s.parse::<ContactStatus>())
            .transpose()?;
        let priority = self
            .priority
            .map(|p| p.parse::<ContactPriority>())
            .transpose()?;
        if let Some(notes) = &self.notes {
            validate_notes(notes)?;
        }

        let update = UpdateContact {
            status: status.map(|s| s.as_str().to_string()),
            priority: priority.map(|p| p.as_str().to_string()),
            admin_notes: self.notes,
            replied_by: Some(acting_user),
        };
        if update.is_empty() {
            return Err(CoreError::Validation(
                "No valid fields to update. Provide status, priority or notes".into(),
            ));
        }
        Ok(update)
    }
}

/// Totals for the admin dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStats {
    pub total: i64,
    pub new: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub spam: i64,
    /// Every status present in the table, most frequent first.
    pub breakdown: Vec<StatusCount>,
}

impl ContactStats {
    fn from_counts(breakdown: Vec<StatusCount>) -> Self {
        let count = |status: ContactStatus| {
            breakdown
                .iter()
                .find(|c| c.status == status.as_str())
                .map_or(0, |c| c.count)
        };
        Self {
            total: breakdown.iter().map(|c| c.count).sum(),
            new: count(ContactStatus::New),
            in_progress: count(ContactStatus::InProgress),
            completed: count(ContactStatus::Completed),
            spam: count(ContactStatus::Spam),
            breakdown,
        }
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contact",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/contact
///
/// Public submission. Emails are best-effort: their failure never fails the
/// request.
pub async fn create_contact(
    State(state): State<AppState>,
    client: ClientMeta,
    AppJson(input): AppJson<ContactSubmission>,
) -> AppResult<impl IntoResponse> {
    let submission = input.into_validated()?;

    let contact = ContactRepo::create(
        &state.pool,
        &CreateContact {
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            status: ContactStatus::New.as_str().to_string(),
            priority: ContactPriority::Low.as_str().to_string(),
            source: ContactSource::Website.as_str().to_string(),
            ip_address: client.ip_address,
            user_agent: client.user_agent,
        },
    )
    .await?;

    tracing::info!(contact_id = contact.id, "Contact submission stored");

    let receipt = SubmissionReceipt::from(&contact);
    match state.config.mail_delivery {
        MailDelivery::Inline => {
            let budget = state.config.inline_mail_budget();
            let dispatch = state.mailer.notify_submission(&contact);
            if tokio::time::timeout(budget, dispatch).await.is_err() {
                tracing::warn!(
                    contact_id = contact.id,
                    budget_ms = budget.as_millis() as u64,
                    "Contact emails did not finish in time, responding without them",
                );
            }
        }
        MailDelivery::Background => {
            let mailer = Arc::clone(&state.mailer);
            state.mail_tasks.spawn(async move {
                mailer.notify_submission(&contact).await;
            });
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: THANK_YOU.to_string(),
            data: Some(receipt),
        }),
    ))
}

/// GET /api/contact
///
/// Paginated, filterable listing, newest first.
pub async fn list_contacts(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ContactListParams>,
) -> AppResult<impl IntoResponse> {
    let status = params
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<ContactStatus>)
        .transpose()?;
    let priority = params
        .priority
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(str::parse::<ContactPriority>)
        .transpose()?;

    let filter = ContactFilter {
        status: status.map(|s| s.as_str().to_string()),
        priority: priority.map(|p| p.as_str().to_string()),
        search: params.search(),
    };
    let page = params.page_request(DEFAULT_CONTACT_LIMIT);

    let total = ContactRepo::count(&state.pool, &filter).await?;
    let contacts = ContactRepo::list(&state.pool, &filter, page.limit, page.offset()).await?;

    Ok(Json(PagedResponse {
        data: contacts,
        pagination: Pagination::new(&page, total, "totalContacts"),
    }))
}

/// GET /api/contact/{id}
pub async fn get_contact(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let contact = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: contact }))
}

/// PUT /api/contact/{id}
///
/// Set status, priority and/or notes. Any status may follow any other.
pub async fn update_contact(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateContactRequest>,
) -> AppResult<impl IntoResponse> {
    let update = input.into_update(admin.user_id)?;

    let contact = ContactRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        contact_id = id,
        user_id = admin.user_id,
        status = %contact.contact.status,
        priority = %contact.contact.priority,
        "Contact updated",
    );

    Ok(Json(MessageResponse {
        message: "Contact updated successfully".to_string(),
        data: Some(contact),
    }))
}

/// DELETE /api/contact/{id}
pub async fn delete_contact(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ContactRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(contact_id = id, user_id = admin.user_id, "Contact deleted");

    Ok(Json(MessageResponse::message("Contact deleted successfully")))
}

/// GET /api/contact/stats/overview
pub async fn contact_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let counts = ContactRepo::count_by_status(&state.pool).await?;
    Ok(Json(DataResponse {
        data: ContactStats::from_counts(counts),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn update_request_accepts_admin_notes_alias() {
        let req: UpdateContactRequest =
            serde_json::from_str(r#"{"adminNotes": "Called back", "name": "ignored"}"#).unwrap();
        let update = req.into_update(7).unwrap();
        assert_eq!(update.admin_notes.as_deref(), Some("Called back"));
        assert_eq!(update.replied_by, Some(7));
        assert_eq!(update.status, None);
    }

    #[test]
    fn update_request_normalizes_enums() {
        let req = UpdateContactRequest {
            status: Some("in-progress".into()),
            priority: Some("high".into()),
            notes: None,
        };
        let update = req.into_update(1).unwrap();
        assert_eq!(update.status.as_deref(), Some("IN_PROGRESS"));
        assert_eq!(update.priority.as_deref(), Some("HIGH"));
    }

    #[test]
    fn update_request_rejects_bad_input() {
        assert_matches!(
            UpdateContactRequest::default().into_update(1),
            Err(CoreError::Validation(_))
        );
        let bad_status = UpdateContactRequest {
            status: Some("ARCHIVED".into()),
            ..Default::default()
        };
        assert_matches!(bad_status.into_update(1), Err(CoreError::Validation(_)));
        let long_notes = UpdateContactRequest {
            notes: Some("n".repeat(2001)),
            ..Default::default()
        };
        assert_matches!(long_notes.into_update(1), Err(CoreError::InvalidFields(_)));
    }

    #[test]
    fn stats_fill_missing_statuses_with_zero() {
        let stats = ContactStats::from_counts(vec![
            StatusCount {
                status: "NEW".into(),
                count: 4,
            },
            StatusCount {
                status: "SPAM".into(),
                count: 1,
            },
        ]);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.new, 4);
        assert_eq!(stats.in_progress, 0);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.spam, 1);
        assert_eq!(stats.breakdown.len(), 2);
    }
}
