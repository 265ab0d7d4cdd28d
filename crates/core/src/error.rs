use crate::types::DbId;
use crate::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// One or more input fields failed validation. The list is ordered the
    /// way the fields appear in the input form.
    #[error("Validation failed: {}", summarize(.0))]
    InvalidFields(Vec<FieldError>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Message of the first failing field, used as the human-readable headline.
fn summarize(errors: &[FieldError]) -> String {
    errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "invalid input".to_string())
}
