//! Conversion of `validator` results into field-level API errors.

use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// A single failing input field and the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Flatten [`ValidationErrors`] into a list of [`FieldError`]s.
///
/// `field_order` lists the fields in form order; errors for those fields come
/// first in that order, anything else follows alphabetically. The first
/// message of each field is kept.
pub fn field_errors(errors: &ValidationErrors, field_order: &[&str]) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let field = field.to_string();
            let message = errs
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{field} is invalid"));
            FieldError { field, message }
        })
        .collect();

    out.sort_by(|a, b| {
        let rank = |f: &str| {
            field_order
                .iter()
                .position(|o| *o == f)
                .unwrap_or(field_order.len())
        };
        rank(&a.field)
            .cmp(&rank(&b.field))
            .then_with(|| a.field.cmp(&b.field))
    });
    out
}

/// Run `validator` on `input`, mapping failures to [`CoreError::InvalidFields`].
pub fn validate_fields<T: Validate>(input: &T, field_order: &[&str]) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::InvalidFields(field_errors(&errors, field_order)))
}

/// Validate that `value` has between `min` and `max` characters (inclusive).
///
/// Counts Unicode scalar values, matching the `length` validator.
pub fn validate_char_range(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
    message: &str,
) -> Result<(), FieldError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(FieldError::new(field, message));
    }
    Ok(())
}
