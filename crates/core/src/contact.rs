//! Contact submission rules: lifecycle enumerations and intake validation.
//!
//! Status, priority and source are stored as upper-case text in the
//! `contacts` table; the enums here are the only way the API layer reads or
//! writes them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::validation::{validate_char_range, validate_fields};

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

/// Maximum length of a submitted message body (characters).
pub const MESSAGE_MAX: usize = 2000;

/// Maximum length of admin notes attached to a contact.
pub const NOTES_MAX: usize = 2000;

/// Form order of the submission fields, used to order validation errors.
pub const SUBMISSION_FIELDS: &[&str] = &["name", "email", "subject", "message"];

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Triage status of a contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactStatus {
    New,
    InProgress,
    Completed,
    Spam,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 4] = [
        ContactStatus::New,
        ContactStatus::InProgress,
        ContactStatus::Completed,
        ContactStatus::Spam,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactStatus::New => "NEW",
            ContactStatus::InProgress => "IN_PROGRESS",
            ContactStatus::Completed => "COMPLETED",
            ContactStatus::Spam => "SPAM",
        }
    }
}

/// Priority assigned by an admin. New submissions start at [`ContactPriority::Low`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactPriority {
    #[default]
    Low,
    Medium,
    High,
}

impl ContactPriority {
    pub const ALL: [ContactPriority; 3] = [
        ContactPriority::Low,
        ContactPriority::Medium,
        ContactPriority::High,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactPriority::Low => "LOW",
            ContactPriority::Medium => "MEDIUM",
            ContactPriority::High => "HIGH",
        }
    }
}

/// Channel a contact arrived through. Public form submissions are always `WEBSITE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactSource {
    Website,
    Email,
    Phone,
    Other,
}

impl ContactSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactSource::Website => "WEBSITE",
            ContactSource::Email => "EMAIL",
            ContactSource::Phone => "PHONE",
            ContactSource::Other => "OTHER",
        }
    }
}

/// Normalise user-supplied enum text: `in-progress` and `In_Progress` both
/// become `IN_PROGRESS`.
fn normalize_token(s: &str) -> String {
    s.trim().replace('-', "_").to_ascii_uppercase()
}

impl FromStr for ContactStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = normalize_token(s);
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == token)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: NEW, IN_PROGRESS, COMPLETED, SPAM"
                ))
            })
    }
}

impl FromStr for ContactPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = normalize_token(s);
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == token)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid priority '{s}'. Must be one of: LOW, MEDIUM, HIGH"
                ))
            })
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ContactPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ContactSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Public intake
// ---------------------------------------------------------------------------

/// Body of `POST /api/contact`.
///
/// Missing fields deserialize as empty strings so that they are reported as
/// field validation errors rather than a malformed-body rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ContactSubmission {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Name must be between 2 and 100 characters"
    ))]
    pub name: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(
        min = 5,
        max = 200,
        message = "Subject must be between 5 and 200 characters"
    ))]
    pub subject: String,

    #[validate(length(
        min = 10,
        max = 2000,
        message = "Message must be between 10 and 2000 characters"
    ))]
    pub message: String,
}

impl ContactSubmission {
    /// Trim all fields and lower-case the email address.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Normalise and validate in one step, returning the cleaned submission.
    pub fn into_validated(self) -> Result<Self, CoreError> {
        let cleaned = self.normalized();
        validate_fields(&cleaned, SUBMISSION_FIELDS)?;
        Ok(cleaned)
    }
}

// ---------------------------------------------------------------------------
// Admin triage
// ---------------------------------------------------------------------------

/// Validate admin notes length.
pub fn validate_notes(notes: &str) -> Result<(), CoreError> {
    validate_char_range(
        "notes",
        notes,
        0,
        NOTES_MAX,
        "Notes must be at most 2000 characters",
    )
    .map_err(|e| CoreError::InvalidFields(vec![e]))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
