//! Marketing content rules: portfolio and service categories, pricing models,
//! and write-input validation for the admin content forms.

use std::borrow::Cow;

use chrono::NaiveDate;
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::validation::validate_fields;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Valid portfolio categories.
pub const PORTFOLIO_CATEGORIES: &[&str] = &[
    "web-development",
    "mobile-app",
    "ui-ux",
    "e-commerce",
    "saas",
    "other",
];

/// Valid service categories.
pub const SERVICE_CATEGORIES: &[&str] =
    &["development", "design", "consulting", "maintenance", "other"];

/// Valid service pricing models.
pub const PRICING_MODELS: &[&str] = &["hourly", "fixed", "monthly", "custom"];

/// Number of items returned by the `featured/all` endpoints.
pub const FEATURED_LIMIT: i64 = 6;

pub const PORTFOLIO_FIELDS: &[&str] = &[
    "title",
    "description",
    "short_description",
    "category",
    "technologies",
    "live_url",
    "github_url",
];

pub const SERVICE_FIELDS: &[&str] = &[
    "title",
    "description",
    "short_description",
    "category",
    "features",
    "technologies",
    "pricing",
];

fn one_of(value: &str, allowed: &[&str], message: &'static str) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("one_of").with_message(Cow::Borrowed(message)))
    }
}

fn check_portfolio_category(category: &str) -> Result<(), ValidationError> {
    one_of(category, PORTFOLIO_CATEGORIES, "Invalid category")
}

fn check_service_category(category: &str) -> Result<(), ValidationError> {
    one_of(category, SERVICE_CATEGORIES, "Invalid category")
}

fn check_pricing(pricing: &str) -> Result<(), ValidationError> {
    one_of(pricing, PRICING_MODELS, "Invalid pricing model")
}

/// Validate a `category` query filter for the public portfolio list.
pub fn validate_portfolio_category(category: &str) -> Result<(), CoreError> {
    if PORTFOLIO_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{category}'. Must be one of: {PORTFOLIO_CATEGORIES:?}"
        )))
    }
}

/// Validate a `category` query filter for the public services list.
pub fn validate_service_category(category: &str) -> Result<(), CoreError> {
    if SERVICE_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{category}'. Must be one of: {SERVICE_CATEGORIES:?}"
        )))
    }
}

/// Split list input into trimmed, non-empty entries.
///
/// Each raw value may itself be comma-separated, so both repeated form fields
/// (`technologies=Rust&technologies=Axum`) and a single `"Rust, Axum"` value
/// are accepted.
pub fn split_list<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.as_ref().split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn trim_opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

/// Admin input for creating or replacing a portfolio item.
#[derive(Debug, Clone, Default, Validate)]
pub struct PortfolioInput {
    #[validate(length(min = 5, max = 100, message = "Title must be between 5 and 100 characters"))]
    pub title: String,
    #[validate(length(
        min = 20,
        max = 1000,
        message = "Description must be between 20 and 1000 characters"
    ))]
    pub description: String,
    #[validate(length(max = 200, message = "Short description must be at most 200 characters"))]
    pub short_description: Option<String>,
    #[validate(custom(function = "check_portfolio_category"))]
    pub category: String,
    #[validate(length(min = 1, message = "At least one technology must be specified"))]
    pub technologies: Vec<String>,
    #[validate(url(message = "Live URL must be a valid URL"))]
    pub live_url: Option<String>,
    #[validate(url(message = "GitHub URL must be a valid URL"))]
    pub github_url: Option<String>,
    pub client: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_completed: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

impl PortfolioInput {
    /// Trim text fields, normalise the category, then validate.
    pub fn into_validated(self) -> Result<Self, CoreError> {
        let cleaned = Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            short_description: trim_opt(self.short_description),
            category: self.category.trim().to_lowercase(),
            technologies: split_list(&self.technologies),
            live_url: trim_opt(self.live_url),
            github_url: trim_opt(self.github_url),
            client: trim_opt(self.client),
            ..self
        };
        validate_fields(&cleaned, PORTFOLIO_FIELDS)?;
        if let (Some(start), Some(end)) = (cleaned.start_date, cleaned.end_date) {
            if end < start {
                return Err(CoreError::Validation(
                    "End date must not be before start date".into(),
                ));
            }
        }
        Ok(cleaned)
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Admin input for creating or replacing a service.
#[derive(Debug, Clone, Default, Validate)]
pub struct ServiceInput {
    #[validate(length(min = 5, max = 100, message = "Title must be between 5 and 100 characters"))]
    pub title: String,
    #[validate(length(
        min = 20,
        max = 1000,
        message = "Description must be between 20 and 1000 characters"
    ))]
    pub description: String,
    #[validate(length(max = 200, message = "Short description must be at most 200 characters"))]
    pub short_description: Option<String>,
    pub icon: Option<String>,
    #[validate(custom(function = "check_service_category"))]
    pub category: String,
    #[validate(length(min = 1, message = "At least one feature must be specified"))]
    pub features: Vec<String>,
    #[validate(length(min = 1, message = "At least one technology must be specified"))]
    pub technologies: Vec<String>,
    #[validate(custom(function = "check_pricing"))]
    pub pricing: String,
    pub estimated_duration: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

impl ServiceInput {
    /// Trim text fields, normalise enumerations, then validate.
    pub fn into_validated(self) -> Result<Self, CoreError> {
        let cleaned = Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            short_description: trim_opt(self.short_description),
            icon: trim_opt(self.icon),
            category: self.category.trim().to_lowercase(),
            features: split_list(&self.features),
            technologies: split_list(&self.technologies),
            pricing: self.pricing.trim().to_lowercase(),
            estimated_duration: trim_opt(self.estimated_duration),
            ..self
        };
        validate_fields(&cleaned, SERVICE_FIELDS)?;
        Ok(cleaned)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn portfolio() -> PortfolioInput {
        PortfolioInput {
            title: "Clinic booking site".into(),
            description: "Appointment booking platform for a local clinic.".into(),
            category: "web-development".into(),
            technologies: vec!["Rust, Axum".into(), "PostgreSQL".into()],
            ..Default::default()
        }
    }

    fn service() -> ServiceInput {
        ServiceInput {
            title: "Web Development".into(),
            description: "Custom web applications built with modern tooling.".into(),
            category: "development".into(),
            features: vec!["Responsive Design".into()],
            technologies: vec!["React".into()],
            pricing: "custom".into(),
            ..Default::default()
        }
    }

    #[test]
    fn split_list_accepts_commas_and_repeats() {
        let list = split_list(&["Rust, Axum", " ", "PostgreSQL,"]);
        assert_eq!(list, vec!["Rust", "Axum", "PostgreSQL"]);
    }

    #[test]
    fn valid_portfolio_is_normalized() {
        let input = PortfolioInput {
            category: " Web-Development ".into(),
            ..portfolio()
        }
        .into_validated()
        .unwrap();
        assert_eq!(input.category, "web-development");
        assert_eq!(input.technologies, vec!["Rust", "Axum", "PostgreSQL"]);
    }

    #[test]
    fn portfolio_requires_technology() {
        let err = PortfolioInput {
            technologies: vec![" , ".into()],
            ..portfolio()
        }
        .into_validated()
        .unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(ref f) => {
            assert_eq!(f[0].field, "technologies");
        });
    }

    #[test]
    fn portfolio_rejects_unknown_category() {
        let err = PortfolioInput {
            category: "games".into(),
            ..portfolio()
        }
        .into_validated()
        .unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(ref f) => {
            assert_eq!(f[0].field, "category");
            assert_eq!(f[0].message, "Invalid category");
        });
    }

    #[test]
    fn portfolio_rejects_bad_url_but_ignores_blank() {
        let err = PortfolioInput {
            live_url: Some("not a url".into()),
            ..portfolio()
        }
        .into_validated()
        .unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(ref f) => {
            assert_eq!(f[0].field, "live_url");
        });

        let ok = PortfolioInput {
            live_url: Some("   ".into()),
            ..portfolio()
        }
        .into_validated()
        .unwrap();
        assert_eq!(ok.live_url, None);
    }

    #[test]
    fn portfolio_date_order() {
        let err = PortfolioInput {
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            ..portfolio()
        }
        .into_validated()
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn valid_service() {
        assert!(service().into_validated().is_ok());
    }

    #[test]
    fn service_rejects_bad_pricing_and_empty_features() {
        let err = ServiceInput {
            pricing: "free".into(),
            features: vec![],
            ..service()
        }
        .into_validated()
        .unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(ref f) => {
            let fields: Vec<&str> = f.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["features", "pricing"]);
        });
    }

    #[test]
    fn category_filters() {
        assert!(validate_portfolio_category("saas").is_ok());
        assert!(validate_portfolio_category("design").is_err());
        assert!(validate_service_category("design").is_ok());
        assert!(validate_service_category("saas").is_err());
    }
}
