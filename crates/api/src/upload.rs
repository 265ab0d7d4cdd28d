//! Multipart form parsing and image storage for the content write endpoints.

use std::collections::HashMap;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::Multipart;
use chrono::NaiveDate;
use showcase_core::content::{PortfolioInput, ServiceInput};
use showcase_core::upload::{
    public_path, stored_file_name, validate_image_upload, UPLOADS_URL_PREFIX,
};

use crate::error::{AppError, AppResult};

/// Name of the optional file field.
pub const IMAGE_FIELD: &str = "image";

/// An uploaded file held in memory until it is validated and stored.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

/// A parsed `multipart/form-data` body.
///
/// Field names are normalised to camelCase with any `[]` suffix removed, so
/// `short_description`, `shortDescription` and `technologies[]` are all
/// accepted. Repeated fields keep every value in order.
#[derive(Debug, Default)]
pub struct ContentForm {
    fields: HashMap<String, Vec<String>>,
    pub image: Option<UploadedFile>,
}

impl ContentForm {
    pub async fn from_multipart(multipart: &mut Multipart) -> AppResult<Self> {
        let mut form = ContentForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = normalize_field_name(field.name().unwrap_or(""));
            if name == IMAGE_FIELD && field.file_name().is_some() {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await?;
                // Browsers send an empty part when no file was chosen.
                if !file_name.is_empty() || !data.is_empty() {
                    form.image = Some(UploadedFile { file_name, data });
                }
                continue;
            }
            let value = field.text().await?;
            form.fields.entry(name).or_default().push(value);
        }

        Ok(form)
    }

    /// Build a form from text fields only.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut form = ContentForm::default();
        for (name, value) in fields {
            form.fields
                .entry(normalize_field_name(name))
                .or_default()
                .push(value.to_string());
        }
        form
    }

    /// Last value of a text field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(|values| values.last().cloned())
    }

    /// Every value of a (possibly repeated) field.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// Parse a boolean field (`true`/`false`/`1`/`0`/`on`/`off`). Blank is absent.
    pub fn flag(&self, name: &str) -> AppResult<Option<bool>> {
        self.parse_with(name, |v| match v.to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Some(true),
            "false" | "0" | "off" | "no" => Some(false),
            _ => None,
        })
    }

    pub fn int(&self, name: &str) -> AppResult<Option<i32>> {
        self.parse_with(name, |v| v.parse().ok())
    }

    /// Parse a date field. Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub fn date(&self, name: &str) -> AppResult<Option<NaiveDate>> {
        self.parse_with(name, |v| {
            NaiveDate::parse_from_str(v, "%Y-%m-%d").ok().or_else(|| {
                chrono::DateTime::parse_from_rfc3339(v)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
        })
    }

    fn parse_with<T>(&self, name: &str, parse: impl Fn(&str) -> Option<T>) -> AppResult<Option<T>> {
        match self.text(name).map(|v| v.trim().to_string()) {
            None => Ok(None),
            Some(v) if v.is_empty() => Ok(None),
            Some(v) => parse(&v)
                .map(Some)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid value for '{name}': {v}"))),
        }
    }

    /// Collect the portfolio fields. Validation is left to
    /// [`PortfolioInput::into_validated`].
    pub fn portfolio_input(&self) -> AppResult<PortfolioInput> {
        Ok(PortfolioInput {
            title: self.text("title").unwrap_or_default(),
            description: self.text("description").unwrap_or_default(),
            short_description: self.text("shortDescription"),
            category: self.text("category").unwrap_or_default(),
            technologies: self.list("technologies"),
            live_url: self.text("liveUrl"),
            github_url: self.text("githubUrl"),
            client: self.text("client"),
            start_date: self.date("startDate")?,
            end_date: self.date("endDate")?,
            is_completed: self.flag("isCompleted")?,
            is_featured: self.flag("isFeatured")?,
            is_active: self.flag("isActive")?,
            sort_order: self.int("sortOrder")?,
        })
    }

    /// Collect the service fields. Validation is left to
    /// [`ServiceInput::into_validated`].
    pub fn service_input(&self) -> AppResult<ServiceInput> {
        Ok(ServiceInput {
            title: self.text("title").unwrap_or_default(),
            description: self.text("description").unwrap_or_default(),
            short_description: self.text("shortDescription"),
            icon: self.text("icon"),
            category: self.text("category").unwrap_or_default(),
            features: self.list("features"),
            technologies: self.list("technologies"),
            pricing: self.text("pricing").unwrap_or_default(),
            estimated_duration: self.text("estimatedDuration"),
            is_featured: self.flag("isFeatured")?,
            is_active: self.flag("isActive")?,
            sort_order: self.int("sortOrder")?,
        })
    }
}

/// `short_description[]` -> `shortDescription`.
fn normalize_field_name(name: &str) -> String {
    let name = name.trim().trim_end_matches("[]");
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Validate `file` and write it under `dir`, returning its public `/uploads/...` path.
pub async fn store_image(dir: &Path, file: &UploadedFile, max_bytes: usize) -> AppResult<String> {
    let ext = validate_image_upload(&file.file_name, file.data.len(), max_bytes)?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let stored_name = stored_file_name(IMAGE_FIELD, &ext);
    tokio::fs::write(dir.join(&stored_name), &file.data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    tracing::info!(file = %stored_name, bytes = file.data.len(), "Stored uploaded image");
    Ok(public_path(&stored_name))
}

/// Remove an image written by [`store_image`] whose record was never saved.
///
/// Failures are logged; the caller is already returning an error.
pub async fn discard_image(dir: &Path, public: &str) {
    let Some(stored_name) = public
        .strip_prefix(UPLOADS_URL_PREFIX)
        .map(|name| name.trim_start_matches('/'))
        .filter(|name| !name.is_empty() && !name.contains(['/', '\\']))
    else {
        return;
    };

    match tokio::fs::remove_file(dir.join(stored_name)).await {
        Ok(()) => tracing::info!(file = %stored_name, "Removed orphaned upload"),
        Err(e) => tracing::warn!(file = %stored_name, error = %e, "Failed to remove orphaned upload"),
    }
}
