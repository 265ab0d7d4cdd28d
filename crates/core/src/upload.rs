//! Image upload rules for content records.

use crate::error::CoreError;

/// Default maximum upload size (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// URL prefix under which stored uploads are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Accepted image extensions (lower-case, without the dot).
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Validate an uploaded image and return its normalised extension.
///
/// Checks the extension against [`ALLOWED_IMAGE_EXTENSIONS`], rejects empty
/// files, and enforces `max_bytes`.
pub fn validate_image_upload(
    file_name: &str,
    size: usize,
    max_bytes: usize,
) -> Result<String, CoreError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Only image files are allowed ({})",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size > max_bytes {
        return Err(CoreError::Validation(format!(
            "File too large: {size} bytes exceeds the {max_bytes} byte limit"
        )));
    }
    Ok(ext)
}

/// Generate a collision-free stored file name, e.g. `image-1718000000-<uuid>.png`.
pub fn stored_file_name(field: &str, ext: &str) -> String {
    format!(
        "{field}-{}-{}.{ext}",
        chrono::Utc::now().timestamp(),
        uuid::Uuid::new_v4().simple()
    )
}

/// Relative URL under which a stored file is served.
pub fn public_path(stored_name: &str) -> String {
    format!("{UPLOADS_URL_PREFIX}/{stored_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_extensions_case_insensitively() {
        assert_eq!(validate_image_upload("photo.JPG", 10, 100).unwrap(), "jpg");
        assert_eq!(validate_image_upload("a.b.webp", 10, 100).unwrap(), "webp");
    }

    #[test]
    fn rejects_other_files() {
        assert!(validate_image_upload("script.sh", 10, 100).is_err());
        assert!(validate_image_upload("noext", 10, 100).is_err());
    }

    #[test]
    fn enforces_size_bounds() {
        assert!(validate_image_upload("a.png", 0, 100).is_err());
        assert!(validate_image_upload("a.png", 100, 100).is_ok());
        assert!(validate_image_upload("a.png", 101, 100).is_err());
    }

    #[test]
    fn stored_names_are_unique_and_public() {
        let a = stored_file_name("image", "png");
        let b = stored_file_name("image", "png");
        assert_ne!(a, b);
        assert!(a.starts_with("image-") && a.ends_with(".png"));
        assert_eq!(public_path("x.png"), "/uploads/x.png");
    }
}
