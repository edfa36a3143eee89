use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Categories are path segments, so they are restricted to lowercase
/// slugs (e.g. "avatar", "post-image").
static CATEGORY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("Invalid category regex"));

/// Insert shape for reserving an image record. The row starts pending
/// (empty path, zero size) and has its path set exactly once, after the
/// write authorization has been issued.
#[derive(Debug)]
pub struct ImageInsert {
    /// Client-supplied identifier, honored when present.
    pub id: Option<Uuid>,
    pub category: String,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUploadUrlRequest {
    #[serde(rename = "type")]
    #[validate(custom(function = validate_category, message = "Invalid upload category"))]
    pub category: String,

    #[validate(length(min = 1, max = 255, message = "Must be 1-255 characters"))]
    pub filename: String,

    #[serde(rename = "refId", default)]
    pub ref_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct UploadUrlResponse {
    /// Public URL the object will be reachable at once the client
    /// completes the write. Percent-encoded for safe embedding.
    #[serde(rename = "imagePath")]
    pub image_path: String,

    #[serde(rename = "signedUrl")]
    pub signed_url: String,
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    if CATEGORY_RE.is_match(category) {
        Ok(())
    } else {
        Err(ValidationError::new("category_format"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_allows_lowercase_slugs() {
        assert!(validate_category("avatar").is_ok());
        assert!(validate_category("post-image").is_ok());
    }

    #[test]
    fn category_rejects_path_tricks() {
        assert!(validate_category("").is_err());
        assert!(validate_category("../etc").is_err());
        assert!(validate_category("Avatar").is_err());
        assert!(validate_category("a/b").is_err());
    }
}
