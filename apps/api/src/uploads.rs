//! Presigned S3 uploads.
//!
//! The API never proxies file bytes: the admin asks for a ticket, uploads
//! straight to the bucket, and stores the returned public URL in whichever
//! form field needed it.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Admin;
use crate::errors::AppError;
use crate::state::AppState;
use crate::validate::FieldErrors;

const PRESIGN_TTL: Duration = Duration::from_secs(15 * 60);

const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "application/pdf",
];

#[derive(Debug, Deserialize)]
pub struct UploadForm {
    pub filename: String,
    pub content_type: String,
}

#[derive(Debug, Serialize)]
pub struct UploadTicket {
    /// Presigned PUT the client uploads the bytes to.
    pub upload_url: String,
    /// What the form stores verbatim once the upload succeeds.
    pub public_url: String,
    pub key: String,
}

fn safe_filename(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 128
        && !name.contains("..")
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}

fn validate_upload(form: &UploadForm) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if !safe_filename(form.filename.trim()) {
        errors.push("filename", "filename contains disallowed characters");
    }
    if !ALLOWED_CONTENT_TYPES.contains(&form.content_type.as_str()) {
        errors.push("content_type", "content_type is not allowed");
    }
    errors.into_result(())
}

/// POST /api/v1/admin/uploads
pub async fn handle_create_upload(
    State(state): State<AppState>,
    _admin: Admin,
    Json(form): Json<UploadForm>,
) -> Result<Json<UploadTicket>, AppError> {
    validate_upload(&form)?;

    let key = format!("uploads/{}/{}", Uuid::new_v4(), form.filename.trim());
    let presigning = PresigningConfig::expires_in(PRESIGN_TTL)
        .map_err(|e| AppError::S3(format!("invalid presigning config: {e}")))?;
    let presigned = state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&key)
        .content_type(&form.content_type)
        .presigned(presigning)
        .await
        .map_err(|e| AppError::S3(format!("presign failed: {e}")))?;

    Ok(Json(UploadTicket {
        upload_url: presigned.uri().to_string(),
        public_url: format!("{}/{}", state.config.asset_base_url, key),
        key,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_filenames_pass() {
        assert!(safe_filename("avatar.png"));
        assert!(safe_filename("resume-2025.pdf"));
    }

    #[test]
    fn test_traversal_and_separators_rejected() {
        assert!(!safe_filename("../etc/passwd"));
        assert!(!safe_filename("a/b.png"));
        assert!(!safe_filename("a\\b.png"));
        assert!(!safe_filename(""));
    }

    #[test]
    fn test_unknown_content_type_rejected() {
        let form = UploadForm {
            filename: "script.sh".to_string(),
            content_type: "application/x-sh".to_string(),
        };
        assert!(validate_upload(&form).is_err());
    }

    #[test]
    fn test_allowed_upload_validates() {
        let form = UploadForm {
            filename: "hero.webp".to_string(),
            content_type: "image/webp".to_string(),
        };
        assert!(validate_upload(&form).is_ok());
    }
}
