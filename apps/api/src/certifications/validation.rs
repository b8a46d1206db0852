use serde::Deserialize;

use crate::errors::AppError;
use crate::validate::{optional_url, require_len, FieldErrors};

#[derive(Debug, Clone, Deserialize)]
pub struct CertificationForm {
    pub title: String,
    pub issuer: String,
    /// Kept as the display string the issuer printed, e.g. "March 2024".
    pub issue_date: String,
    pub image_url: Option<String>,
    pub credential_id: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CertificationInput {
    pub title: String,
    pub issuer: String,
    pub issue_date: String,
    pub image_url: Option<String>,
    pub credential_id: Option<String>,
    pub link: Option<String>,
}

pub fn validate_certification(form: CertificationForm) -> Result<CertificationInput, AppError> {
    let mut errors = FieldErrors::new();

    let title = require_len(&mut errors, "title", &form.title, 2);
    let issuer = require_len(&mut errors, "issuer", &form.issuer, 2);
    let issue_date = require_len(&mut errors, "issue_date", &form.issue_date, 1);
    let image_url = optional_url(&mut errors, "image_url", form.image_url.as_deref());
    let link = optional_url(&mut errors, "link", form.link.as_deref());
    let credential_id = form
        .credential_id
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    errors.into_result(CertificationInput {
        title,
        issuer,
        issue_date,
        image_url,
        credential_id,
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_certification_passes() {
        let input = validate_certification(CertificationForm {
            title: "AWS Solutions Architect".to_string(),
            issuer: "Amazon".to_string(),
            issue_date: "March 2024".to_string(),
            image_url: Some(String::new()),
            credential_id: None,
            link: Some("https://verify.example.com/abc".to_string()),
        })
        .unwrap();
        assert_eq!(input.image_url, None);
        assert!(input.link.is_some());
    }

    #[test]
    fn test_missing_issuer_rejected() {
        let result = validate_certification(CertificationForm {
            title: "Cert".to_string(),
            issuer: "".to_string(),
            issue_date: "2024".to_string(),
            image_url: None,
            credential_id: None,
            link: None,
        });
        match result {
            Err(AppError::Validation(fields)) => assert!(fields.contains("issuer")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
