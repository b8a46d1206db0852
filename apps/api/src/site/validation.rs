use serde::Deserialize;

use crate::errors::AppError;
use crate::validate::{optional_url, require_email, require_len, FieldErrors};

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfigForm {
    pub footer_text: String,
    #[serde(default = "default_true")]
    pub enable_blog: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct SiteConfigInput {
    pub footer_text: String,
    pub enable_blog: bool,
}

pub fn validate_site_config(form: SiteConfigForm) -> Result<SiteConfigInput, AppError> {
    let mut errors = FieldErrors::new();
    let footer_text = require_len(&mut errors, "footer_text", &form.footer_text, 1);
    errors.into_result(SiteConfigInput {
        footer_text,
        enable_blog: form.enable_blog,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialsForm {
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub x_url: Option<String>,
    pub whatsapp: Option<String>,
    pub figma: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SocialsInput {
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub x_url: Option<String>,
    pub whatsapp: Option<String>,
    pub figma: Option<String>,
}

pub fn validate_socials(form: SocialsForm) -> Result<SocialsInput, AppError> {
    let mut errors = FieldErrors::new();

    let github_url = optional_url(&mut errors, "github_url", form.github_url.as_deref());
    let linkedin_url = optional_url(&mut errors, "linkedin_url", form.linkedin_url.as_deref());
    let x_url = optional_url(&mut errors, "x_url", form.x_url.as_deref());
    let figma = optional_url(&mut errors, "figma", form.figma.as_deref());
    let whatsapp = form
        .whatsapp
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty());

    errors.into_result(SocialsInput {
        github_url,
        linkedin_url,
        x_url,
        whatsapp,
        figma,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactMessageForm {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ContactMessageInput {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

pub fn validate_contact_message(form: ContactMessageForm) -> Result<ContactMessageInput, AppError> {
    let mut errors = FieldErrors::new();

    let name = require_len(&mut errors, "name", &form.name, 2);
    let email = require_email(&mut errors, "email", &form.email);
    let message = require_len(&mut errors, "message", &form.message, 10);
    let subject = form
        .subject
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    errors.into_result(ContactMessageInput {
        name,
        email,
        subject,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socials_accept_empty_everywhere() {
        let input = validate_socials(SocialsForm {
            github_url: Some(String::new()),
            linkedin_url: None,
            x_url: None,
            whatsapp: None,
            figma: None,
        })
        .unwrap();
        assert_eq!(input.github_url, None);
    }

    #[test]
    fn test_socials_reject_bad_github_url() {
        let result = validate_socials(SocialsForm {
            github_url: Some("github.com/me".to_string()),
            linkedin_url: None,
            x_url: None,
            whatsapp: None,
            figma: None,
        });
        match result {
            Err(AppError::Validation(fields)) => assert!(fields.contains("github_url")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_contact_message_requires_ten_chars() {
        let result = validate_contact_message(ContactMessageForm {
            name: "Sara".to_string(),
            email: "sara@example.com".to_string(),
            subject: None,
            message: "short".to_string(),
        });
        match result {
            Err(AppError::Validation(fields)) => assert!(fields.contains("message")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_contact_message_valid() {
        let input = validate_contact_message(ContactMessageForm {
            name: "Sara".to_string(),
            email: "sara@example.com".to_string(),
            subject: Some("  ".to_string()),
            message: "I would like to hire you.".to_string(),
        })
        .unwrap();
        assert_eq!(input.subject, None);
    }
}
