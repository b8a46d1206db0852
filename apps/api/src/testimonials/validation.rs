use serde::Deserialize;

use crate::errors::AppError;
use crate::validate::{check_max_len, check_range, optional_url, require_len, FieldErrors};

#[derive(Debug, Clone, Deserialize)]
pub struct TestimonialForm {
    pub client_name: String,
    pub client_title: String,
    pub content: String,
    pub rating: i32,
    /// Accepted from the form but overwritten with the session identity
    /// before anything is persisted.
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TestimonialInput {
    pub client_name: String,
    pub client_title: String,
    pub content: String,
    pub rating: i32,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

pub fn validate_testimonial(form: TestimonialForm) -> Result<TestimonialInput, AppError> {
    let mut errors = FieldErrors::new();

    let client_name = require_len(&mut errors, "client_name", &form.client_name, 2);
    let client_title = require_len(&mut errors, "client_title", &form.client_title, 2);
    let content = require_len(&mut errors, "content", &form.content, 10);
    check_max_len(&mut errors, "content", &content, 1000);
    check_range(&mut errors, "rating", form.rating, 1, 5);
    let avatar_url = optional_url(&mut errors, "avatar_url", form.avatar_url.as_deref());

    errors.into_result(TestimonialInput {
        client_name,
        client_title,
        content,
        rating: form.rating,
        email: form.email,
        avatar_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TestimonialForm {
        TestimonialForm {
            client_name: "Sara Ahmed".to_string(),
            client_title: "CTO at Acme".to_string(),
            content: "Delivered on time and exceeded expectations.".to_string(),
            rating: 5,
            email: None,
            avatar_url: None,
        }
    }

    #[test]
    fn test_valid_testimonial_passes() {
        assert!(validate_testimonial(form()).is_ok());
    }

    #[test]
    fn test_rating_zero_rejected_before_persistence() {
        let mut f = form();
        f.rating = 0;
        match validate_testimonial(f) {
            Err(AppError::Validation(fields)) => assert!(fields.contains("rating")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_rating_six_rejected_before_persistence() {
        let mut f = form();
        f.rating = 6;
        assert!(validate_testimonial(f).is_err());
    }

    #[test]
    fn test_empty_client_name_is_a_field_level_error() {
        let mut f = form();
        f.client_name = String::new();
        match validate_testimonial(f) {
            Err(AppError::Validation(fields)) => {
                assert!(fields.contains("client_name"));
                assert!(!fields.contains("client_title"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_overlong_content_rejected() {
        let mut f = form();
        f.content = "x".repeat(1001);
        match validate_testimonial(f) {
            Err(AppError::Validation(fields)) => assert!(fields.contains("content")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
