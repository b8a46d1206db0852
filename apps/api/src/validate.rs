use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::AppError;

/// Per-field validation messages, keyed by the submitted field name.
/// Mirrors the `{ field: [messages] }` shape the admin forms consume.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Consumes the collected errors: `Ok(value)` when clean, otherwise the
    /// validation error that stops the request before persistence.
    pub fn into_result<T>(self, value: T) -> Result<T, AppError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(AppError::Validation(self))
        }
    }
}

/// Trims and requires a minimum length, recording an error on failure.
pub fn require_len(errors: &mut FieldErrors, field: &str, value: &str, min: usize) -> String {
    let trimmed = value.trim().to_string();
    if trimmed.chars().count() < min {
        if min <= 1 {
            errors.push(field, format!("{field} is required"));
        } else {
            errors.push(field, format!("{field} must be at least {min} characters"));
        }
    }
    trimmed
}

pub fn check_max_len(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(field, format!("{field} must be at most {max} characters"));
    }
}

/// Normalizes an optional URL field: empty/whitespace input becomes `None`
/// (the canonical "no value"), anything else must look like an http(s) URL.
pub fn optional_url(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<String> {
    let trimmed = value.map(str::trim).filter(|v| !v.is_empty())?;
    if is_url(trimmed) {
        Some(trimmed.to_string())
    } else {
        errors.push(field, format!("{field} must be a valid URL"));
        None
    }
}

/// Requires a URL-shaped value (used where an image is mandatory).
pub fn require_url(errors: &mut FieldErrors, field: &str, value: &str) -> String {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        errors.push(field, format!("{field} is required"));
    } else if !is_url(&trimmed) {
        errors.push(field, format!("{field} must be a valid URL"));
    }
    trimmed
}

fn is_url(value: &str) -> bool {
    (value.starts_with("http://") || value.starts_with("https://"))
        && value.len() > "https://".len()
}

/// Parses an enum field submitted as a string (e.g. `"OPEN_FOR_COMMISSION"`),
/// recording a membership error instead of failing deserialization.
pub fn parse_enum<T: serde::de::DeserializeOwned>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
) -> Option<T> {
    match serde_json::from_value(serde_json::Value::String(value.trim().to_string())) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.push(field, format!("{field} is not a valid option"));
            None
        }
    }
}

pub fn check_range(errors: &mut FieldErrors, field: &str, value: i32, min: i32, max: i32) {
    if value < min || value > max {
        errors.push(field, format!("{field} must be between {min} and {max}"));
    }
}

/// Requires a basic `local@domain` email shape.
pub fn require_email(errors: &mut FieldErrors, field: &str, value: &str) -> String {
    let trimmed = value.trim().to_string();
    let looks_valid = trimmed
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
        .unwrap_or(false);
    if !looks_valid {
        errors.push(field, "Please enter a valid email address");
    }
    trimmed
}

/// Coerces a `YYYY-MM-DD` string into a date, recording an error on failure.
pub fn require_date(errors: &mut FieldErrors, field: &str, value: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, format!("{field} must be a YYYY-MM-DD date"));
            None
        }
    }
}

pub fn optional_date(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    let trimmed = value.map(str::trim).filter(|v| !v.is_empty())?;
    require_date(errors, field, trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_len_trims_and_passes() {
        let mut errors = FieldErrors::new();
        let v = require_len(&mut errors, "title", "  Hello  ", 2);
        assert_eq!(v, "Hello");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_require_len_records_field_error() {
        let mut errors = FieldErrors::new();
        require_len(&mut errors, "client_name", "", 2);
        assert!(errors.contains("client_name"));
    }

    #[test]
    fn test_optional_url_empty_string_is_none() {
        let mut errors = FieldErrors::new();
        assert_eq!(optional_url(&mut errors, "repo_url", Some("")), None);
        assert_eq!(optional_url(&mut errors, "repo_url", Some("   ")), None);
        assert_eq!(optional_url(&mut errors, "repo_url", None), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_optional_url_accepts_https() {
        let mut errors = FieldErrors::new();
        let v = optional_url(&mut errors, "repo_url", Some("https://github.com/x/y"));
        assert_eq!(v.as_deref(), Some("https://github.com/x/y"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_optional_url_rejects_garbage() {
        let mut errors = FieldErrors::new();
        assert_eq!(optional_url(&mut errors, "live_url", Some("not-a-url")), None);
        assert!(errors.contains("live_url"));
    }

    #[test]
    fn test_check_range_bounds() {
        let mut errors = FieldErrors::new();
        check_range(&mut errors, "rating", 1, 1, 5);
        check_range(&mut errors, "rating", 5, 1, 5);
        assert!(errors.is_empty());
        check_range(&mut errors, "rating", 0, 1, 5);
        check_range(&mut errors, "rating", 6, 1, 5);
        assert!(errors.contains("rating"));
    }

    #[test]
    fn test_require_email() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            require_email(&mut errors, "email", " dev@example.com "),
            "dev@example.com"
        );
        assert!(errors.is_empty());
        require_email(&mut errors, "email", "not-an-email");
        assert!(errors.contains("email"));
    }

    #[test]
    fn test_require_date_coercion() {
        let mut errors = FieldErrors::new();
        let date = require_date(&mut errors, "start_date", "2024-01-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(require_date(&mut errors, "start_date", "15/01/2024").is_none());
        assert!(errors.contains("start_date"));
    }

    #[test]
    fn test_optional_date_empty_is_current() {
        let mut errors = FieldErrors::new();
        assert!(optional_date(&mut errors, "end_date", None).is_none());
        assert!(optional_date(&mut errors, "end_date", Some("")).is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_parse_enum_membership() {
        use crate::models::identity::Availability;
        let mut errors = FieldErrors::new();
        let status: Option<Availability> = parse_enum(&mut errors, "status", "OPEN_FOR_COMMISSION");
        assert_eq!(status, Some(Availability::OpenForCommission));
        assert!(errors.is_empty());

        let status: Option<Availability> = parse_enum(&mut errors, "status", "ON_VACATION");
        assert!(status.is_none());
        assert!(errors.contains("status"));
    }

    #[test]
    fn test_into_result_blocks_on_errors() {
        let mut errors = FieldErrors::new();
        errors.push("title", "title is required");
        assert!(errors.into_result(()).is_err());
        assert!(FieldErrors::new().into_result(42).is_ok());
    }
}
