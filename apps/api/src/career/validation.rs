use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::validate::{optional_date, require_date, require_len, FieldErrors};

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceForm {
    pub company_name: String,
    pub role: String,
    pub location: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
    /// Ids of already-resolved techniques, linked as submitted.
    #[serde(default)]
    pub techniques: Vec<Uuid>,
}

#[derive(Debug, Clone)]
pub struct ExperienceInput {
    pub company_name: String,
    pub role: String,
    pub location: String,
    pub start_date: NaiveDate,
    /// `None` marks the current position.
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub techniques: Vec<Uuid>,
}

pub fn validate_experience(form: ExperienceForm) -> Result<ExperienceInput, AppError> {
    let mut errors = FieldErrors::new();

    let company_name = require_len(&mut errors, "company_name", &form.company_name, 2);
    let role = require_len(&mut errors, "role", &form.role, 2);
    let location = require_len(&mut errors, "location", &form.location, 1);
    let start_date = require_date(&mut errors, "start_date", &form.start_date);
    let end_date = optional_date(&mut errors, "end_date", form.end_date.as_deref());
    let description = require_len(&mut errors, "description", &form.description, 10);

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            errors.push("end_date", "end_date cannot be before start_date");
        }
    }

    let start_date = start_date.unwrap_or_default();
    errors.into_result(ExperienceInput {
        company_name,
        role,
        location,
        start_date,
        end_date,
        description,
        techniques: form.techniques,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct EducationForm {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub grade: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EducationInput {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub grade: Option<String>,
    pub description: Option<String>,
}

pub fn validate_education(form: EducationForm) -> Result<EducationInput, AppError> {
    let mut errors = FieldErrors::new();

    let institution = require_len(&mut errors, "institution", &form.institution, 2);
    let degree = require_len(&mut errors, "degree", &form.degree, 2);
    let field_of_study = require_len(&mut errors, "field_of_study", &form.field_of_study, 1);
    let start_date = require_date(&mut errors, "start_date", &form.start_date);
    let end_date = optional_date(&mut errors, "end_date", form.end_date.as_deref());
    let grade = form.grade.map(|g| g.trim().to_string()).filter(|g| !g.is_empty());
    let description = form
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let start_date = start_date.unwrap_or_default();
    errors.into_result(EducationInput {
        institution,
        degree,
        field_of_study,
        start_date,
        end_date,
        grade,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience_form() -> ExperienceForm {
        ExperienceForm {
            company_name: "Acme".to_string(),
            role: "Engineer".to_string(),
            location: "Remote".to_string(),
            start_date: "2021-03-01".to_string(),
            end_date: None,
            description: "Built the billing platform.".to_string(),
            techniques: vec![],
        }
    }

    #[test]
    fn test_open_ended_experience_is_current() {
        let input = validate_experience(experience_form()).unwrap();
        assert!(input.end_date.is_none());
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut form = experience_form();
        form.end_date = Some("2020-01-01".to_string());
        match validate_experience(form) {
            Err(AppError::Validation(fields)) => assert!(fields.contains("end_date")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_date_rejected() {
        let mut form = experience_form();
        form.start_date = "March 2021".to_string();
        match validate_experience(form) {
            Err(AppError::Validation(fields)) => assert!(fields.contains("start_date")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_education_blank_grade_normalizes_to_none() {
        let input = validate_education(EducationForm {
            institution: "MIT".to_string(),
            degree: "BSc".to_string(),
            field_of_study: "CS".to_string(),
            start_date: "2016-09-01".to_string(),
            end_date: Some("2020-06-01".to_string()),
            grade: Some("  ".to_string()),
            description: None,
        })
        .unwrap();
        assert!(input.grade.is_none());
        assert!(input.end_date.is_some());
    }
}
