use serde::Deserialize;

use crate::errors::AppError;
use crate::models::identity::Availability;
use crate::validate::{optional_url, parse_enum, require_len, require_url, FieldErrors};

const DEFAULT_CTA: &str = "Start a Project";

#[derive(Debug, Clone, Deserialize)]
pub struct HeroForm {
    pub status: String,
    pub greeting: String,
    pub name: String,
    pub role: String,
    pub description: String,
    pub primary_image: String,
    #[serde(default)]
    pub secondary_images: Vec<String>,
    pub resume_url: Option<String>,
    pub cta_text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HeroInput {
    pub status: Availability,
    pub greeting: String,
    pub name: String,
    pub role: String,
    pub description: String,
    pub primary_image: String,
    pub secondary_images: Vec<String>,
    pub resume_url: Option<String>,
    pub cta_text: String,
}

pub fn validate_hero(form: HeroForm) -> Result<HeroInput, AppError> {
    let mut errors = FieldErrors::new();

    let status = parse_enum::<Availability>(&mut errors, "status", &form.status)
        .unwrap_or(Availability::Available);
    let greeting = require_len(&mut errors, "greeting", &form.greeting, 1);
    let name = require_len(&mut errors, "name", &form.name, 1);
    let role = require_len(&mut errors, "role", &form.role, 1);
    let description = require_len(&mut errors, "description", &form.description, 1);
    let primary_image = require_url(&mut errors, "primary_image", &form.primary_image);
    let secondary_images = form
        .secondary_images
        .iter()
        .enumerate()
        .map(|(i, url)| require_url(&mut errors, &format!("secondary_images[{i}]"), url))
        .collect();
    let resume_url = optional_url(&mut errors, "resume_url", form.resume_url.as_deref());
    let cta_text = form
        .cta_text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_CTA.to_string());

    errors.into_result(HeroInput {
        status,
        greeting,
        name,
        role,
        description,
        primary_image,
        secondary_images,
        resume_url,
        cta_text,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct PillarForm {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusForm {
    pub label: String,
    pub value: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct AboutForm {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(default)]
    pub core_pillars: Vec<PillarForm>,
    #[serde(default)]
    pub statuses: Vec<StatusForm>,
}

#[derive(Debug, Clone)]
pub struct PillarInput {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone)]
pub struct StatusInput {
    pub label: String,
    pub value: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct AboutInput {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub core_pillars: Vec<PillarInput>,
    pub statuses: Vec<StatusInput>,
}

pub fn validate_about(form: AboutForm) -> Result<AboutInput, AppError> {
    let mut errors = FieldErrors::new();

    let title = require_len(&mut errors, "title", &form.title, 2);
    let subtitle = require_len(&mut errors, "subtitle", &form.subtitle, 2);
    let description = require_len(&mut errors, "description", &form.description, 10);

    if form.core_pillars.is_empty() {
        errors.push("core_pillars", "At least one core pillar is required");
    }
    let core_pillars = form
        .core_pillars
        .iter()
        .enumerate()
        .map(|(i, p)| PillarInput {
            title: require_len(&mut errors, &format!("core_pillars[{i}].title"), &p.title, 2),
            description: require_len(
                &mut errors,
                &format!("core_pillars[{i}].description"),
                &p.description,
                5,
            ),
            icon: require_len(&mut errors, &format!("core_pillars[{i}].icon"), &p.icon, 1),
        })
        .collect();

    let statuses = form
        .statuses
        .iter()
        .enumerate()
        .map(|(i, s)| StatusInput {
            label: require_len(&mut errors, &format!("statuses[{i}].label"), &s.label, 1),
            value: require_len(&mut errors, &format!("statuses[{i}].value"), &s.value, 1),
            is_active: s.is_active,
        })
        .collect();

    errors.into_result(AboutInput {
        title,
        subtitle,
        description,
        core_pillars,
        statuses,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityForm {
    pub hero: HeroForm,
    pub about: AboutForm,
}

pub struct IdentityInput {
    pub hero: HeroInput,
    pub about: AboutInput,
}

/// Validates the combined identity save. Hero errors surface first when
/// both halves fail.
pub fn validate_identity(form: IdentityForm) -> Result<IdentityInput, AppError> {
    let hero = validate_hero(form.hero)?;
    let about = validate_about(form.about)?;
    Ok(IdentityInput { hero, about })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero_form() -> HeroForm {
        HeroForm {
            status: "AVAILABLE".to_string(),
            greeting: "Hi, I'm".to_string(),
            name: "Mohammed".to_string(),
            role: "Engineer".to_string(),
            description: "I build things.".to_string(),
            primary_image: "https://cdn.example.com/me.png".to_string(),
            secondary_images: vec![],
            resume_url: None,
            cta_text: None,
        }
    }

    fn about_form() -> AboutForm {
        AboutForm {
            title: "About me".to_string(),
            subtitle: "Engineer".to_string(),
            description: "A longer narrative block.".to_string(),
            core_pillars: vec![PillarForm {
                title: "Security".to_string(),
                description: "Hardened codebases.".to_string(),
                icon: "Shield".to_string(),
            }],
            statuses: vec![StatusForm {
                label: "Experience".to_string(),
                value: "5+ Years".to_string(),
                is_active: true,
            }],
        }
    }

    #[test]
    fn test_valid_hero_passes_with_default_cta() {
        let input = validate_hero(hero_form()).unwrap();
        assert_eq!(input.status, Availability::Available);
        assert_eq!(input.cta_text, "Start a Project");
    }

    #[test]
    fn test_unknown_status_is_a_field_error() {
        let mut form = hero_form();
        form.status = "SLEEPING".to_string();
        match validate_hero(form) {
            Err(AppError::Validation(fields)) => assert!(fields.contains("status")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_hero_requires_primary_image_url() {
        let mut form = hero_form();
        form.primary_image = "not-a-url".to_string();
        match validate_hero(form) {
            Err(AppError::Validation(fields)) => assert!(fields.contains("primary_image")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_resume_url_normalizes_to_none() {
        let mut form = hero_form();
        form.resume_url = Some("".to_string());
        let input = validate_hero(form).unwrap();
        assert_eq!(input.resume_url, None);
    }

    #[test]
    fn test_valid_about_passes() {
        let input = validate_about(about_form()).unwrap();
        assert_eq!(input.core_pillars.len(), 1);
        assert_eq!(input.statuses.len(), 1);
    }

    #[test]
    fn test_about_requires_a_pillar() {
        let mut form = about_form();
        form.core_pillars.clear();
        match validate_about(form) {
            Err(AppError::Validation(fields)) => assert!(fields.contains("core_pillars")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_pillar_errors_carry_the_index() {
        let mut form = about_form();
        form.core_pillars.push(PillarForm {
            title: "X".to_string(),
            description: "ok enough".to_string(),
            icon: "Cpu".to_string(),
        });
        match validate_about(form) {
            Err(AppError::Validation(fields)) => {
                assert!(fields.contains("core_pillars[1].title"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_short_about_description_rejected() {
        let mut form = about_form();
        form.description = "too short".to_string(); // 9 chars
        assert!(validate_about(form).is_err());
    }
}
