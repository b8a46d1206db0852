use serde::Deserialize;

use crate::errors::AppError;
use crate::models::project::ProjectCategory;
use crate::validate::{
    optional_url, parse_enum, require_len, require_url, FieldErrors,
};

/// Candidate child reference: resolved to a shared technique row by name.
#[derive(Debug, Clone, Deserialize)]
pub struct TechniqueRef {
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectForm {
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub category: String,
    pub live_url: Option<String>,
    pub repo_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub techniques: Vec<TechniqueRef>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct TechniqueInput {
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone)]
pub struct ProjectInput {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub image: String,
    pub gallery: Vec<String>,
    pub category: ProjectCategory,
    pub live_url: Option<String>,
    pub repo_url: Option<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub is_published: bool,
    pub techniques: Vec<TechniqueInput>,
    pub tags: Vec<String>,
}

fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

pub fn validate_project(form: ProjectForm) -> Result<ProjectInput, AppError> {
    let mut errors = FieldErrors::new();

    let title = require_len(&mut errors, "title", &form.title, 2);
    let slug = form.slug.trim().to_string();
    if !is_slug(&slug) {
        errors.push("slug", "slug must be lowercase letters, digits and hyphens");
    }
    let description = require_len(&mut errors, "description", &form.description, 10);
    let image = require_url(&mut errors, "image", &form.image);
    let gallery = form
        .gallery
        .iter()
        .enumerate()
        .map(|(i, url)| require_url(&mut errors, &format!("gallery[{i}]"), url))
        .collect();
    let category = parse_enum::<ProjectCategory>(&mut errors, "category", &form.category)
        .unwrap_or(ProjectCategory::Other);
    let live_url = optional_url(&mut errors, "live_url", form.live_url.as_deref());
    let repo_url = optional_url(&mut errors, "repo_url", form.repo_url.as_deref());

    let techniques = form
        .techniques
        .iter()
        .enumerate()
        .map(|(i, t)| TechniqueInput {
            name: require_len(&mut errors, &format!("techniques[{i}].name"), &t.name, 1),
            icon: t
                .icon
                .as_deref()
                .map(str::trim)
                .filter(|icon| !icon.is_empty())
                .unwrap_or("Code")
                .to_string(),
        })
        .collect();
    let tags = form
        .tags
        .iter()
        .enumerate()
        .map(|(i, t)| require_len(&mut errors, &format!("tags[{i}].name"), &t.name, 1))
        .collect();

    errors.into_result(ProjectInput {
        title,
        slug,
        description,
        content: form.content,
        image,
        gallery,
        category,
        live_url,
        repo_url,
        is_featured: form.is_featured,
        is_active: form.is_active,
        is_published: form.is_published,
        techniques,
        tags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProjectForm {
        ProjectForm {
            title: "Demo".to_string(),
            slug: "demo".to_string(),
            description: "A demonstration project.".to_string(),
            content: String::new(),
            image: "https://cdn.example.com/demo.png".to_string(),
            gallery: vec![],
            category: "FULLSTACK".to_string(),
            live_url: None,
            repo_url: None,
            is_featured: false,
            is_active: true,
            is_published: true,
            techniques: vec![TechniqueRef {
                name: "Go".to_string(),
                icon: None,
            }],
            tags: vec![TagRef {
                name: "Tech".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_project_passes() {
        let input = validate_project(form()).unwrap();
        assert_eq!(input.category, ProjectCategory::Fullstack);
        assert_eq!(input.techniques[0].icon, "Code");
        assert_eq!(input.tags, vec!["Tech".to_string()]);
    }

    #[test]
    fn test_bad_slug_is_a_field_error() {
        for bad in ["", "Demo", "demo slug", "-demo", "demo-"] {
            let mut f = form();
            f.slug = bad.to_string();
            match validate_project(f) {
                Err(AppError::Validation(fields)) => assert!(fields.contains("slug"), "{bad}"),
                other => panic!("expected validation error for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let mut f = form();
        f.category = "GARDENING".to_string();
        assert!(validate_project(f).is_err());
    }

    #[test]
    fn test_empty_optional_urls_normalize_to_none() {
        let mut f = form();
        f.live_url = Some(String::new());
        f.repo_url = None;
        let input = validate_project(f).unwrap();
        assert_eq!(input.live_url, None);
        assert_eq!(input.repo_url, None);
    }

    #[test]
    fn test_technique_icon_falls_back_to_code() {
        let mut f = form();
        f.techniques = vec![TechniqueRef {
            name: "React".to_string(),
            icon: Some("  ".to_string()),
        }];
        let input = validate_project(f).unwrap();
        assert_eq!(input.techniques[0].icon, "Code");
    }

    #[test]
    fn test_blank_technique_name_rejected() {
        let mut f = form();
        f.techniques = vec![TechniqueRef {
            name: " ".to_string(),
            icon: None,
        }];
        match validate_project(f) {
            Err(AppError::Validation(fields)) => assert!(fields.contains("techniques[0].name")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
