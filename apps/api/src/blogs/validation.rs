use serde::Deserialize;

use crate::errors::AppError;
use crate::projects::validation::TagRef;
use crate::validate::{require_len, require_url, FieldErrors};

#[derive(Debug, Clone, Deserialize)]
pub struct BlogForm {
    pub title: String,
    pub slug: String,
    pub category: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub tags: Vec<TagRef>,
}

#[derive(Debug, Clone)]
pub struct BlogInput {
    pub title: String,
    pub slug: String,
    pub category: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub gallery: Vec<String>,
    pub is_published: bool,
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

pub fn validate_blog(form: BlogForm) -> Result<BlogInput, AppError> {
    let mut errors = FieldErrors::new();

    let title = require_len(&mut errors, "title", &form.title, 2);
    let slug = form.slug.trim().to_string();
    if !is_slug(&slug) {
        errors.push("slug", "slug must be lowercase letters, digits and hyphens");
    }
    let excerpt = require_len(&mut errors, "excerpt", &form.excerpt, 10);
    let content = require_len(&mut errors, "content", &form.content, 10);
    let image = require_url(&mut errors, "image", &form.image);
    let gallery = form
        .gallery
        .iter()
        .enumerate()
        .map(|(i, url)| require_url(&mut errors, &format!("gallery[{i}]"), url))
        .collect();
    let category = form
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "General".to_string());
    let tags = form
        .tags
        .iter()
        .enumerate()
        .map(|(i, t)| require_len(&mut errors, &format!("tags[{i}].name"), &t.name, 1))
        .collect();

    errors.into_result(BlogInput {
        title,
        slug,
        category,
        excerpt,
        content,
        image,
        gallery,
        is_published: form.is_published,
        tags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BlogForm {
        BlogForm {
            title: "Zero Trust".to_string(),
            slug: "zero-trust-security".to_string(),
            category: None,
            excerpt: "Moving beyond firewalls in the SDLC.".to_string(),
            content: "Full article content goes here...".to_string(),
            image: "https://cdn.example.com/blog.png".to_string(),
            gallery: vec![],
            is_published: true,
            tags: vec![TagRef {
                name: "Security".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_blog_passes_with_default_category() {
        let input = validate_blog(form()).unwrap();
        assert_eq!(input.category, "General");
        assert_eq!(input.tags, vec!["Security".to_string()]);
    }

    #[test]
    fn test_short_excerpt_rejected() {
        let mut f = form();
        f.excerpt = "too short".to_string();
        match validate_blog(f) {
            Err(AppError::Validation(fields)) => assert!(fields.contains("excerpt")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_slug_rejected() {
        let mut f = form();
        f.slug = "Not A Slug".to_string();
        assert!(validate_blog(f).is_err());
    }

    #[test]
    fn test_explicit_category_kept() {
        let mut f = form();
        f.category = Some("Architecture".to_string());
        assert_eq!(validate_blog(f).unwrap().category, "Architecture");
    }
}
