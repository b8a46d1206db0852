use serde::Deserialize;

use crate::errors::AppError;
use crate::validate::{check_range, require_len, FieldErrors};

#[derive(Debug, Clone, Deserialize)]
pub struct SkillForm {
    pub name: String,
    pub level: i32,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillCategoryForm {
    pub title: String,
    pub icon: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub skills: Vec<SkillForm>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct SkillInput {
    pub name: String,
    pub level: i32,
    pub icon: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SkillCategoryInput {
    pub title: String,
    pub icon: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub skills: Vec<SkillInput>,
}

pub fn validate_skill_category(form: SkillCategoryForm) -> Result<SkillCategoryInput, AppError> {
    let mut errors = FieldErrors::new();

    let title = require_len(&mut errors, "title", &form.title, 2);
    let icon = require_len(&mut errors, "icon", &form.icon, 1);
    if form.sort_order < 0 {
        errors.push("sort_order", "sort_order cannot be negative");
    }

    let skills = form
        .skills
        .iter()
        .enumerate()
        .map(|(i, s)| {
            check_range(&mut errors, &format!("skills[{i}].level"), s.level, 0, 100);
            SkillInput {
                name: require_len(&mut errors, &format!("skills[{i}].name"), &s.name, 1),
                level: s.level,
                icon: s
                    .icon
                    .as_deref()
                    .map(str::trim)
                    .filter(|icon| !icon.is_empty())
                    .map(String::from),
            }
        })
        .collect();

    errors.into_result(SkillCategoryInput {
        title,
        icon,
        sort_order: form.sort_order,
        is_active: form.is_active,
        skills,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SkillCategoryForm {
        SkillCategoryForm {
            title: "Backend".to_string(),
            icon: "Server".to_string(),
            sort_order: 1,
            is_active: true,
            skills: vec![SkillForm {
                name: "PostgreSQL".to_string(),
                level: 80,
                icon: None,
            }],
        }
    }

    #[test]
    fn test_valid_category_passes() {
        let input = validate_skill_category(form()).unwrap();
        assert_eq!(input.skills.len(), 1);
        assert_eq!(input.skills[0].level, 80);
    }

    #[test]
    fn test_level_outside_range_rejected() {
        for level in [-1, 101] {
            let mut f = form();
            f.skills[0].level = level;
            match validate_skill_category(f) {
                Err(AppError::Validation(fields)) => {
                    assert!(fields.contains("skills[0].level"), "{level}")
                }
                other => panic!("expected validation error for {level}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_level_bounds_inclusive() {
        for level in [0, 100] {
            let mut f = form();
            f.skills[0].level = level;
            assert!(validate_skill_category(f).is_ok(), "{level}");
        }
    }

    #[test]
    fn test_negative_sort_order_rejected() {
        let mut f = form();
        f.sort_order = -1;
        assert!(validate_skill_category(f).is_err());
    }
}
