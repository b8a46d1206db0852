//! Skill-category persistence. A save writes the category row and diffs its
//! owned skills inside one transaction, so the category and its children
//! never disagree.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use super::validation::{SkillCategoryInput, SkillInput};
use crate::errors::AppError;
use crate::models::skills::{SkillCategoryDetail, SkillCategoryRow, SkillRow};
use crate::sync::plan_owned_sync;

/// Create-or-update by optional id, with the child-skill sync in the same
/// transaction.
pub async fn save_category(
    pool: &PgPool,
    id: Option<Uuid>,
    input: &SkillCategoryInput,
) -> Result<SkillCategoryDetail, AppError> {
    let mut tx = pool.begin().await?;

    let category: SkillCategoryRow = match id {
        Some(id) => sqlx::query_as(
            r#"
            UPDATE skill_categories
            SET title = $2, icon = $3, sort_order = $4, is_active = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.icon)
        .bind(input.sort_order)
        .bind(input.is_active)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Skill category {id} not found")))?,
        None => {
            sqlx::query_as(
                r#"
                INSERT INTO skill_categories (id, title, icon, sort_order, is_active)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&input.title)
            .bind(&input.icon)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?
        }
    };

    sync_skills(&mut tx, category.id, &input.skills).await?;
    tx.commit().await?;
    info!("Skill category {} saved", category.title);

    category_detail(pool, category).await
}

pub async fn delete_category(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    // Child skills go with the category via ON DELETE CASCADE.
    let deleted = sqlx::query("DELETE FROM skill_categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Skill category {id} not found")));
    }
    info!("Skill category {id} deleted");
    Ok(())
}

/// Active categories with their skills, in manual display order.
pub async fn active_categories(pool: &PgPool) -> Result<Vec<SkillCategoryDetail>, sqlx::Error> {
    let categories: Vec<SkillCategoryRow> = sqlx::query_as(
        "SELECT * FROM skill_categories WHERE is_active = TRUE ORDER BY sort_order ASC",
    )
    .fetch_all(pool)
    .await?;
    attach_skills(pool, categories).await
}

pub async fn all_categories(pool: &PgPool) -> Result<Vec<SkillCategoryDetail>, sqlx::Error> {
    let categories: Vec<SkillCategoryRow> =
        sqlx::query_as("SELECT * FROM skill_categories ORDER BY sort_order ASC")
            .fetch_all(pool)
            .await?;
    attach_skills(pool, categories).await
}

async fn category_detail(
    pool: &PgPool,
    category: SkillCategoryRow,
) -> Result<SkillCategoryDetail, AppError> {
    let skills = sqlx::query_as(
        "SELECT * FROM skills WHERE category_id = $1 ORDER BY level DESC, name ASC",
    )
    .bind(category.id)
    .fetch_all(pool)
    .await?;
    Ok(SkillCategoryDetail { category, skills })
}

async fn attach_skills(
    pool: &PgPool,
    categories: Vec<SkillCategoryRow>,
) -> Result<Vec<SkillCategoryDetail>, sqlx::Error> {
    if categories.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = categories.iter().map(|c| c.id).collect();
    let skills: Vec<SkillRow> = sqlx::query_as(
        "SELECT * FROM skills WHERE category_id = ANY($1) ORDER BY level DESC, name ASC",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut by_category: HashMap<Uuid, Vec<SkillRow>> = HashMap::new();
    for skill in skills {
        by_category.entry(skill.category_id).or_default().push(skill);
    }

    Ok(categories
        .into_iter()
        .map(|category| {
            let skills = by_category.remove(&category.id).unwrap_or_default();
            SkillCategoryDetail { category, skills }
        })
        .collect())
}

async fn sync_skills(
    tx: &mut Transaction<'_, Postgres>,
    category_id: Uuid,
    desired: &[SkillInput],
) -> Result<(), sqlx::Error> {
    let existing: Vec<SkillRow> =
        sqlx::query_as("SELECT * FROM skills WHERE category_id = $1 ORDER BY name")
            .bind(category_id)
            .fetch_all(&mut **tx)
            .await?;

    let plan = plan_owned_sync(
        &existing,
        desired,
        |e| e.name.as_str(),
        |d| d.name.as_str(),
        |e, d| e.level == d.level && e.icon == d.icon,
    );

    for &i in &plan.delete {
        sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(existing[i].id)
            .execute(&mut **tx)
            .await?;
    }
    for &(i, j) in &plan.update {
        sqlx::query("UPDATE skills SET level = $2, icon = $3 WHERE id = $1")
            .bind(existing[i].id)
            .bind(desired[j].level)
            .bind(&desired[j].icon)
            .execute(&mut **tx)
            .await?;
    }
    for &j in &plan.insert {
        sqlx::query(
            "INSERT INTO skills (id, category_id, name, level, icon)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(category_id)
        .bind(&desired[j].name)
        .bind(desired[j].level)
        .bind(&desired[j].icon)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
