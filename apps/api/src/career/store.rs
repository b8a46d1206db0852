//! Experience and education persistence. Experiences link the shared
//! technique vocabulary by id; education rows stand alone.

use std::collections::HashMap;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::validation::{EducationInput, ExperienceInput};
use crate::errors::AppError;
use crate::models::career::{EducationRow, ExperienceDetail, ExperienceRow};
use crate::models::project::TechniqueRow;
use crate::sync::{attach_links, sync_links};

pub async fn create_experience(
    pool: &PgPool,
    input: &ExperienceInput,
) -> Result<ExperienceDetail, AppError> {
    let mut tx = pool.begin().await?;
    let row: ExperienceRow = sqlx::query_as(
        r#"
        INSERT INTO experiences
            (id, company_name, role, location, start_date, end_date, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&input.company_name)
    .bind(&input.role)
    .bind(&input.location)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(&input.description)
    .fetch_one(&mut *tx)
    .await?;

    attach_links(
        &mut tx,
        "experience_techniques",
        "experience_id",
        "technique_id",
        row.id,
        &input.techniques,
    )
    .await?;
    tx.commit().await?;
    info!("Experience at {} created", row.company_name);

    fetch_detail(pool, row).await
}

pub async fn update_experience(
    pool: &PgPool,
    id: Uuid,
    input: &ExperienceInput,
) -> Result<ExperienceDetail, AppError> {
    let mut tx = pool.begin().await?;
    let row: ExperienceRow = sqlx::query_as(
        r#"
        UPDATE experiences SET
            company_name = $2, role = $3, location = $4,
            start_date = $5, end_date = $6, description = $7
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.company_name)
    .bind(&input.role)
    .bind(&input.location)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(&input.description)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))?;

    sync_links(
        &mut tx,
        "experience_techniques",
        "experience_id",
        "technique_id",
        row.id,
        &input.techniques,
    )
    .await?;
    tx.commit().await?;
    info!("Experience at {} updated", row.company_name);

    fetch_detail(pool, row).await
}

pub async fn delete_experience(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let deleted = sqlx::query("DELETE FROM experiences WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Experience {id} not found")));
    }
    Ok(())
}

/// Newest position first; open-ended entries carry a NULL end date.
pub async fn experiences(pool: &PgPool) -> Result<Vec<ExperienceDetail>, sqlx::Error> {
    let rows: Vec<ExperienceRow> =
        sqlx::query_as("SELECT * FROM experiences ORDER BY start_date DESC")
            .fetch_all(pool)
            .await?;
    attach_techniques(pool, rows).await
}

async fn fetch_detail(pool: &PgPool, row: ExperienceRow) -> Result<ExperienceDetail, AppError> {
    let mut details = attach_techniques(pool, vec![row]).await?;
    details.pop().ok_or(AppError::Database(sqlx::Error::RowNotFound))
}

async fn attach_techniques(
    pool: &PgPool,
    experiences: Vec<ExperienceRow>,
) -> Result<Vec<ExperienceDetail>, sqlx::Error> {
    if experiences.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = experiences.iter().map(|e| e.id).collect();

    #[derive(sqlx::FromRow)]
    struct LinkedTechnique {
        experience_id: Uuid,
        #[sqlx(flatten)]
        technique: TechniqueRow,
    }
    let linked: Vec<LinkedTechnique> = sqlx::query_as(
        "SELECT et.experience_id, t.id, t.name, t.icon
         FROM experience_techniques et
         JOIN techniques t ON t.id = et.technique_id
         WHERE et.experience_id = ANY($1)
         ORDER BY t.name",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut by_experience: HashMap<Uuid, Vec<TechniqueRow>> = HashMap::new();
    for row in linked {
        by_experience
            .entry(row.experience_id)
            .or_default()
            .push(row.technique);
    }

    Ok(experiences
        .into_iter()
        .map(|experience| {
            let techniques = by_experience.remove(&experience.id).unwrap_or_default();
            ExperienceDetail {
                experience,
                techniques,
            }
        })
        .collect())
}

pub async fn create_education(
    pool: &PgPool,
    input: &EducationInput,
) -> Result<EducationRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO educations
            (id, institution, degree, field_of_study, start_date, end_date, grade, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&input.institution)
    .bind(&input.degree)
    .bind(&input.field_of_study)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(&input.grade)
    .bind(&input.description)
    .fetch_one(pool)
    .await
}

pub async fn update_education(
    pool: &PgPool,
    id: Uuid,
    input: &EducationInput,
) -> Result<EducationRow, AppError> {
    sqlx::query_as::<_, EducationRow>(
        r#"
        UPDATE educations SET
            institution = $2, degree = $3, field_of_study = $4,
            start_date = $5, end_date = $6, grade = $7, description = $8
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.institution)
    .bind(&input.degree)
    .bind(&input.field_of_study)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(&input.grade)
    .bind(&input.description)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Education {id} not found")))
}

pub async fn delete_education(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let deleted = sqlx::query("DELETE FROM educations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Education {id} not found")));
    }
    Ok(())
}

pub async fn educations(pool: &PgPool) -> Result<Vec<EducationRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM educations ORDER BY start_date DESC")
        .fetch_all(pool)
        .await
}
