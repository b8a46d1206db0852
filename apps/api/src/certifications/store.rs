use sqlx::PgPool;
use uuid::Uuid;

use super::validation::CertificationInput;
use crate::errors::AppError;
use crate::models::testimonial::CertificationRow;

pub async fn create_certification(
    pool: &PgPool,
    input: &CertificationInput,
) -> Result<CertificationRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO certifications
            (id, title, issuer, issue_date, image_url, credential_id, link)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&input.title)
    .bind(&input.issuer)
    .bind(&input.issue_date)
    .bind(&input.image_url)
    .bind(&input.credential_id)
    .bind(&input.link)
    .fetch_one(pool)
    .await
}

pub async fn update_certification(
    pool: &PgPool,
    id: Uuid,
    input: &CertificationInput,
) -> Result<CertificationRow, AppError> {
    sqlx::query_as::<_, CertificationRow>(
        r#"
        UPDATE certifications SET
            title = $2, issuer = $3, issue_date = $4,
            image_url = $5, credential_id = $6, link = $7
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.issuer)
    .bind(&input.issue_date)
    .bind(&input.image_url)
    .bind(&input.credential_id)
    .bind(&input.link)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Certification {id} not found")))
}

pub async fn delete_certification(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let deleted = sqlx::query("DELETE FROM certifications WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Certification {id} not found")));
    }
    Ok(())
}

pub async fn certifications(pool: &PgPool) -> Result<Vec<CertificationRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM certifications ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}
