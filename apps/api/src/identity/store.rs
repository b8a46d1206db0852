//! Persistence for the hero/about singletons and their owned children.
//!
//! Saves run inside one transaction so the section row and its pillars or
//! statuses never disagree; the child sets are diffed by their stable keys
//! and only changed rows are touched.

use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use super::validation::{AboutInput, HeroInput, PillarInput, StatusInput};
use crate::models::identity::{
    AboutDetail, AboutSectionRow, AboutStatusRow, CorePillarRow, HeroSectionRow,
};
use crate::sync::plan_owned_sync;

/// Fixed ids keeping the hero/about tables single-row.
pub const HERO_ID: &str = "hero-static";
pub const ABOUT_ID: &str = "about-static";

pub async fn hero(pool: &PgPool) -> Result<Option<HeroSectionRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM hero_section WHERE id = $1")
        .bind(HERO_ID)
        .fetch_optional(pool)
        .await
}

pub async fn about(pool: &PgPool) -> Result<Option<AboutDetail>, sqlx::Error> {
    let Some(about) =
        sqlx::query_as::<_, AboutSectionRow>("SELECT * FROM about_section WHERE id = $1")
            .bind(ABOUT_ID)
            .fetch_optional(pool)
            .await?
    else {
        return Ok(None);
    };

    let core_pillars =
        sqlx::query_as("SELECT * FROM core_pillars WHERE about_id = $1 ORDER BY title")
            .bind(ABOUT_ID)
            .fetch_all(pool)
            .await?;
    let statuses =
        sqlx::query_as("SELECT * FROM about_statuses WHERE about_id = $1 ORDER BY label")
            .bind(ABOUT_ID)
            .fetch_all(pool)
            .await?;

    Ok(Some(AboutDetail {
        about,
        core_pillars,
        statuses,
    }))
}

pub async fn save_hero(pool: &PgPool, input: &HeroInput) -> Result<HeroSectionRow, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    let row = upsert_hero(&mut conn, input).await?;
    info!("Hero section saved");
    Ok(row)
}

pub async fn save_about(pool: &PgPool, input: &AboutInput) -> Result<AboutDetail, sqlx::Error> {
    let mut tx = pool.begin().await?;
    upsert_about(&mut tx, input).await?;
    sync_pillars(&mut tx, &input.core_pillars).await?;
    sync_statuses(&mut tx, &input.statuses).await?;
    tx.commit().await?;
    info!("About section saved");

    about(pool).await?.ok_or(sqlx::Error::RowNotFound)
}

/// The combined identity save: hero, about, and the about children all
/// commit together or not at all.
pub async fn save_identity(
    pool: &PgPool,
    hero_input: &HeroInput,
    about_input: &AboutInput,
) -> Result<(HeroSectionRow, AboutDetail), sqlx::Error> {
    let mut tx = pool.begin().await?;
    let hero_row = upsert_hero(&mut tx, hero_input).await?;
    upsert_about(&mut tx, about_input).await?;
    sync_pillars(&mut tx, &about_input.core_pillars).await?;
    sync_statuses(&mut tx, &about_input.statuses).await?;
    tx.commit().await?;
    info!("Identity synchronized");

    let about_detail = about(pool).await?.ok_or(sqlx::Error::RowNotFound)?;
    Ok((hero_row, about_detail))
}

async fn upsert_hero(
    conn: &mut PgConnection,
    input: &HeroInput,
) -> Result<HeroSectionRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO hero_section
            (id, status, greeting, name, role, description,
             primary_image, secondary_images, resume_url, cta_text, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, now())
        ON CONFLICT (id) DO UPDATE SET
            status = EXCLUDED.status,
            greeting = EXCLUDED.greeting,
            name = EXCLUDED.name,
            role = EXCLUDED.role,
            description = EXCLUDED.description,
            primary_image = EXCLUDED.primary_image,
            secondary_images = EXCLUDED.secondary_images,
            resume_url = EXCLUDED.resume_url,
            cta_text = EXCLUDED.cta_text,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(HERO_ID)
    .bind(input.status)
    .bind(&input.greeting)
    .bind(&input.name)
    .bind(&input.role)
    .bind(&input.description)
    .bind(&input.primary_image)
    .bind(&input.secondary_images)
    .bind(&input.resume_url)
    .bind(&input.cta_text)
    .fetch_one(conn)
    .await
}

async fn upsert_about(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    input: &AboutInput,
) -> Result<AboutSectionRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO about_section (id, title, subtitle, description, updated_at)
        VALUES ($1, $2, $3, $4, now())
        ON CONFLICT (id) DO UPDATE SET
            title = EXCLUDED.title,
            subtitle = EXCLUDED.subtitle,
            description = EXCLUDED.description,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(ABOUT_ID)
    .bind(&input.title)
    .bind(&input.subtitle)
    .bind(&input.description)
    .fetch_one(&mut **tx)
    .await
}

async fn sync_pillars(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    desired: &[PillarInput],
) -> Result<(), sqlx::Error> {
    let existing: Vec<CorePillarRow> =
        sqlx::query_as("SELECT * FROM core_pillars WHERE about_id = $1 ORDER BY title")
            .bind(ABOUT_ID)
            .fetch_all(&mut **tx)
            .await?;

    let plan = plan_owned_sync(
        &existing,
        desired,
        |e| e.title.as_str(),
        |d| d.title.as_str(),
        |e, d| e.description == d.description && e.icon == d.icon,
    );

    for &i in &plan.delete {
        sqlx::query("DELETE FROM core_pillars WHERE id = $1")
            .bind(existing[i].id)
            .execute(&mut **tx)
            .await?;
    }
    for &(i, j) in &plan.update {
        sqlx::query("UPDATE core_pillars SET description = $2, icon = $3 WHERE id = $1")
            .bind(existing[i].id)
            .bind(&desired[j].description)
            .bind(&desired[j].icon)
            .execute(&mut **tx)
            .await?;
    }
    for &j in &plan.insert {
        sqlx::query(
            "INSERT INTO core_pillars (id, about_id, title, description, icon)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(ABOUT_ID)
        .bind(&desired[j].title)
        .bind(&desired[j].description)
        .bind(&desired[j].icon)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn sync_statuses(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    desired: &[StatusInput],
) -> Result<(), sqlx::Error> {
    let existing: Vec<AboutStatusRow> =
        sqlx::query_as("SELECT * FROM about_statuses WHERE about_id = $1 ORDER BY label")
            .bind(ABOUT_ID)
            .fetch_all(&mut **tx)
            .await?;

    let plan = plan_owned_sync(
        &existing,
        desired,
        |e| e.label.as_str(),
        |d| d.label.as_str(),
        |e, d| e.value == d.value && e.is_active == d.is_active,
    );

    for &i in &plan.delete {
        sqlx::query("DELETE FROM about_statuses WHERE id = $1")
            .bind(existing[i].id)
            .execute(&mut **tx)
            .await?;
    }
    for &(i, j) in &plan.update {
        sqlx::query("UPDATE about_statuses SET value = $2, is_active = $3 WHERE id = $1")
            .bind(existing[i].id)
            .bind(&desired[j].value)
            .bind(desired[j].is_active)
            .execute(&mut **tx)
            .await?;
    }
    for &j in &plan.insert {
        sqlx::query(
            "INSERT INTO about_statuses (id, about_id, label, value, is_active)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(ABOUT_ID)
        .bind(&desired[j].label)
        .bind(&desired[j].value)
        .bind(desired[j].is_active)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
