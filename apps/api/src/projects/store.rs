//! Project persistence and the technique/tag relation-sync write path.
//!
//! Relation resolution upserts the shared vocabulary by unique name before
//! the transaction opens; a crash in between leaves at worst an unlinked
//! technique/tag row, which the next save reuses by name. The parent write
//! and the link diff run inside one transaction.

use std::collections::HashMap;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::validation::{ProjectInput, TechniqueInput};
use crate::errors::AppError;
use crate::models::project::{ProjectDetail, ProjectRow, TagRow, TechniqueRow};
use crate::sync::{attach_links, sync_links};

/// Fixed row cap for the homepage featured list.
pub const FEATURED_TAKE: i64 = 6;

/// Maps the slug unique-constraint violation to the one friendly conflict
/// message the admin form surfaces; everything else stays a database error.
pub fn map_slug_conflict(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db) = err {
        if db.code().as_deref() == Some("23505") && db.constraint() == Some("projects_slug_key") {
            return AppError::Conflict("A project with this slug already exists".to_string());
        }
    }
    AppError::Database(err)
}

/// Upserts each candidate technique by unique name, collecting ids.
/// Existing rows get their icon refreshed; names are shared across parents.
pub async fn resolve_techniques(
    pool: &PgPool,
    items: &[TechniqueInput],
) -> Result<Vec<Uuid>, sqlx::Error> {
    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO techniques (id, name, icon)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO UPDATE SET icon = EXCLUDED.icon
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&item.name)
        .bind(&item.icon)
        .fetch_one(pool)
        .await?;
        ids.push(id);
    }
    Ok(ids)
}

/// Connect-or-create for tags: resolve by unique name, creating if absent.
pub async fn resolve_tags(pool: &PgPool, names: &[String]) -> Result<Vec<Uuid>, sqlx::Error> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO tags (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(pool)
        .await?;
        ids.push(id);
    }
    Ok(ids)
}

pub async fn create_project(pool: &PgPool, input: &ProjectInput) -> Result<ProjectDetail, AppError> {
    // Resolution runs outside the transaction; the name-keyed upserts are
    // idempotent, so an interrupted save leaves at most unlinked rows.
    let tech_ids = resolve_techniques(pool, &input.techniques).await?;
    let tag_ids = resolve_tags(pool, &input.tags).await?;

    let mut tx = pool.begin().await?;
    let project: ProjectRow = sqlx::query_as(
        r#"
        INSERT INTO projects
            (id, title, slug, description, content, image, gallery, category,
             live_url, repo_url, is_featured, is_active, is_published)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&input.title)
    .bind(&input.slug)
    .bind(&input.description)
    .bind(&input.content)
    .bind(&input.image)
    .bind(&input.gallery)
    .bind(input.category)
    .bind(&input.live_url)
    .bind(&input.repo_url)
    .bind(input.is_featured)
    .bind(input.is_active)
    .bind(input.is_published)
    .fetch_one(&mut *tx)
    .await
    .map_err(map_slug_conflict)?;

    attach_links(
        &mut tx,
        "project_techniques",
        "project_id",
        "technique_id",
        project.id,
        &tech_ids,
    )
    .await?;
    attach_links(&mut tx, "project_tags", "project_id", "tag_id", project.id, &tag_ids).await?;
    tx.commit().await?;
    info!("Project {} created", project.slug);

    fetch_detail(pool, project).await
}

pub async fn update_project(
    pool: &PgPool,
    id: Uuid,
    input: &ProjectInput,
) -> Result<ProjectDetail, AppError> {
    let tech_ids = resolve_techniques(pool, &input.techniques).await?;
    let tag_ids = resolve_tags(pool, &input.tags).await?;

    let mut tx = pool.begin().await?;
    let project: ProjectRow = sqlx::query_as(
        r#"
        UPDATE projects SET
            title = $2, slug = $3, description = $4, content = $5, image = $6,
            gallery = $7, category = $8, live_url = $9, repo_url = $10,
            is_featured = $11, is_active = $12, is_published = $13,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.slug)
    .bind(&input.description)
    .bind(&input.content)
    .bind(&input.image)
    .bind(&input.gallery)
    .bind(input.category)
    .bind(&input.live_url)
    .bind(&input.repo_url)
    .bind(input.is_featured)
    .bind(input.is_active)
    .bind(input.is_published)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;

    sync_links(
        &mut tx,
        "project_techniques",
        "project_id",
        "technique_id",
        project.id,
        &tech_ids,
    )
    .await?;
    sync_links(&mut tx, "project_tags", "project_id", "tag_id", project.id, &tag_ids).await?;
    tx.commit().await?;
    info!("Project {} updated", project.slug);

    fetch_detail(pool, project).await
}

/// Deletes the project, returning the removed row so the caller can purge
/// its detail path. Join rows cascade; vocabulary rows survive.
pub async fn delete_project(pool: &PgPool, id: Uuid) -> Result<ProjectRow, AppError> {
    sqlx::query_as::<_, ProjectRow>("DELETE FROM projects WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))
}

pub async fn published_projects(pool: &PgPool) -> Result<Vec<ProjectDetail>, sqlx::Error> {
    let rows: Vec<ProjectRow> = sqlx::query_as(
        "SELECT * FROM projects
         WHERE is_published = TRUE AND is_active = TRUE
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    attach_relations(pool, rows).await
}

pub async fn featured_projects(pool: &PgPool) -> Result<Vec<ProjectDetail>, sqlx::Error> {
    let rows: Vec<ProjectRow> = sqlx::query_as(
        "SELECT * FROM projects
         WHERE is_published = TRUE AND is_active = TRUE AND is_featured = TRUE
         ORDER BY created_at DESC
         LIMIT $1",
    )
    .bind(FEATURED_TAKE)
    .fetch_all(pool)
    .await?;
    attach_relations(pool, rows).await
}

pub async fn all_projects(pool: &PgPool) -> Result<Vec<ProjectDetail>, sqlx::Error> {
    let rows: Vec<ProjectRow> =
        sqlx::query_as("SELECT * FROM projects ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;
    attach_relations(pool, rows).await
}

pub async fn project_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<ProjectDetail>, sqlx::Error> {
    let Some(row) = sqlx::query_as::<_, ProjectRow>(
        "SELECT * FROM projects
         WHERE slug = $1 AND is_published = TRUE AND is_active = TRUE",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?
    else {
        return Ok(None);
    };
    Ok(attach_relations(pool, vec![row]).await?.pop())
}

async fn fetch_detail(pool: &PgPool, project: ProjectRow) -> Result<ProjectDetail, AppError> {
    let mut details = attach_relations(pool, vec![project]).await?;
    details.pop().ok_or(AppError::Database(sqlx::Error::RowNotFound))
}

/// Eager-loads techniques and tags for a batch of projects in two queries.
async fn attach_relations(
    pool: &PgPool,
    projects: Vec<ProjectRow>,
) -> Result<Vec<ProjectDetail>, sqlx::Error> {
    if projects.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();

    #[derive(sqlx::FromRow)]
    struct LinkedTechnique {
        project_id: Uuid,
        #[sqlx(flatten)]
        technique: TechniqueRow,
    }
    let techniques: Vec<LinkedTechnique> = sqlx::query_as(
        "SELECT pt.project_id, t.id, t.name, t.icon
         FROM project_techniques pt
         JOIN techniques t ON t.id = pt.technique_id
         WHERE pt.project_id = ANY($1)
         ORDER BY t.name",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    #[derive(sqlx::FromRow)]
    struct LinkedTag {
        project_id: Uuid,
        #[sqlx(flatten)]
        tag: TagRow,
    }
    let tags: Vec<LinkedTag> = sqlx::query_as(
        "SELECT pt.project_id, t.id, t.name
         FROM project_tags pt
         JOIN tags t ON t.id = pt.tag_id
         WHERE pt.project_id = ANY($1)
         ORDER BY t.name",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut techniques_by_project: HashMap<Uuid, Vec<TechniqueRow>> = HashMap::new();
    for linked in techniques {
        techniques_by_project
            .entry(linked.project_id)
            .or_default()
            .push(linked.technique);
    }
    let mut tags_by_project: HashMap<Uuid, Vec<TagRow>> = HashMap::new();
    for linked in tags {
        tags_by_project
            .entry(linked.project_id)
            .or_default()
            .push(linked.tag);
    }

    Ok(projects
        .into_iter()
        .map(|project| {
            let techniques = techniques_by_project.remove(&project.id).unwrap_or_default();
            let tags = tags_by_project.remove(&project.id).unwrap_or_default();
            ProjectDetail {
                project,
                techniques,
                tags,
            }
        })
        .collect())
}

