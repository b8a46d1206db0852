//! Blog persistence. Tags use connect-or-create against the shared
//! vocabulary; comment/like relations surface as counts only.

use std::collections::HashMap;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::validation::BlogInput;
use crate::errors::AppError;
use crate::models::blog::{BlogDetail, BlogRow};
use crate::models::project::TagRow;
use crate::projects::store::resolve_tags;
use crate::sync::{attach_links, sync_links};

const BLOG_COLUMNS: &str = "b.*,
    (SELECT COUNT(*) FROM blog_comments c WHERE c.blog_id = b.id) AS comment_count,
    (SELECT COUNT(*) FROM blog_likes l WHERE l.blog_id = b.id) AS like_count";

pub async fn create_blog(pool: &PgPool, input: &BlogInput) -> Result<BlogDetail, AppError> {
    let tag_ids = resolve_tags(pool, &input.tags).await?;

    let mut tx = pool.begin().await?;
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO blogs
            (id, title, slug, category, excerpt, content, image, gallery,
             is_published, published_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                CASE WHEN $9 THEN now() ELSE NULL END)
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&input.title)
    .bind(&input.slug)
    .bind(&input.category)
    .bind(&input.excerpt)
    .bind(&input.content)
    .bind(&input.image)
    .bind(&input.gallery)
    .bind(input.is_published)
    .fetch_one(&mut *tx)
    .await?;

    attach_links(&mut tx, "blog_tags", "blog_id", "tag_id", id, &tag_ids).await?;
    tx.commit().await?;
    info!("Blog {} created", input.slug);

    blog_by_id(pool, id)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))
}

pub async fn update_blog(pool: &PgPool, id: Uuid, input: &BlogInput) -> Result<BlogDetail, AppError> {
    let tag_ids = resolve_tags(pool, &input.tags).await?;

    let mut tx = pool.begin().await?;
    let updated: Option<Uuid> = sqlx::query_scalar(
        r#"
        UPDATE blogs SET
            title = $2, slug = $3, category = $4, excerpt = $5, content = $6,
            image = $7, gallery = $8, is_published = $9,
            published_at = CASE WHEN $9 THEN COALESCE(published_at, now()) ELSE NULL END,
            updated_at = now()
        WHERE id = $1
        RETURNING id
        "#,
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.slug)
    .bind(&input.category)
    .bind(&input.excerpt)
    .bind(&input.content)
    .bind(&input.image)
    .bind(&input.gallery)
    .bind(input.is_published)
    .fetch_optional(&mut *tx)
    .await?;

    if updated.is_none() {
        return Err(AppError::NotFound(format!("Blog {id} not found")));
    }

    sync_links(&mut tx, "blog_tags", "blog_id", "tag_id", id, &tag_ids).await?;
    tx.commit().await?;
    info!("Blog {} updated", input.slug);

    blog_by_id(pool, id)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))
}

pub async fn delete_blog(pool: &PgPool, id: Uuid) -> Result<BlogRow, AppError> {
    let sql = format!("SELECT {BLOG_COLUMNS} FROM blogs b WHERE b.id = $1");
    let row = sqlx::query_as::<_, BlogRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog {id} not found")))?;

    sqlx::query("DELETE FROM blogs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    info!("Blog {} deleted", row.slug);
    Ok(row)
}

pub async fn published_blogs(pool: &PgPool) -> Result<Vec<BlogDetail>, sqlx::Error> {
    let sql = format!(
        "SELECT {BLOG_COLUMNS} FROM blogs b
         WHERE b.is_published = TRUE
         ORDER BY b.published_at DESC NULLS LAST"
    );
    let rows: Vec<BlogRow> = sqlx::query_as(&sql).fetch_all(pool).await?;
    attach_tags(pool, rows).await
}

pub async fn all_blogs(pool: &PgPool) -> Result<Vec<BlogDetail>, sqlx::Error> {
    let sql = format!(
        "SELECT {BLOG_COLUMNS} FROM blogs b
         ORDER BY b.created_at DESC"
    );
    let rows: Vec<BlogRow> = sqlx::query_as(&sql).fetch_all(pool).await?;
    attach_tags(pool, rows).await
}

pub async fn blog_by_id(pool: &PgPool, id: Uuid) -> Result<Option<BlogDetail>, sqlx::Error> {
    let sql = format!("SELECT {BLOG_COLUMNS} FROM blogs b WHERE b.id = $1");
    let Some(row) = sqlx::query_as::<_, BlogRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };
    Ok(attach_tags(pool, vec![row]).await?.pop())
}

/// Eager-loads tag lists for a batch of blogs in one query.
async fn attach_tags(pool: &PgPool, blogs: Vec<BlogRow>) -> Result<Vec<BlogDetail>, sqlx::Error> {
    if blogs.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = blogs.iter().map(|b| b.id).collect();

    #[derive(sqlx::FromRow)]
    struct LinkedTag {
        blog_id: Uuid,
        #[sqlx(flatten)]
        tag: TagRow,
    }
    let linked: Vec<LinkedTag> = sqlx::query_as(
        "SELECT bt.blog_id, t.id, t.name
         FROM blog_tags bt
         JOIN tags t ON t.id = bt.tag_id
         WHERE bt.blog_id = ANY($1)
         ORDER BY t.name",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut tags_by_blog: HashMap<Uuid, Vec<TagRow>> = HashMap::new();
    for row in linked {
        tags_by_blog.entry(row.blog_id).or_default().push(row.tag);
    }

    Ok(blogs
        .into_iter()
        .map(|blog| {
            let tags = tags_by_blog.remove(&blog.id).unwrap_or_default();
            BlogDetail { blog, tags }
        })
        .collect())
}
