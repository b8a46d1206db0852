use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use uuid::Uuid;

use crate::auth::Admin;
use crate::blogs::store;
use crate::blogs::validation::{validate_blog, BlogForm};
use crate::cache::{respond_cached, Entity};
use crate::errors::AppError;
use crate::models::blog::BlogDetail;
use crate::state::AppState;

/// GET /api/v1/blogs
pub async fn handle_list_blogs(State(state): State<AppState>) -> Result<Response, AppError> {
    respond_cached(&state.cache, "/blogs", || async {
        Ok(store::published_blogs(&state.db).await?)
    })
    .await
}

/// GET /api/v1/blogs/:id
pub async fn handle_get_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BlogDetail>, AppError> {
    let detail = store::blog_by_id(&state.db, id)
        .await?
        .filter(|d| d.blog.is_published)
        .ok_or_else(|| AppError::NotFound(format!("Blog {id} not found")))?;
    Ok(Json(detail))
}

/// GET /api/v1/admin/blogs
pub async fn handle_admin_list_blogs(
    State(state): State<AppState>,
    _admin: Admin,
) -> Result<Json<Vec<BlogDetail>>, AppError> {
    Ok(Json(store::all_blogs(&state.db).await?))
}

/// POST /api/v1/admin/blogs
pub async fn handle_create_blog(
    State(state): State<AppState>,
    _admin: Admin,
    Json(form): Json<BlogForm>,
) -> Result<(StatusCode, Json<BlogDetail>), AppError> {
    let input = validate_blog(form)?;
    let detail = store::create_blog(&state.db, &input).await?;
    state
        .cache
        .invalidate(Entity::Blog, Some(&detail.blog.slug))
        .await;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/v1/admin/blogs/:id
pub async fn handle_update_blog(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
    Json(form): Json<BlogForm>,
) -> Result<Json<BlogDetail>, AppError> {
    let input = validate_blog(form)?;
    let detail = store::update_blog(&state.db, id, &input).await?;
    state
        .cache
        .invalidate(Entity::Blog, Some(&detail.blog.slug))
        .await;
    Ok(Json(detail))
}

/// DELETE /api/v1/admin/blogs/:id
pub async fn handle_delete_blog(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let removed = store::delete_blog(&state.db, id).await?;
    state.cache.invalidate(Entity::Blog, Some(&removed.slug)).await;
    Ok(StatusCode::NO_CONTENT)
}
