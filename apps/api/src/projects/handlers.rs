use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::Admin;
use crate::cache::{respond_cached, Entity};
use crate::errors::AppError;
use crate::models::project::ProjectDetail;
use crate::projects::store;
use crate::projects::validation::{validate_project, ProjectForm};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ProjectListQuery {
    #[serde(default)]
    pub featured: bool,
}

/// GET /api/v1/projects
/// Published projects; `?featured=true` returns the capped homepage list.
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Response, AppError> {
    if query.featured {
        let projects = store::featured_projects(&state.db).await?;
        return Ok(Json(projects).into_response());
    }
    respond_cached(&state.cache, "/projects", || async {
        Ok(store::published_projects(&state.db).await?)
    })
    .await
}

/// GET /api/v1/projects/:slug
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let path = format!("/projects/{slug}");
    respond_cached(&state.cache, &path, || async {
        store::project_by_slug(&state.db, &slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {slug} not found")))
    })
    .await
}

/// GET /api/v1/admin/projects
pub async fn handle_admin_list_projects(
    State(state): State<AppState>,
    _admin: Admin,
) -> Result<Json<Vec<ProjectDetail>>, AppError> {
    Ok(Json(store::all_projects(&state.db).await?))
}

/// POST /api/v1/admin/projects
pub async fn handle_create_project(
    State(state): State<AppState>,
    _admin: Admin,
    Json(form): Json<ProjectForm>,
) -> Result<(StatusCode, Json<ProjectDetail>), AppError> {
    let input = validate_project(form)?;
    let detail = store::create_project(&state.db, &input).await?;
    state
        .cache
        .invalidate(Entity::Project, Some(&detail.project.slug))
        .await;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/v1/admin/projects/:id
pub async fn handle_update_project(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
    Json(form): Json<ProjectForm>,
) -> Result<Json<ProjectDetail>, AppError> {
    let input = validate_project(form)?;
    let detail = store::update_project(&state.db, id, &input).await?;
    state
        .cache
        .invalidate(Entity::Project, Some(&detail.project.slug))
        .await;
    Ok(Json(detail))
}

/// DELETE /api/v1/admin/projects/:id
pub async fn handle_delete_project(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let removed = store::delete_project(&state.db, id).await?;
    state
        .cache
        .invalidate(Entity::Project, Some(&removed.slug))
        .await;
    Ok(StatusCode::NO_CONTENT)
}
