use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use uuid::Uuid;

use crate::auth::Admin;
use crate::cache::{respond_cached, Entity};
use crate::errors::AppError;
use crate::models::skills::SkillCategoryDetail;
use crate::skills::store;
use crate::skills::validation::{validate_skill_category, SkillCategoryForm};
use crate::state::AppState;

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Result<Response, AppError> {
    respond_cached(&state.cache, "/skills", || async {
        Ok(store::active_categories(&state.db).await?)
    })
    .await
}

/// GET /api/v1/admin/skill-categories
pub async fn handle_admin_list_categories(
    State(state): State<AppState>,
    _admin: Admin,
) -> Result<Json<Vec<SkillCategoryDetail>>, AppError> {
    Ok(Json(store::all_categories(&state.db).await?))
}

/// POST /api/v1/admin/skill-categories
pub async fn handle_create_category(
    State(state): State<AppState>,
    _admin: Admin,
    Json(form): Json<SkillCategoryForm>,
) -> Result<(StatusCode, Json<SkillCategoryDetail>), AppError> {
    let input = validate_skill_category(form)?;
    let detail = store::save_category(&state.db, None, &input).await?;
    state.cache.invalidate(Entity::SkillCategory, None).await;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/v1/admin/skill-categories/:id
pub async fn handle_update_category(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
    Json(form): Json<SkillCategoryForm>,
) -> Result<Json<SkillCategoryDetail>, AppError> {
    let input = validate_skill_category(form)?;
    let detail = store::save_category(&state.db, Some(id), &input).await?;
    state.cache.invalidate(Entity::SkillCategory, None).await;
    Ok(Json(detail))
}

/// DELETE /api/v1/admin/skill-categories/:id
pub async fn handle_delete_category(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    store::delete_category(&state.db, id).await?;
    state.cache.invalidate(Entity::SkillCategory, None).await;
    Ok(StatusCode::NO_CONTENT)
}
