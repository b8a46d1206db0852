use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::Admin;
use crate::cache::Entity;
use crate::career::store;
use crate::career::validation::{
    validate_education, validate_experience, EducationForm, ExperienceForm,
};
use crate::errors::AppError;
use crate::models::career::{EducationRow, ExperienceDetail};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CareerResponse {
    pub experiences: Vec<ExperienceDetail>,
    pub educations: Vec<EducationRow>,
}

/// GET /api/v1/career
pub async fn handle_get_career(
    State(state): State<AppState>,
) -> Result<Json<CareerResponse>, AppError> {
    let (experiences, educations) =
        tokio::join!(store::experiences(&state.db), store::educations(&state.db));
    Ok(Json(CareerResponse {
        experiences: experiences?,
        educations: educations?,
    }))
}

/// POST /api/v1/admin/experiences
pub async fn handle_create_experience(
    State(state): State<AppState>,
    _admin: Admin,
    Json(form): Json<ExperienceForm>,
) -> Result<(StatusCode, Json<ExperienceDetail>), AppError> {
    let input = validate_experience(form)?;
    let detail = store::create_experience(&state.db, &input).await?;
    state.cache.invalidate(Entity::Experience, None).await;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/v1/admin/experiences/:id
pub async fn handle_update_experience(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
    Json(form): Json<ExperienceForm>,
) -> Result<Json<ExperienceDetail>, AppError> {
    let input = validate_experience(form)?;
    let detail = store::update_experience(&state.db, id, &input).await?;
    state.cache.invalidate(Entity::Experience, None).await;
    Ok(Json(detail))
}

/// DELETE /api/v1/admin/experiences/:id
pub async fn handle_delete_experience(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    store::delete_experience(&state.db, id).await?;
    state.cache.invalidate(Entity::Experience, None).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/educations
pub async fn handle_create_education(
    State(state): State<AppState>,
    _admin: Admin,
    Json(form): Json<EducationForm>,
) -> Result<(StatusCode, Json<EducationRow>), AppError> {
    let input = validate_education(form)?;
    let row = store::create_education(&state.db, &input).await?;
    state.cache.invalidate(Entity::Education, None).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/admin/educations/:id
pub async fn handle_update_education(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
    Json(form): Json<EducationForm>,
) -> Result<Json<EducationRow>, AppError> {
    let input = validate_education(form)?;
    let row = store::update_education(&state.db, id, &input).await?;
    state.cache.invalidate(Entity::Education, None).await;
    Ok(Json(row))
}

/// DELETE /api/v1/admin/educations/:id
pub async fn handle_delete_education(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    store::delete_education(&state.db, id).await?;
    state.cache.invalidate(Entity::Education, None).await;
    Ok(StatusCode::NO_CONTENT)
}
