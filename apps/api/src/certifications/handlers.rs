use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::Admin;
use crate::cache::Entity;
use crate::certifications::store;
use crate::certifications::validation::{validate_certification, CertificationForm};
use crate::errors::AppError;
use crate::models::testimonial::CertificationRow;
use crate::state::AppState;

/// GET /api/v1/certifications
pub async fn handle_list_certifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<CertificationRow>>, AppError> {
    Ok(Json(store::certifications(&state.db).await?))
}

/// POST /api/v1/admin/certifications
pub async fn handle_create_certification(
    State(state): State<AppState>,
    _admin: Admin,
    Json(form): Json<CertificationForm>,
) -> Result<(StatusCode, Json<CertificationRow>), AppError> {
    let input = validate_certification(form)?;
    let row = store::create_certification(&state.db, &input).await?;
    state.cache.invalidate(Entity::Certification, None).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/admin/certifications/:id
pub async fn handle_update_certification(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
    Json(form): Json<CertificationForm>,
) -> Result<Json<CertificationRow>, AppError> {
    let input = validate_certification(form)?;
    let row = store::update_certification(&state.db, id, &input).await?;
    state.cache.invalidate(Entity::Certification, None).await;
    Ok(Json(row))
}

/// DELETE /api/v1/admin/certifications/:id
pub async fn handle_delete_certification(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    store::delete_certification(&state.db, id).await?;
    state.cache.invalidate(Entity::Certification, None).await;
    Ok(StatusCode::NO_CONTENT)
}
