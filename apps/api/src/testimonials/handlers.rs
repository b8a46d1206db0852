use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{Admin, Session};
use crate::cache::Entity;
use crate::errors::AppError;
use crate::models::testimonial::TestimonialRow;
use crate::state::AppState;
use crate::testimonials::store;
use crate::testimonials::validation::{validate_testimonial, TestimonialForm};

/// GET /api/v1/testimonials
pub async fn handle_list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<TestimonialRow>>, AppError> {
    Ok(Json(store::active_testimonials(&state.db).await?))
}

/// POST /api/v1/testimonials
/// Any signed-in visitor may submit; the record's identity comes from the
/// session, never from the payload.
pub async fn handle_create_testimonial(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<TestimonialForm>,
) -> Result<(StatusCode, Json<TestimonialRow>), AppError> {
    let input = validate_testimonial(form)?;
    let record = store::forced_record(input, &session);
    let row = store::create_testimonial(&state.db, &record).await?;
    state.cache.invalidate(Entity::Testimonial, None).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/admin/testimonials
pub async fn handle_admin_list_testimonials(
    State(state): State<AppState>,
    _admin: Admin,
) -> Result<Json<Vec<TestimonialRow>>, AppError> {
    Ok(Json(store::all_testimonials(&state.db).await?))
}

#[derive(Deserialize)]
pub struct ModerationForm {
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// PATCH /api/v1/admin/testimonials/:id/moderation
pub async fn handle_moderate_testimonial(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
    Json(form): Json<ModerationForm>,
) -> Result<Json<TestimonialRow>, AppError> {
    let row = store::update_moderation(&state.db, id, form.is_active, form.is_featured).await?;
    state.cache.invalidate(Entity::Testimonial, None).await;
    Ok(Json(row))
}

/// DELETE /api/v1/admin/testimonials/:id
pub async fn handle_delete_testimonial(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    store::delete_testimonial(&state.db, id).await?;
    state.cache.invalidate(Entity::Testimonial, None).await;
    Ok(StatusCode::NO_CONTENT)
}
