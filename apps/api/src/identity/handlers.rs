use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::Admin;
use crate::cache::Entity;
use crate::errors::AppError;
use crate::identity::store;
use crate::identity::validation::{
    validate_about, validate_hero, validate_identity, AboutForm, HeroForm, IdentityForm,
};
use crate::models::identity::{AboutDetail, HeroSectionRow};
use crate::state::AppState;

#[derive(Serialize)]
pub struct IdentityResponse {
    pub hero: Option<HeroSectionRow>,
    pub about: Option<AboutDetail>,
}

/// GET /api/v1/admin/identity
/// Form prefill for the identity dashboard.
pub async fn handle_get_identity(
    State(state): State<AppState>,
    _admin: Admin,
) -> Result<Json<IdentityResponse>, AppError> {
    let (hero, about) = tokio::join!(store::hero(&state.db), store::about(&state.db));
    Ok(Json(IdentityResponse {
        hero: hero?,
        about: about?,
    }))
}

/// PUT /api/v1/admin/hero
pub async fn handle_update_hero(
    State(state): State<AppState>,
    _admin: Admin,
    Json(form): Json<HeroForm>,
) -> Result<Json<HeroSectionRow>, AppError> {
    let input = validate_hero(form)?;
    let row = store::save_hero(&state.db, &input).await?;
    state.cache.invalidate(Entity::Hero, None).await;
    Ok(Json(row))
}

/// PUT /api/v1/admin/about
pub async fn handle_update_about(
    State(state): State<AppState>,
    _admin: Admin,
    Json(form): Json<AboutForm>,
) -> Result<Json<AboutDetail>, AppError> {
    let input = validate_about(form)?;
    let detail = store::save_about(&state.db, &input).await?;
    state.cache.invalidate(Entity::About, None).await;
    Ok(Json(detail))
}

/// PUT /api/v1/admin/identity
/// Saves hero and about (with pillars/statuses) in one transaction.
pub async fn handle_update_identity(
    State(state): State<AppState>,
    _admin: Admin,
    Json(form): Json<IdentityForm>,
) -> Result<Json<IdentityResponse>, AppError> {
    let input = validate_identity(form)?;
    let (hero, about) = store::save_identity(&state.db, &input.hero, &input.about).await?;
    state.cache.invalidate(Entity::Hero, None).await;
    state.cache.invalidate(Entity::About, None).await;
    Ok(Json(IdentityResponse {
        hero: Some(hero),
        about: Some(about),
    }))
}
