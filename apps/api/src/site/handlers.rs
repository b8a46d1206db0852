use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::Admin;
use crate::cache::Entity;
use crate::errors::AppError;
use crate::models::site::{
    ContactCard, ContactLinksRow, ContactMessageRow, MessageStatus, SiteConfigRow,
};
use crate::site::store;
use crate::site::validation::{
    validate_contact_message, validate_site_config, validate_socials, ContactMessageForm,
    SiteConfigForm, SocialsForm,
};
use crate::state::AppState;
use crate::validate::{parse_enum, FieldErrors};

/// GET /api/v1/site
pub async fn handle_get_site(
    State(state): State<AppState>,
) -> Result<Json<Option<SiteConfigRow>>, AppError> {
    Ok(Json(store::site_config(&state.db).await?))
}

/// PUT /api/v1/admin/site
pub async fn handle_update_site(
    State(state): State<AppState>,
    _admin: Admin,
    Json(form): Json<SiteConfigForm>,
) -> Result<Json<SiteConfigRow>, AppError> {
    let input = validate_site_config(form)?;
    let row = store::save_site_config(&state.db, &input).await?;
    state.cache.invalidate(Entity::SiteConfig, None).await;
    Ok(Json(row))
}

/// GET /api/v1/contact
pub async fn handle_get_contact(
    State(state): State<AppState>,
) -> Result<Json<ContactCard>, AppError> {
    store::contact_card(&state.db)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Owner profile not set up yet".to_string()))
}

/// PUT /api/v1/admin/socials
pub async fn handle_update_socials(
    State(state): State<AppState>,
    _admin: Admin,
    Json(form): Json<SocialsForm>,
) -> Result<Json<ContactLinksRow>, AppError> {
    let input = validate_socials(form)?;
    let row = store::save_socials(&state.db, &input).await?;
    state.cache.invalidate(Entity::Socials, None).await;
    Ok(Json(row))
}

/// POST /api/v1/contact
pub async fn handle_create_message(
    State(state): State<AppState>,
    Json(form): Json<ContactMessageForm>,
) -> Result<(StatusCode, Json<ContactMessageRow>), AppError> {
    let input = validate_contact_message(form)?;
    let row = store::create_message(&state.db, &input).await?;
    state.cache.invalidate(Entity::ContactMessage, None).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/admin/messages
pub async fn handle_list_messages(
    State(state): State<AppState>,
    _admin: Admin,
) -> Result<Json<Vec<ContactMessageRow>>, AppError> {
    Ok(Json(store::messages(&state.db).await?))
}

#[derive(Deserialize)]
pub struct MessageStatusForm {
    pub status: String,
}

/// PATCH /api/v1/admin/messages/:id/status
pub async fn handle_update_message_status(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
    Json(form): Json<MessageStatusForm>,
) -> Result<Json<ContactMessageRow>, AppError> {
    let mut errors = FieldErrors::new();
    let status = parse_enum::<MessageStatus>(&mut errors, "status", &form.status);
    let status = errors.into_result(status)?.unwrap_or(MessageStatus::Unread);

    let row = store::update_message_status(&state.db, id, status).await?;
    state.cache.invalidate(Entity::ContactMessage, None).await;
    Ok(Json(row))
}

/// DELETE /api/v1/admin/messages/:id
pub async fn handle_delete_message(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    store::delete_message(&state.db, id).await?;
    state.cache.invalidate(Entity::ContactMessage, None).await;
    Ok(StatusCode::NO_CONTENT)
}
