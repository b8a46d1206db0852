use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Visitor feedback. `is_active` is the moderation flag; new rows start
/// inactive and unfeatured regardless of the submitted payload.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TestimonialRow {
    pub id: Uuid,
    pub client_name: String,
    pub client_title: String,
    pub content: String,
    pub rating: i32,
    pub email: String,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CertificationRow {
    pub id: Uuid,
    pub title: String,
    pub issuer: String,
    pub issue_date: String,
    pub image_url: Option<String>,
    pub credential_id: Option<String>,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}
