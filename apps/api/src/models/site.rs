use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::identity::Availability;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: String,
    pub user_id: Uuid,
    pub location: String,
    pub email: String,
    pub availability: Availability,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactLinksRow {
    pub id: Uuid,
    pub profile_id: String,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub x_url: Option<String>,
    pub whatsapp: Option<String>,
    pub figma: Option<String>,
}

/// The public contact section: owner account, profile, and socials.
#[derive(Debug, Clone, Serialize)]
pub struct ContactCard {
    pub user: Option<UserRow>,
    pub profile: ProfileRow,
    pub socials: Option<ContactLinksRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    Unread,
    Read,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactMessageRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

/// Singleton row addressed by the fixed id `site-static`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteConfigRow {
    pub id: String,
    pub footer_text: String,
    pub enable_blog: bool,
}
