use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Owner availability shown in the hero banner and the profile card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    Available,
    Busy,
    OpenForCommission,
}

/// Singleton row addressed by the fixed id `hero-static`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HeroSectionRow {
    pub id: String,
    pub status: Availability,
    pub greeting: String,
    pub name: String,
    pub role: String,
    pub description: String,
    pub primary_image: String,
    pub secondary_images: Vec<String>,
    pub resume_url: Option<String>,
    pub cta_text: String,
    pub updated_at: DateTime<Utc>,
}

/// Singleton row addressed by the fixed id `about-static`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AboutSectionRow {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CorePillarRow {
    pub id: Uuid,
    pub about_id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AboutStatusRow {
    pub id: Uuid,
    pub about_id: String,
    pub label: String,
    pub value: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutDetail {
    #[serde(flatten)]
    pub about: AboutSectionRow,
    pub core_pillars: Vec<CorePillarRow>,
    pub statuses: Vec<AboutStatusRow>,
}
