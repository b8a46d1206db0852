use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::project::TagRow;

/// Blog row plus the comment/like counts every read projects alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlogRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub gallery: Vec<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comment_count: i64,
    pub like_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogDetail {
    #[serde(flatten)]
    pub blog: BlogRow,
    pub tags: Vec<TagRow>,
}
