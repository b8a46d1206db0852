use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillCategoryRow {
    pub id: Uuid,
    pub title: String,
    pub icon: String,
    pub sort_order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub level: i32,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillCategoryDetail {
    #[serde(flatten)]
    pub category: SkillCategoryRow,
    pub skills: Vec<SkillRow>,
}
