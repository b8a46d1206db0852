//! Site config, owner contact card, and the visitor message inbox.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::validation::{ContactMessageInput, SiteConfigInput, SocialsInput};
use crate::errors::AppError;
use crate::models::site::{
    ContactCard, ContactLinksRow, ContactMessageRow, MessageStatus, ProfileRow, SiteConfigRow,
    UserRow,
};

pub const SITE_ID: &str = "site-static";
/// The owner profile seeded at setup.
pub const PROFILE_ID: &str = "owner-static";

pub async fn site_config(pool: &PgPool) -> Result<Option<SiteConfigRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM site_config WHERE id = $1")
        .bind(SITE_ID)
        .fetch_optional(pool)
        .await
}

pub async fn save_site_config(
    pool: &PgPool,
    input: &SiteConfigInput,
) -> Result<SiteConfigRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO site_config (id, footer_text, enable_blog)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO UPDATE SET
            footer_text = EXCLUDED.footer_text,
            enable_blog = EXCLUDED.enable_blog
        RETURNING *
        "#,
    )
    .bind(SITE_ID)
    .bind(&input.footer_text)
    .bind(input.enable_blog)
    .fetch_one(pool)
    .await
}

pub async fn contact_card(pool: &PgPool) -> Result<Option<ContactCard>, sqlx::Error> {
    let Some(profile) = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE id = $1")
        .bind(PROFILE_ID)
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };

    let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(profile.user_id)
        .fetch_optional(pool)
        .await?;
    let socials =
        sqlx::query_as::<_, ContactLinksRow>("SELECT * FROM contact_links WHERE profile_id = $1")
            .bind(PROFILE_ID)
            .fetch_optional(pool)
            .await?;

    Ok(Some(ContactCard {
        user,
        profile,
        socials,
    }))
}

pub async fn save_socials(
    pool: &PgPool,
    input: &SocialsInput,
) -> Result<ContactLinksRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO contact_links
            (id, profile_id, github_url, linkedin_url, x_url, whatsapp, figma)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (profile_id) DO UPDATE SET
            github_url = EXCLUDED.github_url,
            linkedin_url = EXCLUDED.linkedin_url,
            x_url = EXCLUDED.x_url,
            whatsapp = EXCLUDED.whatsapp,
            figma = EXCLUDED.figma
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(PROFILE_ID)
    .bind(&input.github_url)
    .bind(&input.linkedin_url)
    .bind(&input.x_url)
    .bind(&input.whatsapp)
    .bind(&input.figma)
    .fetch_one(pool)
    .await
}

pub async fn create_message(
    pool: &PgPool,
    input: &ContactMessageInput,
) -> Result<ContactMessageRow, sqlx::Error> {
    let row: ContactMessageRow = sqlx::query_as(
        r#"
        INSERT INTO contact_messages (id, name, email, subject, message, status)
        VALUES ($1, $2, $3, $4, $5, 'UNREAD')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&input.name)
    .bind(&input.email)
    .bind(&input.subject)
    .bind(&input.message)
    .fetch_one(pool)
    .await?;
    info!("Contact message received from {}", row.email);
    Ok(row)
}

pub async fn messages(pool: &PgPool) -> Result<Vec<ContactMessageRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM contact_messages ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn update_message_status(
    pool: &PgPool,
    id: Uuid,
    status: MessageStatus,
) -> Result<ContactMessageRow, AppError> {
    sqlx::query_as::<_, ContactMessageRow>(
        "UPDATE contact_messages SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Message {id} not found")))
}

pub async fn delete_message(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let deleted = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Message {id} not found")));
    }
    Ok(())
}
