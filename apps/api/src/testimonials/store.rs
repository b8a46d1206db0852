//! Testimonial persistence and moderation.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::validation::TestimonialInput;
use crate::auth::Session;
use crate::errors::AppError;
use crate::models::testimonial::TestimonialRow;

/// A testimonial ready to insert, identity already pinned to the session.
#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub client_name: String,
    pub client_title: String,
    pub content: String,
    pub rating: i32,
    pub email: String,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
}

/// Pins the record's identity to the authenticated session: whatever
/// email/avatar the form submitted is discarded, and new entries always
/// start in the moderation queue (inactive, unfeatured).
pub fn forced_record(input: TestimonialInput, session: &Session) -> NewTestimonial {
    NewTestimonial {
        client_name: input.client_name,
        client_title: input.client_title,
        content: input.content,
        rating: input.rating,
        email: session.email.clone(),
        avatar_url: session.image.clone(),
        is_active: false,
        is_featured: false,
    }
}

pub async fn create_testimonial(
    pool: &PgPool,
    record: &NewTestimonial,
) -> Result<TestimonialRow, sqlx::Error> {
    let row: TestimonialRow = sqlx::query_as(
        r#"
        INSERT INTO testimonials
            (id, client_name, client_title, content, rating, email, avatar_url,
             is_active, is_featured)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&record.client_name)
    .bind(&record.client_title)
    .bind(&record.content)
    .bind(record.rating)
    .bind(&record.email)
    .bind(&record.avatar_url)
    .bind(record.is_active)
    .bind(record.is_featured)
    .fetch_one(pool)
    .await?;
    info!("Testimonial from {} queued for moderation", row.email);
    Ok(row)
}

/// Partial moderation update: absent flags keep their current value.
pub async fn update_moderation(
    pool: &PgPool,
    id: Uuid,
    is_active: Option<bool>,
    is_featured: Option<bool>,
) -> Result<TestimonialRow, AppError> {
    sqlx::query_as::<_, TestimonialRow>(
        r#"
        UPDATE testimonials SET
            is_active = COALESCE($2, is_active),
            is_featured = COALESCE($3, is_featured)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(is_active)
    .bind(is_featured)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Testimonial {id} not found")))
}

pub async fn delete_testimonial(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let deleted = sqlx::query("DELETE FROM testimonials WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Testimonial {id} not found")));
    }
    Ok(())
}

/// Moderated entries shown on the public site.
pub async fn active_testimonials(pool: &PgPool) -> Result<Vec<TestimonialRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM testimonials WHERE is_active = TRUE ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

/// Full moderation queue, newest first.
pub async fn all_testimonials(pool: &PgPool) -> Result<Vec<TestimonialRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM testimonials ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    fn session() -> Session {
        Session {
            email: "real@example.com".to_string(),
            name: Some("Real User".to_string()),
            image: Some("https://cdn.example.com/real.png".to_string()),
            role: Role::User,
        }
    }

    fn input() -> TestimonialInput {
        TestimonialInput {
            client_name: "Sara".to_string(),
            client_title: "CTO".to_string(),
            content: "Great work, highly recommended.".to_string(),
            rating: 5,
            email: Some("spoofed@example.com".to_string()),
            avatar_url: Some("https://cdn.example.com/spoofed.png".to_string()),
        }
    }

    #[test]
    fn test_identity_is_forced_from_the_session() {
        let record = forced_record(input(), &session());
        assert_eq!(record.email, "real@example.com");
        assert_eq!(
            record.avatar_url.as_deref(),
            Some("https://cdn.example.com/real.png")
        );
    }

    #[test]
    fn test_new_entries_start_in_the_moderation_queue() {
        let record = forced_record(input(), &session());
        assert!(!record.is_active);
        assert!(!record.is_featured);
    }

    #[test]
    fn test_session_without_avatar_persists_null() {
        let mut s = session();
        s.image = None;
        let record = forced_record(input(), &s);
        assert_eq!(record.avatar_url, None);
    }
}
