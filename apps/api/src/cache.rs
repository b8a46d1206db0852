//! Redis-backed page cache.
//!
//! Public pages are cached by path; every successful mutation purges the
//! paths that render the touched entity. The entity→paths dependency lives
//! in [`stale_paths`] alone, so adding a page means editing one table.
//! Cache failures degrade to a warning; the database remains the source of
//! truth and requests never fail because redis is down.

use std::future::Future;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use redis::AsyncCommands;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::AppError;

/// Safety TTL so an invalidation bug cannot serve stale pages forever.
const PAGE_TTL_SECS: u64 = 3600;

/// Entities whose writes invalidate rendered pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Hero,
    About,
    Project,
    Blog,
    Experience,
    Education,
    SkillCategory,
    Certification,
    Testimonial,
    SiteConfig,
    Socials,
    ContactMessage,
}

/// The pages that render each entity. Slugged entities add their own detail
/// path on top of the fixed list.
pub fn stale_paths(entity: Entity, slug: Option<&str>) -> Vec<String> {
    let fixed: &[&str] = match entity {
        Entity::Hero | Entity::About => &["/", "/dashboard/identity"],
        Entity::Project => &["/", "/projects", "/dashboard/projects"],
        Entity::Blog => &["/", "/blogs", "/dashboard/blogs"],
        Entity::SkillCategory => &["/", "/skills", "/dashboard/controls"],
        Entity::Experience | Entity::Education | Entity::Certification => {
            &["/", "/dashboard/controls"]
        }
        Entity::Testimonial => &["/", "/testimonials", "/dashboard/testimonials"],
        Entity::SiteConfig => &["/"],
        Entity::Socials => &["/", "/contact"],
        Entity::ContactMessage => &["/dashboard/messages"],
    };

    let mut paths: Vec<String> = fixed.iter().map(|p| p.to_string()).collect();
    if let Some(slug) = slug {
        match entity {
            Entity::Project => paths.push(format!("/projects/{slug}")),
            Entity::Blog => paths.push(format!("/blogs/{slug}")),
            _ => {}
        }
    }
    paths
}

#[derive(Clone)]
pub struct PageCache {
    client: redis::Client,
}

impl PageCache {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    fn cache_key(path: &str) -> String {
        format!("page:{path}")
    }

    pub async fn lookup(&self, path: &str) -> Option<String> {
        let mut conn = match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Page cache unavailable: {e}");
                return None;
            }
        };
        match conn.get::<_, Option<String>>(Self::cache_key(path)).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!("Page cache read failed for {path}: {e}");
                None
            }
        }
    }

    pub async fn store(&self, path: &str, body: &str) {
        let mut conn = match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Page cache unavailable: {e}");
                return;
            }
        };
        if let Err(e) = conn
            .set_ex::<_, _, ()>(Self::cache_key(path), body, PAGE_TTL_SECS)
            .await
        {
            warn!("Page cache write failed for {path}: {e}");
        }
    }

    /// Purges every page that renders `entity`.
    pub async fn invalidate(&self, entity: Entity, slug: Option<&str>) {
        let paths = stale_paths(entity, slug);
        let keys: Vec<String> = paths.iter().map(|p| Self::cache_key(p)).collect();
        let mut conn = match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Page cache unavailable, skipping invalidation: {e}");
                return;
            }
        };
        match conn.del::<_, usize>(keys).await {
            Ok(purged) => debug!("Invalidated {purged} cached pages for {entity:?}"),
            Err(e) => warn!("Page cache invalidation failed for {entity:?}: {e}"),
        }
    }
}

/// Read-through helper: serve the cached body when present, otherwise load,
/// serialize once, and populate the cache.
pub async fn respond_cached<T, F, Fut>(
    cache: &PageCache,
    path: &str,
    load: F,
) -> Result<Response, AppError>
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    if let Some(body) = cache.lookup(path).await {
        return Ok(json_response(body));
    }
    let value = load().await?;
    let body = serde_json::to_string(&value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("response serialization failed: {e}")))?;
    cache.store(path, &body).await;
    Ok(json_response(body))
}

fn json_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_write_flags_home_and_dashboard() {
        let paths = stale_paths(Entity::Project, None);
        assert!(paths.contains(&"/".to_string()));
        assert!(paths.contains(&"/dashboard/projects".to_string()));
        assert!(paths.contains(&"/projects".to_string()));
    }

    #[test]
    fn test_slugged_project_adds_detail_path() {
        let paths = stale_paths(Entity::Project, Some("demo"));
        assert!(paths.contains(&"/projects/demo".to_string()));
    }

    #[test]
    fn test_slug_is_ignored_for_unslugged_entities() {
        let paths = stale_paths(Entity::Hero, Some("demo"));
        assert_eq!(paths, vec!["/".to_string(), "/dashboard/identity".to_string()]);
    }

    #[test]
    fn test_blog_detail_path() {
        let paths = stale_paths(Entity::Blog, Some("zero-trust-security"));
        assert!(paths.contains(&"/blogs/zero-trust-security".to_string()));
        assert!(paths.contains(&"/blogs".to_string()));
    }

    #[test]
    fn test_testimonial_paths() {
        let paths = stale_paths(Entity::Testimonial, None);
        assert_eq!(
            paths,
            vec![
                "/".to_string(),
                "/testimonials".to_string(),
                "/dashboard/testimonials".to_string()
            ]
        );
    }

    #[test]
    fn test_skill_write_purges_the_public_skills_page() {
        let paths = stale_paths(Entity::SkillCategory, None);
        assert!(paths.contains(&"/skills".to_string()));
    }

    #[test]
    fn test_every_entity_invalidates_at_least_one_path() {
        for entity in [
            Entity::Hero,
            Entity::About,
            Entity::Project,
            Entity::Blog,
            Entity::Experience,
            Entity::Education,
            Entity::SkillCategory,
            Entity::Certification,
            Entity::Testimonial,
            Entity::SiteConfig,
            Entity::Socials,
            Entity::ContactMessage,
        ] {
            assert!(!stale_paths(entity, None).is_empty());
        }
    }
}
