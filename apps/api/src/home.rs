//! The public homepage aggregation.

use axum::{extract::State, response::Response};
use serde::Serialize;
use tracing::warn;

use crate::cache::respond_cached;
use crate::db::or_empty;
use crate::errors::AppError;
use crate::models::identity::{AboutDetail, HeroSectionRow};
use crate::models::project::ProjectDetail;
use crate::state::AppState;
use crate::{identity, projects};

#[derive(Serialize)]
pub struct HomePayload {
    pub hero: Option<HeroSectionRow>,
    pub about: Option<AboutDetail>,
    pub featured_projects: Vec<ProjectDetail>,
}

/// GET /api/v1/home
/// The independent section reads run concurrently, and a broken section
/// renders empty instead of taking the whole page down.
pub async fn handle_home(State(state): State<AppState>) -> Result<Response, AppError> {
    respond_cached(&state.cache, "/", || async {
        let (hero, about, featured) = tokio::join!(
            identity::store::hero(&state.db),
            identity::store::about(&state.db),
            projects::store::featured_projects(&state.db),
        );
        Ok(HomePayload {
            hero: hero.unwrap_or_else(|e| {
                warn!("Failed to fetch hero section, rendering empty: {e}");
                None
            }),
            about: about.unwrap_or_else(|e| {
                warn!("Failed to fetch about section, rendering empty: {e}");
                None
            }),
            featured_projects: or_empty(featured, "featured projects"),
        })
    })
    .await
}
