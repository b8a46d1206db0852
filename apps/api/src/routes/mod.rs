pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::state::AppState;
use crate::{
    blogs, career, certifications, home, identity, projects, site, skills, testimonials, uploads,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public site
        .route("/api/v1/home", get(home::handle_home))
        .route("/api/v1/projects", get(projects::handlers::handle_list_projects))
        .route(
            "/api/v1/projects/:slug",
            get(projects::handlers::handle_get_project),
        )
        .route("/api/v1/blogs", get(blogs::handlers::handle_list_blogs))
        .route("/api/v1/blogs/:id", get(blogs::handlers::handle_get_blog))
        .route("/api/v1/skills", get(skills::handlers::handle_list_skills))
        .route("/api/v1/career", get(career::handlers::handle_get_career))
        .route(
            "/api/v1/certifications",
            get(certifications::handlers::handle_list_certifications),
        )
        .route(
            "/api/v1/testimonials",
            get(testimonials::handlers::handle_list_testimonials)
                .post(testimonials::handlers::handle_create_testimonial),
        )
        .route("/api/v1/site", get(site::handlers::handle_get_site))
        .route(
            "/api/v1/contact",
            get(site::handlers::handle_get_contact).post(site::handlers::handle_create_message),
        )
        // Admin dashboard
        .route(
            "/api/v1/admin/identity",
            get(identity::handlers::handle_get_identity)
                .put(identity::handlers::handle_update_identity),
        )
        .route("/api/v1/admin/hero", put(identity::handlers::handle_update_hero))
        .route("/api/v1/admin/about", put(identity::handlers::handle_update_about))
        .route(
            "/api/v1/admin/projects",
            get(projects::handlers::handle_admin_list_projects)
                .post(projects::handlers::handle_create_project),
        )
        .route(
            "/api/v1/admin/projects/:id",
            put(projects::handlers::handle_update_project)
                .delete(projects::handlers::handle_delete_project),
        )
        .route(
            "/api/v1/admin/blogs",
            get(blogs::handlers::handle_admin_list_blogs).post(blogs::handlers::handle_create_blog),
        )
        .route(
            "/api/v1/admin/blogs/:id",
            put(blogs::handlers::handle_update_blog).delete(blogs::handlers::handle_delete_blog),
        )
        .route(
            "/api/v1/admin/experiences",
            post(career::handlers::handle_create_experience),
        )
        .route(
            "/api/v1/admin/experiences/:id",
            put(career::handlers::handle_update_experience)
                .delete(career::handlers::handle_delete_experience),
        )
        .route(
            "/api/v1/admin/educations",
            post(career::handlers::handle_create_education),
        )
        .route(
            "/api/v1/admin/educations/:id",
            put(career::handlers::handle_update_education)
                .delete(career::handlers::handle_delete_education),
        )
        .route(
            "/api/v1/admin/skill-categories",
            get(skills::handlers::handle_admin_list_categories)
                .post(skills::handlers::handle_create_category),
        )
        .route(
            "/api/v1/admin/skill-categories/:id",
            put(skills::handlers::handle_update_category)
                .delete(skills::handlers::handle_delete_category),
        )
        .route(
            "/api/v1/admin/certifications",
            post(certifications::handlers::handle_create_certification),
        )
        .route(
            "/api/v1/admin/certifications/:id",
            put(certifications::handlers::handle_update_certification)
                .delete(certifications::handlers::handle_delete_certification),
        )
        .route(
            "/api/v1/admin/testimonials",
            get(testimonials::handlers::handle_admin_list_testimonials),
        )
        .route(
            "/api/v1/admin/testimonials/:id",
            delete(testimonials::handlers::handle_delete_testimonial),
        )
        .route(
            "/api/v1/admin/testimonials/:id/moderation",
            patch(testimonials::handlers::handle_moderate_testimonial),
        )
        .route("/api/v1/admin/site", put(site::handlers::handle_update_site))
        .route("/api/v1/admin/socials", put(site::handlers::handle_update_socials))
        .route(
            "/api/v1/admin/messages",
            get(site::handlers::handle_list_messages),
        )
        .route(
            "/api/v1/admin/messages/:id",
            delete(site::handlers::handle_delete_message),
        )
        .route(
            "/api/v1/admin/messages/:id/status",
            patch(site::handlers::handle_update_message_status),
        )
        .route("/api/v1/admin/uploads", post(uploads::handle_create_upload))
        .with_state(state)
}
