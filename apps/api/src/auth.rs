//! Session verification against the external auth provider.
//!
//! The API holds no credentials of its own: the request's bearer token is
//! forwarded to the provider's session endpoint and the returned identity is
//! trusted verbatim. Handlers receive the principal explicitly through the
//! [`Session`] / [`Admin`] extractors, so the authorization decision is a
//! pure function of (principal, requested action).

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    #[default]
    User,
}

/// The session object returned by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// Only admins may mutate site content.
pub fn authorize_admin(session: &Session) -> Result<(), AppError> {
    match session.role {
        Role::SuperAdmin | Role::Admin => Ok(()),
        Role::User => Err(AppError::Forbidden),
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)
}

#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    session_url: String,
}

impl AuthClient {
    pub fn new(session_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            session_url,
        }
    }

    /// Resolves a bearer token to a session via the provider.
    /// An unrecognized token is `Unauthorized`; provider outages surface as
    /// a distinct error so they are not mistaken for bad credentials.
    pub async fn verify(&self, token: &str) -> Result<Session, AppError> {
        let resp = self
            .http
            .get(&self.session_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::AuthProvider(format!("session lookup failed: {e}")))?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED
            || resp.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Err(AppError::Unauthorized);
        }
        if !resp.status().is_success() {
            return Err(AppError::AuthProvider(format!(
                "session endpoint returned {}",
                resp.status()
            )));
        }

        resp.json::<Session>()
            .await
            .map_err(|e| AppError::AuthProvider(format!("malformed session payload: {e}")))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(parts)?;
        state.auth.verify(token).await
    }
}

/// A session that passed the admin-role gate.
pub struct Admin(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for Admin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let session = Session::from_request_parts(parts, state).await?;
        authorize_admin(&session)?;
        Ok(Admin(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn session(role: Role) -> Session {
        Session {
            email: "owner@example.com".to_string(),
            name: Some("Owner".to_string()),
            image: None,
            role,
        }
    }

    #[test]
    fn test_admin_roles_pass_the_gate() {
        assert!(authorize_admin(&session(Role::Admin)).is_ok());
        assert!(authorize_admin(&session(Role::SuperAdmin)).is_ok());
    }

    #[test]
    fn test_plain_user_is_forbidden() {
        assert!(matches!(
            authorize_admin(&session(Role::User)),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_bearer_token_extraction() {
        let (parts, _) = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc123")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(bearer_token(&parts).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_or_malformed_header_is_unauthorized() {
        let (parts, _) = Request::builder().body(()).unwrap().into_parts();
        assert!(matches!(bearer_token(&parts), Err(AppError::Unauthorized)));

        let (parts, _) = Request::builder()
            .header(header::AUTHORIZATION, "Basic abc123")
            .body(())
            .unwrap()
            .into_parts();
        assert!(matches!(bearer_token(&parts), Err(AppError::Unauthorized)));

        let (parts, _) = Request::builder()
            .header(header::AUTHORIZATION, "Bearer ")
            .body(())
            .unwrap()
            .into_parts();
        assert!(matches!(bearer_token(&parts), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_role_defaults_to_user_when_absent() {
        let parsed: Session =
            serde_json::from_str(r#"{"email":"visitor@example.com","name":null,"image":null}"#)
                .unwrap();
        assert_eq!(parsed.role, Role::User);
    }

    #[test]
    fn test_role_parses_screaming_snake_case() {
        let parsed: Session = serde_json::from_str(
            r#"{"email":"owner@example.com","name":"O","image":null,"role":"SUPER_ADMIN"}"#,
        )
        .unwrap();
        assert_eq!(parsed.role, Role::SuperAdmin);
    }
}
