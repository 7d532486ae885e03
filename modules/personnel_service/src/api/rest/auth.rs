//! Bearer token extractor
//!
//! Resolves `Authorization: Bearer <token>` through the [`IdentityProvider`]
//! registered as a router extension.

use super::error::{map_domain_error, Problem};
use crate::contract::{PersonnelError, Session};
use crate::domain::session::{ensure_active, IdentityProvider};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use chrono::Utc;
use std::sync::Arc;

/// Active session of the caller
#[derive(Debug, Clone)]
pub struct AuthSession(pub Session);

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(Self(session.clone()));
        }

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| {
                tracing::debug!(uri = %parts.uri, "Missing bearer token");
                map_domain_error(PersonnelError::Unauthenticated)
            })?
            .to_string();

        let provider = parts
            .extensions
            .get::<Arc<dyn IdentityProvider>>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("No identity provider registered on the router");
                Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            })?;

        let session = provider
            .resolve(&token)
            .await
            .map_err(map_domain_error)?
            .ok_or_else(|| {
                tracing::warn!(uri = %parts.uri, "Token did not resolve to a session");
                map_domain_error(PersonnelError::Unauthenticated)
            })?;

        ensure_active(&session, Utc::now()).map_err(map_domain_error)?;

        parts.extensions.insert(session.clone());
        Ok(Self(session))
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
