//! Identity provider backed by the auth service's `user` endpoint

use super::error::SourceError;
use super::source::parse_base_url;
use crate::contract::{PersonnelError, Session};
use crate::domain::session::{IdentityProvider, SessionCache};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Resolves bearer tokens with `GET {identity_url}/user`, caching each
/// session until it is within the refresh leeway of expiry
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    user_url: Url,
    ttl: Duration,
    refresh_leeway: Duration,
    cache: SessionCache,
}

impl HttpIdentityProvider {
    pub fn new(
        client: reqwest::Client,
        identity_url: &str,
        ttl: std::time::Duration,
        refresh_leeway: std::time::Duration,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            client,
            user_url: parse_base_url(identity_url)?.join("user")?,
            ttl: Duration::from_std(ttl).unwrap_or(Duration::hours(1)),
            refresh_leeway: Duration::from_std(refresh_leeway).unwrap_or(Duration::zero()),
            cache: SessionCache::new(),
        })
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    fn upstream(message: impl std::fmt::Display) -> PersonnelError {
        PersonnelError::Upstream {
            resource: "identity".to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn resolve(&self, access_token: &str) -> Result<Option<Session>, PersonnelError> {
        let now = Utc::now();
        if let Some(session) = self.cache.get(access_token, now) {
            if !session.needs_refresh(now, self.refresh_leeway) {
                return Ok(Some(session));
            }
        }

        let resp = self
            .client
            .get(self.user_url.clone())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Identity service unreachable");
                Self::upstream(e)
            })?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                self.cache.remove(access_token);
                tracing::debug!("Token rejected by identity service");
                return Ok(None);
            }
            status if !status.is_success() => {
                tracing::warn!(status = status.as_u16(), "Identity service error");
                return Err(Self::upstream(format!("status {}", status.as_u16())));
            }
            _ => {}
        }

        let user: UserResponse = resp.json().await.map_err(Self::upstream)?;
        let session = Session {
            user_id: user.id,
            email: user.email,
            access_token: access_token.to_string(),
            expires_at: now + self.ttl,
        };

        tracing::info!(user_id = %session.user_id, "Session resolved");
        let evicted = self.cache.evict_expired(now);
        if evicted > 0 {
            tracing::debug!(evicted, "Dropped expired sessions");
        }
        self.cache.insert(session.clone());
        Ok(Some(session))
    }
}
