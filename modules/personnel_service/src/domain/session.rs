//! Session handling and the page access guard
//!
//! A [`Session`] is resolved once per request by an [`IdentityProvider`] and
//! then handed explicitly to every view.

use crate::contract::{PersonnelError, Session};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Pages reachable without a session
pub const PUBLIC_PATHS: [&str; 3] = ["/", "/lupa-password", "/reset-password"];
pub const LOGIN_PATH: &str = "/";
pub const HOME_PATH: &str = "/beranda";

/// Outcome of the page guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Proceed,
    Redirect(&'static str),
}

/// Anonymous visitors are sent to the login page; signed-in users skip it.
/// An expired session counts as no session.
pub fn route_access(path: &str, session: Option<&Session>, now: DateTime<Utc>) -> RouteAccess {
    let signed_in = session.is_some_and(|s| !s.is_expired(now));
    let is_public = PUBLIC_PATHS.contains(&path);

    if !signed_in && !is_public {
        return RouteAccess::Redirect(LOGIN_PATH);
    }
    if signed_in && path == LOGIN_PATH {
        return RouteAccess::Redirect(HOME_PATH);
    }
    RouteAccess::Proceed
}

/// Reject expired sessions
pub fn ensure_active(session: &Session, now: DateTime<Utc>) -> Result<(), PersonnelError> {
    if session.is_expired(now) {
        tracing::debug!(user_id = %session.user_id, "Rejecting expired session");
        return Err(PersonnelError::SessionExpired {
            user_id: session.user_id.clone(),
        });
    }
    Ok(())
}

/// Resolves bearer tokens to sessions
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` when the token is unknown or revoked
    async fn resolve(&self, access_token: &str) -> Result<Option<Session>, PersonnelError>;
}

/// Token -> session cache; entries are dropped once expired
#[derive(Clone, Default)]
pub struct SessionCache {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live session for `access_token`, evicting it if expired
    pub fn get(&self, access_token: &str, now: DateTime<Utc>) -> Option<Session> {
        let cached = self.sessions.read().get(access_token).cloned()?;
        if cached.is_expired(now) {
            self.sessions.write().remove(access_token);
            return None;
        }
        Some(cached)
    }

    pub fn insert(&self, session: Session) {
        self.sessions
            .write()
            .insert(session.access_token.clone(), session);
    }

    pub fn remove(&self, access_token: &str) {
        self.sessions.write().remove(access_token);
    }

    /// Drop every expired entry, returning how many were removed
    pub fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

/// Fixed set of sessions, for development and tests
#[derive(Clone, Default)]
pub struct StaticIdentityProvider {
    cache: SessionCache,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(self, session: Session) -> Self {
        self.cache.insert(session);
        self
    }

    pub fn add_session(&self, session: Session) {
        self.cache.insert(session);
    }

    pub fn revoke(&self, access_token: &str) {
        self.cache.remove(access_token);
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn resolve(&self, access_token: &str) -> Result<Option<Session>, PersonnelError> {
        Ok(self.cache.get(access_token, Utc::now()))
    }
}
