//! Module wiring: builds the service and its adapters from configuration

use crate::api::native::NativeClient;
use crate::config::{Config, StaticSessionConfig};
use crate::contract::Session;
use crate::domain::session::{IdentityProvider, StaticIdentityProvider};
use crate::domain::{HierarchyResolver, RecordSource, Service};
use crate::infra::http::{HttpIdentityProvider, HttpRecordSource};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Personnel service module
pub struct PersonnelModule {
    config: Config,
    service: Arc<Service>,
    identity: Arc<dyn IdentityProvider>,
}

impl PersonnelModule {
    /// Wire the HTTP record source and identity provider from `config`
    pub fn from_config(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build HTTP client")?;

        let source = HttpRecordSource::new(
            &config.api_base_url,
            config.request_timeout,
            config.retry.clone(),
        )
        .with_context(|| format!("invalid api_base_url '{}'", config.api_base_url))?;

        let identity: Arc<dyn IdentityProvider> = match &config.identity_url {
            Some(url) => Arc::new(
                HttpIdentityProvider::new(
                    client,
                    url,
                    config.session_ttl,
                    config.session_refresh_leeway,
                )
                .with_context(|| format!("invalid identity_url '{}'", url))?,
            ),
            None => Arc::new(static_identity(&config.static_sessions)?),
        };
        if config.identity_url.is_some() && !config.static_sessions.is_empty() {
            tracing::warn!(
                count = config.static_sessions.len(),
                "identity_url is set; static_sessions are ignored"
            );
        }

        tracing::info!(
            api_base_url = %source.base_url(),
            retries = config.retry.retries,
            "Personnel service initialized"
        );

        Ok(Self::with_parts(config, Arc::new(source), identity))
    }

    /// Wire the module around an existing record source and identity provider
    pub fn with_parts(
        config: Config,
        source: Arc<dyn RecordSource>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let service = Arc::new(Service::with_options(
            source,
            HierarchyResolver::default(),
            config.dashboard.clone(),
        ));

        Self {
            config,
            service,
            identity,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn identity(&self) -> Arc<dyn IdentityProvider> {
        self.identity.clone()
    }

    /// In-process client
    pub fn native_client(&self) -> NativeClient {
        NativeClient::new(self.service.clone())
    }

    /// REST routes mounted under [`crate::api::rest::API_PREFIX`]
    pub fn router(&self) -> axum::Router {
        tracing::info!("Registering personnel service REST routes");
        crate::api::rest::register_routes(
            axum::Router::new(),
            self.service.clone(),
            self.identity.clone(),
        )
    }
}

/// Provider for the configured fixed tokens; these sessions never expire
fn static_identity(sessions: &[StaticSessionConfig]) -> Result<StaticIdentityProvider> {
    if sessions.is_empty() {
        bail!("no way to authenticate requests: set identity_url or add static_sessions");
    }

    let provider = StaticIdentityProvider::new();
    for s in sessions {
        provider.add_session(Session {
            user_id: s.user_id.clone(),
            email: s.email.clone(),
            access_token: s.token.clone(),
            expires_at: DateTime::<Utc>::MAX_UTC,
        });
    }
    tracing::warn!(
        count = sessions.len(),
        "No identity_url configured; accepting static sessions only"
    );
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_identity_source_is_an_error() {
        let err = PersonnelModule::from_config(Config::default())
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(err.contains("static_sessions"), "{err}");
    }

    #[tokio::test]
    async fn test_static_sessions_resolve() {
        let config = Config {
            static_sessions: vec![StaticSessionConfig {
                token: "dev-token".to_string(),
                user_id: "admin".to_string(),
                email: None,
            }],
            ..Config::default()
        };
        let module = PersonnelModule::from_config(config).unwrap();

        let session = module.identity().resolve("dev-token").await.unwrap().unwrap();
        assert_eq!(session.user_id, "admin");
        assert!(!session.is_expired(Utc::now()));
        assert!(module.identity().resolve("other").await.unwrap().is_none());
    }
}
