//! Configuration for personnel service module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Personnel service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the record-keeping backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Identity service base URL; tokens are resolved against `{identity_url}/user`.
    /// Without it the tokens in `static_sessions` are the only accepted ones.
    #[serde(default)]
    pub identity_url: Option<String>,

    /// Fixed bearer tokens, used when `identity_url` is unset
    #[serde(default)]
    pub static_sessions: Vec<StaticSessionConfig>,

    /// Per-request timeout for backend calls
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Lifetime of a resolved session
    #[serde(default = "default_session_ttl", with = "humantime_serde")]
    pub session_ttl: Duration,

    /// Sessions closer than this to expiry are resolved again
    #[serde(default = "default_session_refresh_leeway", with = "humantime_serde")]
    pub session_refresh_leeway: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            identity_url: None,
            static_sessions: Vec::new(),
            request_timeout: default_request_timeout(),
            retry: RetryConfig::default(),
            dashboard: DashboardConfig::default(),
            session_ttl: default_session_ttl(),
            session_refresh_leeway: default_session_refresh_leeway(),
        }
    }
}

/// A bearer token accepted without an identity service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticSessionConfig {
    pub token: String,
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Read retry policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    /// Extra attempts after the first failure
    #[serde(default = "default_retries")]
    pub retries: u32,

    #[serde(default = "default_retry_delay", with = "humantime_serde")]
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            delay: default_retry_delay(),
        }
    }
}

/// Lengths of the landing page lists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[serde(default = "default_salary_increments")]
    pub salary_increments: usize,

    #[serde(default = "default_promotions")]
    pub promotions: usize,

    #[serde(default = "default_activities")]
    pub activities: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            salary_increments: default_salary_increments(),
            promotions: default_promotions(),
            activities: default_activities(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3001/".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_retries() -> u32 {
    2
}

fn default_retry_delay() -> Duration {
    Duration::from_millis(1500)
}

fn default_salary_increments() -> usize {
    2
}

fn default_promotions() -> usize {
    3
}

fn default_activities() -> usize {
    3
}

fn default_session_ttl() -> Duration {
    Duration::from_secs(60 * 60)
}

fn default_session_refresh_leeway() -> Duration {
    Duration::from_secs(5 * 60)
}
