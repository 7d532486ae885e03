//! HTTP record source backed by the record-keeping REST API

use super::error::SourceError;
use super::wire::{
    ErrorBody, RawActivity, RawCareerNote, RawEducation, RawEmployee, RawPosition, RawTraining,
};
use crate::config::RetryConfig;
use crate::contract::{
    ActivityEntry, CareerNote, EducationRecord, Employee, PositionAssignment, TrainingRecord,
};
use crate::domain::repository::RecordSource;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub struct HttpRecordSource {
    client: reqwest::Client,
    base_url: Url,
    retry: RetryConfig,
}

impl HttpRecordSource {
    pub fn new(base_url: &str, timeout: Duration, retry: RetryConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, parse_base_url(base_url)?, retry))
    }

    pub fn with_client(client: reqwest::Client, base_url: Url, retry: RetryConfig) -> Self {
        Self {
            client,
            base_url,
            retry,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch a collection, retrying failed reads. A `persistent` read also
    /// retries an empty collection and undecodable bodies.
    async fn get_list<R, T>(&self, path: &str, persistent: bool) -> Result<Vec<T>, SourceError>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let mut attempt = 0;
        loop {
            let outcome = self.fetch_once::<R>(path).await;
            let can_retry = attempt < self.retry.retries;

            match outcome {
                Err(e) if can_retry && (persistent || e.is_retryable()) => {
                    tracing::warn!(path, attempt, error = %e, "Backend read failed, retrying");
                }
                Ok(rows) if can_retry && persistent && rows.is_empty() => {
                    tracing::warn!(path, attempt, "Backend returned no rows, retrying");
                }
                Ok(rows) => {
                    tracing::debug!(path, count = rows.len(), "Fetched collection");
                    return Ok(rows.into_iter().map(T::from).collect());
                }
                Err(e) => return Err(e),
            }

            attempt += 1;
            tokio::time::sleep(self.retry.delay).await;
        }
    }

    async fn fetch_once<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>, SourceError> {
        let url = self.base_url.join(path)?;
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| format!("failed to fetch {} (status {})", path, status.as_u16()));
            return Err(SourceError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = serde_json::from_slice(&body).map_err(|source| SourceError::Decode {
            path: path.to_string(),
            source,
        })?;

        Ok(decode_rows(path, value))
    }
}

/// Keep the rows that decode; a non-array body counts as empty
fn decode_rows<R: DeserializeOwned>(path: &str, value: Value) -> Vec<R> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(path, kind = json_kind(&other), "Expected a JSON array, treating as empty");
            return Vec::new();
        }
    };

    let total = items.len();
    let rows: Vec<R> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(path, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect();

    if rows.len() < total {
        tracing::warn!(path, skipped = total - rows.len(), "Dropped malformed rows");
    }
    rows
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Relative paths join under the base only when it ends with '/'
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, SourceError> {
    let raw = raw.trim();
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{}/", raw))?)
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn employees(&self) -> Result<Vec<Employee>> {
        Ok(self.get_list::<RawEmployee, _>("pegawai", false).await?)
    }

    async fn education_records(&self) -> Result<Vec<EducationRecord>> {
        Ok(self.get_list::<RawEducation, _>("pendidikan", false).await?)
    }

    async fn training_records(&self) -> Result<Vec<TrainingRecord>> {
        Ok(self.get_list::<RawTraining, _>("penjenjangan", false).await?)
    }

    async fn career_notes(&self) -> Result<Vec<CareerNote>> {
        Ok(self.get_list::<RawCareerNote, _>("catatan-karir", false).await?)
    }

    async fn positions(&self) -> Result<Vec<PositionAssignment>> {
        Ok(self.get_list::<RawPosition, _>("struktur", true).await?)
    }

    async fn recent_activity(&self) -> Result<Vec<ActivityEntry>> {
        Ok(self.get_list::<RawActivity, _>("aktivitas/terbaru", false).await?)
    }
}
