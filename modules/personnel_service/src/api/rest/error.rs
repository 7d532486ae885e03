//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::PersonnelError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: PersonnelError) -> Problem {
    match error {
        PersonnelError::Upstream { resource, message } => {
            Problem::new(StatusCode::BAD_GATEWAY, "Upstream Unavailable")
                .with_detail(format!("Failed to fetch {}: {}", resource, message))
        }

        PersonnelError::Validation { field, message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error")
                .with_detail(message)
                .with_instance(format!("#/{}", field))
        }

        PersonnelError::Unauthenticated => Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized")
            .with_detail("A valid bearer token is required"),

        PersonnelError::SessionExpired { .. } => {
            Problem::new(StatusCode::UNAUTHORIZED, "Session Expired")
                .with_detail("The session has expired, sign in again")
        }

        PersonnelError::Internal => {
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("An unexpected error occurred")
        }
    }
}

impl From<PersonnelError> for Problem {
    fn from(error: PersonnelError) -> Self {
        map_domain_error(error)
    }
}
