//! Contract error types for personnel service
//!
//! These errors are transport-agnostic and used for inter-module communication.
//! The merge, hierarchy and aggregation functions never produce them; they only
//! surface from fetching, validation and session checks.

/// Personnel service domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonnelError {
    /// The record-keeping backend failed or was unreachable
    Upstream {
        /// Collection being fetched (pegawai, struktur, ...)
        resource: String,
        /// Failure details
        message: String,
    },
    /// Advisory validation rejected a candidate record
    Validation {
        /// Offending field
        field: String,
        /// Validation error message
        message: String,
    },
    /// No session, or the token did not resolve to a user
    Unauthenticated,
    /// Session is past its expiry
    SessionExpired {
        /// Owner of the expired session
        user_id: String,
    },
    /// Internal error
    Internal,
}

impl PersonnelError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for PersonnelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upstream { resource, message } => {
                write!(f, "Failed to fetch {}: {}", resource, message)
            }
            Self::Validation { field, message } => {
                write!(f, "Validation error on {}: {}", field, message)
            }
            Self::Unauthenticated => {
                write!(f, "Authentication required")
            }
            Self::SessionExpired { user_id } => {
                write!(f, "Session expired for user {}", user_id)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for PersonnelError {}
