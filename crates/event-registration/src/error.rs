//! Error types for the registration service.

use crate::registration::Field;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;
use std::net::SocketAddr;
use thiserror::Error;

/// Response message when any required top-level field is absent.
pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required.";

/// Response message for a body that cannot be read as JSON.
pub const MALFORMED_BODY_MESSAGE: &str = "Request body must be a JSON object.";

/// Response message for any storage failure. Details stay in the server log.
pub const STORE_FAILURE_MESSAGE: &str = "An error occurred while saving data. Please try again.";

/// A single constraint violated by a registration payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A required field is absent, null, or empty.
    MissingField(Field),
    /// A field is present but does not have the expected shape.
    InvalidFormat(Field),
    /// `members` is absent, empty, or contains a blank or non-text entry.
    InvalidMembers,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingField(field) => write!(f, "{} is required", field),
            Violation::InvalidFormat(Field::PhoneNo) => {
                f.write_str("Phone number must be 10 digits long")
            }
            Violation::InvalidFormat(Field::Email) => f.write_str("Invalid email format"),
            Violation::InvalidFormat(field) => write!(f, "{} must be text", field),
            Violation::InvalidMembers => {
                f.write_str("At least one valid team member name is required.")
            }
        }
    }
}

/// Every constraint a payload violated, in field order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self(violations)
    }

    /// The violated constraints.
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Whether any required field was missing entirely.
    pub fn has_missing_field(&self) -> bool {
        self.0
            .iter()
            .any(|v| matches!(v, Violation::MissingField(_)))
    }

    /// Whether the given violation was reported.
    pub fn contains(&self, violation: Violation) -> bool {
        self.0.contains(&violation)
    }

    /// Human-readable message for each violation.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Headline message for the HTTP response.
    pub fn summary(&self) -> String {
        if self.has_missing_field() {
            return MISSING_FIELDS_MESSAGE.to_string();
        }
        self.0
            .first()
            .map(ToString::to_string)
            .unwrap_or_else(|| MISSING_FIELDS_MESSAGE.to_string())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Storage layer failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to connect to store at {url}: {reason}")]
    Connection { url: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] surrealdb::Error),

    #[error("Store write timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store acknowledged the write but returned no record identity")]
    MissingIdentity,
}

/// Errors surfaced by the `/register` endpoint.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Invalid registration: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Fatal errors while bringing the service up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0:#}")]
    Config(#[from] anyhow::Error),

    #[error("Registration store unreachable: {0}")]
    Storage(#[source] StoreError),

    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl IntakeError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            IntakeError::Validation(_) | IntakeError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            IntakeError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            IntakeError::Validation(errors) => ErrorResponse {
                message: errors.summary(),
                errors: errors.messages(),
            },
            IntakeError::MalformedBody(_) => ErrorResponse {
                message: MALFORMED_BODY_MESSAGE.to_string(),
                errors: Vec::new(),
            },
            IntakeError::Store(_) => ErrorResponse {
                message: STORE_FAILURE_MESSAGE.to_string(),
                errors: Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}
