//! API request and response types.

use serde::Serialize;

/// Response message for an accepted registration.
pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Registration successful!";

/// Response after a registration has been written.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    /// Identity assigned by the store
    pub id: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
    pub store_healthy: bool,
}
