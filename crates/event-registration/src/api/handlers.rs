//! HTTP request handlers.

use super::types::{HealthResponse, RegisterResponse, REGISTRATION_SUCCESS_MESSAGE};
use super::AppState;
use crate::error::IntakeError;
use crate::registration::validate;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = state.store.health_check().await;

    Json(HealthResponse {
        status: if store_healthy { "ok" } else { "degraded" }.to_string(),
        store: state.store.backend().to_string(),
        store_healthy,
    })
}

/// Validate and persist a team registration.
///
/// Responds only after the store has acknowledged the write, so a storage
/// failure is reported to the caller instead of being lost after a 201.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), IntakeError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Unreadable registration body");
        IntakeError::MalformedBody(rejection.body_text())
    })?;
    debug!(%payload, "Registration request received");

    let registration = validate(&payload).map_err(|errors| {
        warn!(%errors, "Registration rejected");
        errors
    })?;

    let id = state.store.create(registration).await.map_err(|e| {
        error!(error = %e, backend = state.store.backend(), "Failed to save registration");
        e
    })?;
    info!(%id, "Registration saved");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: REGISTRATION_SUCCESS_MESSAGE.to_string(),
            id: id.to_string(),
        }),
    ))
}
