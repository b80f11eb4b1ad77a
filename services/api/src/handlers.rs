//! Axum Handlers for the Voice Webhook
//!
//! This module contains the logic for handling voice-platform requests and the
//! health probe. It uses `utoipa` doc comments to generate OpenAPI documentation.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    models::{ErrorResponse, HealthResponse, RequestEnvelope, ResponseEnvelope},
    state::AppState,
};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::Forbidden(message) => {
                (StatusCode::FORBIDDEN, Json(ErrorResponse { message })).into_response()
            }
        }
    }
}

/// Handle one voice-platform request and answer with speech.
///
/// NLU failures are not HTTP errors: they come back as a session-ending
/// response whose speech is the error text.
#[utoipa::path(
    post,
    path = "/alexa",
    request_body = RequestEnvelope,
    responses(
        (status = 200, description = "Speech to play back", body = ResponseEnvelope),
        (status = 400, description = "Request without application id or session", body = ErrorResponse),
        (status = 403, description = "Request for a different application", body = ErrorResponse)
    )
)]
pub async fn handle_voice_request(
    State(state): State<Arc<AppState>>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let application_id = envelope
        .application_id()
        .ok_or_else(|| ApiError::BadRequest("Request carries no application id".to_string()))?;
    if application_id != state.config.alexa_app_id {
        warn!(%application_id, "Rejected request for unknown application");
        return Err(ApiError::Forbidden(format!(
            "Invalid application id '{}'",
            application_id
        )));
    }

    let session_id = envelope
        .session_id()
        .ok_or_else(|| ApiError::BadRequest("Request carries no session".to_string()))?;

    let intent = envelope.voice_intent();
    info!(
        request_type = %envelope.request.request_type,
        request_id = %envelope.request.request_id,
        ?intent,
        "Voice request received"
    );

    let response = state
        .bridge
        .handle(session_id, intent, envelope.request.locale.as_deref())
        .await;
    Ok(Json(ResponseEnvelope::from(response)))
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        nlu_provider: state.config.nlu_provider.as_str().to_string(),
    })
}
