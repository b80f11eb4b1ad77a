//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the voice webhook, the health probe and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        Application, ErrorResponse, HealthResponse, Intent, OutputSpeech, Reprompt,
        RequestEnvelope, ResponseBody, ResponseEnvelope, Slot, SystemContext, VoiceContext,
        VoiceRequest, VoiceSession,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::handle_voice_request, handlers::health),
    components(
        schemas(
            RequestEnvelope, VoiceSession, Application, VoiceContext, SystemContext,
            VoiceRequest, Intent, Slot, ResponseEnvelope, ResponseBody, OutputSpeech,
            Reprompt, HealthResponse, ErrorResponse
        )
    ),
    tags(
        (name = "Intent Bridge", description = "Relays voice-platform intents to an NLU agent")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/alexa", post(handlers::handle_voice_request))
        .route("/health", get(handlers::health))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
