//! Main Entrypoint for the Intent Bridge API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Initializing logging.
//! 3. Building the NLU client and the intent bridge.
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use intent_bridge_api::{
    config::{Config, NluProvider},
    router::create_router,
    state::AppState,
};
use intent_bridge_core::{
    bridge::IntentBridge,
    nlu_client::{DialogflowClient, NluClient, ScriptedNluClient},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Initialize the NLU Client ---
    let nlu_client: Arc<dyn NluClient> = match &config.nlu_provider {
        NluProvider::Dialogflow => {
            info!(api_base = %config.nlu_api_base, "Using Dialogflow provider.");
            Arc::new(DialogflowClient::new(
                config.nlu_api_base.clone(),
                config.nlu_access_token.clone(),
                config.language_code.clone(),
            ))
        }
        NluProvider::Mock => {
            info!("Using scripted mock provider.");
            Arc::new(ScriptedNluClient)
        }
    };

    let bridge = Arc::new(IntentBridge::new(
        nlu_client,
        config.nlu_project_id.clone(),
        config.language_code.clone(),
    ));

    let app_state = Arc::new(AppState {
        bridge,
        config: Arc::new(config.clone()),
    });

    // --- 4. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 5. Start Server ---
    info!(
        provider = %config.nlu_provider.as_str(),
        project = %config.nlu_project_id,
        language = %config.language_code,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .context("Failed to bind listener")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
