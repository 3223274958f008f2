//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{InMemoryStore, LocalFileStore, StubAnalysisAdapter},
    config::Config,
    error::ApiError,
    web::{app_router, state::AppState, token::TokenIssuer},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let store = Arc::new(InMemoryStore::new());
    let files = Arc::new(LocalFileStore::new(config.upload_dir.clone()));
    let analysis = Arc::new(StubAnalysisAdapter::new());
    let tokens = TokenIssuer::new(&config.token_secret, config.token_ttl_days);

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        store,
        files,
        analysis,
        tokens,
        config: config.clone(),
    });

    // --- 4. Create the Web Router ---
    let app = app_router(app_state)?;

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
