//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::HeaderMap,
    response::{Html, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::HalftoneService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service: Arc<HalftoneService>,
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    Ok(app_state_from_config(config))
}

/// Application state around an already loaded configuration.
pub fn app_state_from_config(config: Arc<AppConfig>) -> AppState {
    let service = Arc::new(HalftoneService::new(config.clone()));
    AppState { config, service }
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(handle_index))
        .route("/api/process", post(handle_process))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(body_limit))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract the config/service from the shared state

async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    api::handle_index(State(state.config)).await
}

async fn handle_process(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    api::handle_process(State(state.service), headers, multipart).await
}
