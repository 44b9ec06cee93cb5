//! Task tracker API server
//!
//! Serves CRUD endpoints for tasks over HTTP with JSON bodies. The storage
//! backend is chosen once at startup and handed to the router through
//! [`AppState`].

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use task_store::TaskStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::state::{AppState, SharedState};

/// Creates the application router with all routes configured.
pub fn create_app(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state with the given configuration and store.
pub fn create_state(config: Config, store: Arc<dyn TaskStore>) -> SharedState {
    Arc::new(AppState::new(config, store))
}

/// Builds a CORS layer that only admits the configured origins.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
