//! API endpoints.

pub mod task;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::state::SharedState;

/// Creates the API router with all endpoints.
pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/tasks", get(task::list_tasks).post(task::create_task))
        .route(
            "/api/tasks/{id}",
            get(task::get_task)
                .put(task::update_task)
                .delete(task::delete_task),
        )
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
