//! Task API endpoints.
//!
//! Bodies are validated here, before the store is called, so the store only
//! ever sees trimmed, non-empty titles.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use entities::{Task, TaskId, TaskUpdate};
use serde_json::{Map, Value, json};

use crate::error::{ServerError, ServerResult};
use crate::state::SharedState;

/// Parses a request body as a JSON object. `null` counts as an empty object.
fn parse_object(body: &[u8]) -> ServerResult<Map<String, Value>> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Map::new()),
        _ => Err(ServerError::invalid("Invalid JSON body")),
    }
}

/// Parses a path segment as a task id. Only plain decimal digits name a task.
fn parse_task_id(raw: &str) -> ServerResult<TaskId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ServerError::task_not_found());
    }
    raw.parse().map_err(|_| ServerError::task_not_found())
}

/// Body of `POST /api/tasks`.
#[derive(Debug, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub title: String,
}

impl CreateTaskRequest {
    /// Validates a raw request body.
    pub fn from_body(body: &[u8]) -> ServerResult<Self> {
        let data = parse_object(body)?;

        let title = match data.get("title") {
            None | Some(Value::Null) => "",
            Some(Value::String(title)) => title.trim(),
            Some(_) => return Err(ServerError::invalid("'title' must be string")),
        };
        if title.is_empty() {
            return Err(ServerError::invalid("'title' is required"));
        }

        Ok(Self {
            title: title.to_string(),
        })
    }
}

/// Validates a raw `PUT /api/tasks/{id}` body into an update.
///
/// Absent and `null` fields are left untouched.
pub fn parse_update(body: &[u8]) -> ServerResult<TaskUpdate> {
    let data = parse_object(body)?;
    let mut update = TaskUpdate::new();

    match data.get("done") {
        None | Some(Value::Null) => {}
        Some(Value::Bool(done)) => update.done = Some(*done),
        Some(_) => return Err(ServerError::invalid("'done' must be boolean")),
    }

    match data.get("title") {
        None | Some(Value::Null) => {}
        Some(Value::String(title)) => {
            let title = title.trim();
            if title.is_empty() {
                return Err(ServerError::invalid("'title' cannot be empty"));
            }
            update.title = Some(title.to_string());
        }
        Some(_) => return Err(ServerError::invalid("'title' must be string")),
    }

    Ok(update)
}

/// Lists all tasks.
pub async fn list_tasks(State(state): State<SharedState>) -> ServerResult<Json<Vec<Task>>> {
    let tasks = state.store.list_tasks().await?;
    Ok(Json(tasks))
}

/// Gets a task by ID.
pub async fn get_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Task>> {
    let id = parse_task_id(&id)?;

    let task = state
        .store
        .get_task(id)
        .await?
        .ok_or_else(ServerError::task_not_found)?;

    Ok(Json(task))
}

/// Creates a new task.
pub async fn create_task(
    State(state): State<SharedState>,
    body: Bytes,
) -> ServerResult<(StatusCode, Json<Task>)> {
    let request = CreateTaskRequest::from_body(&body)?;

    let task = state.store.create_task(&request.title).await?;

    tracing::info!(task_id = task.id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// Updates a task's title and/or done flag.
pub async fn update_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ServerResult<Json<Task>> {
    let id = parse_task_id(&id)?;
    let update = parse_update(&body)?;
    let changed = !update.is_empty();

    let task = state
        .store
        .update_task(id, update)
        .await?
        .ok_or_else(ServerError::task_not_found)?;

    if changed {
        tracing::info!(task_id = task.id, done = task.done, "Task updated");
    }

    Ok(Json(task))
}

/// Deletes a task.
pub async fn delete_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    let id = parse_task_id(&id)?;

    if !state.store.delete_task(id).await? {
        return Err(ServerError::task_not_found());
    }

    tracing::info!(task_id = id, "Task deleted");

    Ok(Json(json!({ "status": "deleted" })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Method, Request, header},
    };
    use task_store::MemoryTaskStore;
    use tower::ServiceExt;

    use super::*;
    use crate::{config::Config, create_app, create_state};

    fn app() -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        create_app(create_state(config, Arc::new(MemoryTaskStore::new())))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/tasks", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let app = app();

        let (status, body) =
            send(&app, Method::POST, "/api/tasks", Some(r#"{"title": "Test"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"id": 1, "title": "Test", "done": false}));

        let (status, body) = send(&app, Method::GET, "/api/tasks/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "title": "Test", "done": false}));
    }

    #[tokio::test]
    async fn test_create_trims_title() {
        let app = app();

        let (status, body) =
            send(&app, Method::POST, "/api/tasks", Some(r#"{"title": "  Padded  "}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["title"], "Padded");
    }

    #[tokio::test]
    async fn test_list_is_ordered() {
        let app = app();
        for title in ["first", "second", "third"] {
            let body = json!({ "title": title }).to_string();
            send(&app, Method::POST, "/api/tasks", Some(body.as_str())).await;
        }

        let (status, body) = send(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_toggle_and_title() {
        let app = app();
        send(&app, Method::POST, "/api/tasks", Some(r#"{"title": "A"}"#)).await;

        let (status, body) =
            send(&app, Method::PUT, "/api/tasks/1", Some(r#"{"done": true}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "title": "A", "done": true}));

        let (status, body) =
            send(&app, Method::PUT, "/api/tasks/1", Some(r#"{"title": "B"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "title": "B", "done": true}));
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_state() {
        let app = app();
        send(&app, Method::POST, "/api/tasks", Some(r#"{"title": "Keep"}"#)).await;

        let (status, body) = send(&app, Method::PUT, "/api/tasks/1", Some("{}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "title": "Keep", "done": false}));
    }

    #[tokio::test]
    async fn test_delete_and_missing() {
        let app = app();
        send(&app, Method::POST, "/api/tasks", Some(r#"{"title": "To del"}"#)).await;

        let (status, body) = send(&app, Method::DELETE, "/api/tasks/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "deleted"}));

        let (status, body) = send(&app, Method::GET, "/api/tasks/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");

        let (status, _) = send(&app, Method::DELETE, "/api/tasks/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_missing_task() {
        let app = app();

        let (status, body) =
            send(&app, Method::PUT, "/api/tasks/9", Some(r#"{"done": true}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/api/tasks/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");
    }

    #[tokio::test]
    async fn test_signed_ids_are_not_found() {
        let app = app();
        send(&app, Method::POST, "/api/tasks", Some(r#"{"title": "A"}"#)).await;

        for uri in ["/api/tasks/+1", "/api/tasks/-1", "/api/tasks/%2B1"] {
            let (status, body) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "uri: {uri}");
            assert_eq!(body["error"], "Task not found");
        }

        let (status, _) =
            send(&app, Method::PUT, "/api/tasks/+1", Some(r#"{"done": true}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::DELETE, "/api/tasks/+1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::GET, "/api/tasks/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["done"], false);
    }

    #[test]
    fn test_task_id_parsing() {
        assert_eq!(parse_task_id("42").unwrap(), 42);
        assert_eq!(parse_task_id("007").unwrap(), 7);
        for raw in ["", "+1", "-1", " 1", "1.0", "99999999999999999999"] {
            assert!(parse_task_id(raw).is_err(), "raw: {raw:?}");
        }
    }

    #[tokio::test]
    async fn test_create_rejects_blank_titles() {
        let app = app();

        for body in [r#"{"title": ""}"#, r#"{"title": "   "}"#, "{}", "null"] {
            let (status, json) = send(&app, Method::POST, "/api/tasks", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json["error"], "'title' is required");
        }

        let (_, body) = send(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let app = app();

        for body in ["not json", "[1, 2]", ""] {
            let (status, json) = send(&app, Method::POST, "/api/tasks", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body:?}");
            assert_eq!(json["error"], "Invalid JSON body");
        }

        send(&app, Method::POST, "/api/tasks", Some(r#"{"title": "A"}"#)).await;
        let (status, json) = send(&app, Method::PUT, "/api/tasks/1", Some("{oops")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid JSON body");
    }

    #[tokio::test]
    async fn test_update_rejects_wrong_types() {
        let app = app();
        send(&app, Method::POST, "/api/tasks", Some(r#"{"title": "A"}"#)).await;

        let cases = [
            (r#"{"done": "yes"}"#, "'done' must be boolean"),
            (r#"{"title": 5}"#, "'title' must be string"),
            (r#"{"title": "  "}"#, "'title' cannot be empty"),
        ];
        for (body, reason) in cases {
            let (status, json) = send(&app, Method::PUT, "/api/tasks/1", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json["error"], reason);
        }

        let (_, body) = send(&app, Method::GET, "/api/tasks/1", None).await;
        assert_eq!(body, json!({"id": 1, "title": "A", "done": false}));
    }

    #[test]
    fn test_create_request_validation() {
        assert_eq!(
            CreateTaskRequest::from_body(br#"{"title": " Write "}"#).unwrap(),
            CreateTaskRequest {
                title: "Write".to_string()
            }
        );
        assert!(matches!(
            CreateTaskRequest::from_body(br#"{"title": ["x"]}"#),
            Err(ServerError::InvalidRequest(reason)) if reason == "'title' must be string"
        ));
    }

    #[test]
    fn test_update_parsing() {
        assert_eq!(parse_update(b"{}").unwrap(), TaskUpdate::new());
        assert_eq!(parse_update(b"null").unwrap(), TaskUpdate::new());
        assert_eq!(
            parse_update(br#"{"title": null, "done": false}"#).unwrap(),
            TaskUpdate::new().with_done(false)
        );
        assert_eq!(
            parse_update(br#"{"title": " B ", "done": true}"#).unwrap(),
            TaskUpdate::new().with_title("B").with_done(true)
        );
    }
}
