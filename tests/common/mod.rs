//! Shared test fixtures
//!
//! A fake ticketing backend served on an ephemeral port, plus helpers to
//! build the MCP app against it and talk JSON-RPC to it.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::{Path, Query};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use movie_ticketing_mcp::config::{ApiSettings, ServerSettings, Settings};
use movie_ticketing_mcp::router::create_app_router;
use movie_ticketing_mcp::ticketing::AppState;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::util::ServiceExt; // for `oneshot`

/// Delay applied by the fake backend to every single-ticket lookup.
pub const BACKEND_DELAY: Duration = Duration::from_millis(100);

/// Delay of the `slow` ticket, longer than any client timeout used in tests.
pub const SLOW_DELAY: Duration = Duration::from_secs(3);

#[derive(Deserialize)]
struct TicketFilter {
    owner: Option<String>,
    catalog_id: Option<String>,
}

async fn list_tickets(Query(filter): Query<TicketFilter>) -> Json<Value> {
    Json(json!({
        "filter": { "owner": filter.owner, "catalog_id": filter.catalog_id },
        "tickets": [{ "id": "t-1", "catalog_id": "m-1", "owner": "alice" }]
    }))
}

async fn get_ticket(Path(ticket_id): Path<String>) -> impl IntoResponse {
    tokio::time::sleep(BACKEND_DELAY).await;
    if ticket_id == "slow" {
        tokio::time::sleep(SLOW_DELAY).await;
    }
    match ticket_id.as_str() {
        "1" => (StatusCode::OK, Json(json!({ "id": 1, "title": "X" }))),
        "missing" => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Ticket not found" })),
        ),
        "down" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "unavailable" })),
        ),
        id => (
            StatusCode::OK,
            Json(json!({ "id": id, "title": format!("Ticket {}", id) })),
        ),
    }
}

async fn issue_ticket(Json(body): Json<HashMap<String, Value>>) -> Json<Value> {
    Json(json!({
        "id": "t-100",
        "catalog_id": body.get("catalog_id"),
        "owner": body.get("owner"),
        "status": "issued"
    }))
}

async fn refund_ticket(Json(body): Json<HashMap<String, Value>>) -> Json<Value> {
    Json(json!({ "id": body.get("ticket_id"), "status": "refunded" }))
}

async fn openapi() -> Json<Value> {
    Json(json!({ "openapi": "3.1.0", "info": { "title": "Movie Ticketing API" } }))
}

/// Routes of the fake backend, mounted under the default root path.
pub fn backend_router() -> Router {
    Router::new()
        .route("/api/v1/tickets", get(list_tickets))
        .route("/api/v1/tickets/issue", post(issue_ticket))
        .route("/api/v1/tickets/refund", post(refund_ticket))
        .route("/api/v1/tickets/:ticket_id", get(get_ticket))
        .route("/openapi.json", get(openapi))
}

/// Serves the fake backend on an ephemeral port and returns its URL.
pub async fn spawn_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, backend_router()).await.unwrap();
    });
    format!("http://{}", addr)
}

/// URL of a port nothing listens on.
pub fn unreachable_backend() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Settings pointing at `server_url` with the default root path.
pub fn test_settings(server_url: &str) -> Settings {
    test_settings_with_timeout(server_url, 5)
}

pub fn test_settings_with_timeout(server_url: &str, timeout_secs: u64) -> Settings {
    Settings {
        server: ServerSettings {
            name: "movie-ticketing-test".into(),
            host: "127.0.0.1".into(),
            port: 0,
        },
        api: ApiSettings {
            server_url: server_url.into(),
            root_path: "/api/v1".into(),
            openapi_path: "/openapi.json".into(),
            timeout_secs,
        },
    }
}

pub fn test_state(server_url: &str) -> Arc<AppState> {
    Arc::new(AppState::new(&test_settings(server_url)).unwrap())
}

/// Helper function to create a test app instance
pub fn create_test_app(server_url: &str) -> Router {
    create_app_router(test_state(server_url))
}

/// Sends a raw POST /mcp request with a JSON body.
pub async fn post_mcp(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, body)
}

/// Helper function to send a JSON-RPC request and get the response
pub async fn send_jsonrpc_request(
    app: &Router,
    method: &str,
    params: Option<Value>,
    id: i32,
) -> (StatusCode, Value) {
    let request_body = json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": id
    });
    post_mcp(app, request_body).await
}

/// Sends `tools/call` and returns the JSON-RPC response body.
pub async fn call_tool(app: &Router, name: &str, arguments: Value) -> Value {
    let params = json!({ "name": name, "arguments": arguments });
    let (status, body) = send_jsonrpc_request(app, "tools/call", Some(params), 1).await;
    assert_eq!(status, StatusCode::OK);
    body
}
