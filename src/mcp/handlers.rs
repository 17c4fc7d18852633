//! MCP (Model Context Protocol) route handlers
//!
//! Streamable HTTP in stateless mode: every JSON-RPC request is a single POST
//! answered with a single JSON body. `handle_tool_call` is public so tests can
//! drive tools without going through HTTP.

use super::{helpers::*, models::*, tools::*};
use crate::ticketing::{AppState, SharedState};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/mcp", post(handle_mcp).get(handle_mcp_get))
        .route("/mcp/", post(handle_mcp).get(handle_mcp_get)) // Trailing slash safety
}

/// Endpoint: GET /mcp
/// Stateless servers never push, so there is no event stream to open.
async fn handle_mcp_get() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        "Method Not Allowed",
    )
}

/// Endpoint: POST /mcp
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, JsonRejection>,
) -> Response {
    // Parse JSON-RPC Request (POST)
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            warn!(error = %e.body_text(), "rejected malformed JSON-RPC request");
            // Valid JSON that is not a single request object is an invalid request
            let (code, message) = match e {
                JsonRejection::JsonSyntaxError(_) => (PARSE_ERROR, "Parse error"),
                _ => (INVALID_REQUEST, "Invalid Request"),
            };
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, code, message)),
            )
                .into_response();
        }
    };

    let method_name = req.method.as_str();

    // Notifications expect no response body
    let Some(id) = req.id else {
        debug!(method = method_name, "MCP notification");
        return StatusCode::ACCEPTED.into_response();
    };

    let params = req.params.unwrap_or(Value::Null);

    debug!(method = method_name, id = %id, "MCP call");

    // Dispatch Method
    let response_body = match method_name {
        "initialize" => rpc_success(id, handle_initialize(&state, &params)),
        "ping" => rpc_success(id, json!({})),
        "tools/list" => rpc_success(id, handle_tools_list()),
        "tools/call" => match serde_json::from_value::<CallToolParams>(params) {
            Ok(call) => match handle_tool_call(&state, &call.name, call.arguments).await {
                Ok(result) => rpc_success(id, result.into_call_result()),
                Err(msg) => rpc_error(id, INVALID_PARAMS, msg),
            },
            Err(e) => rpc_error(id, INVALID_PARAMS, format!("Invalid params: {}", e)),
        },
        "resources/list" => rpc_success(id, handle_resources_list()),
        "resources/read" => match handle_resources_read(&state, params).await {
            Ok(result) => rpc_success(id, result),
            Err((code, msg)) => rpc_error(id, code, msg),
        },
        _ => {
            warn!(method = method_name, "unknown MCP method");
            rpc_error(id, METHOD_NOT_FOUND, "Method not found")
        }
    };

    Json(response_body).into_response()
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
fn handle_initialize(state: &AppState, params: &Value) -> Value {
    let requested = params.get("protocolVersion").and_then(Value::as_str);

    json!({
        "protocolVersion": negotiate_protocol_version(requested),
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "listChanged": false, "subscribe": false }
        },
        "serverInfo": {
            "name": state.server.name,
            "version": env!("CARGO_PKG_VERSION")
        },
        "instructions": SERVER_INSTRUCTIONS
    })
}

/// Handles `tools/list` request.
fn handle_tools_list() -> Value {
    let tools: Vec<Value> = TOOLS
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name,
                "title": tool.title,
                "description": tool.description,
                "inputSchema": tool.input_schema()
            })
        })
        .collect();

    json!({ "tools": tools })
}

/// Handles `resources/list` request.
fn handle_resources_list() -> Value {
    json!({
        "resources": [{
            "name": "Backend OpenAPI document",
            "uri": OPENAPI_RESOURCE_URI,
            "mimeType": OPENAPI_MIME_TYPE
        }]
    })
}

/// Handles `resources/read` request by fetching the document from the backend.
async fn handle_resources_read(state: &AppState, params: Value) -> Result<Value, (i32, String)> {
    let ReadResourceParams { uri } = serde_json::from_value(params)
        .map_err(|e| (INVALID_PARAMS, format!("Invalid params: {}", e)))?;

    if uri != OPENAPI_RESOURCE_URI {
        return Err((INVALID_PARAMS, format!("Unknown resource: {}", uri)));
    }

    let document = state.client.openapi().await.map_err(|e| {
        let message = e.full_message();
        error!(error = %message, "failed to fetch OpenAPI document");
        (INTERNAL_ERROR, message)
    })?;

    Ok(json!({
        "contents": [{
            "uri": OPENAPI_RESOURCE_URI,
            "mimeType": OPENAPI_MIME_TYPE,
            "text": document.to_string()
        }]
    }))
}

/// Handles `tools/call` request.
///
/// `Err` means the call was rejected before reaching the backend (unknown
/// tool or arguments not matching the declaration). Backend failures are
/// reported as `Ok(ToolResult::Failure(..))`.
pub async fn handle_tool_call(
    state: &AppState,
    name: &str,
    args: Option<Value>,
) -> Result<ToolResult, String> {
    let tool = find_tool(name).ok_or_else(|| format!("Unknown tool: {}", name))?;
    let args = tool
        .validate(args)
        .map_err(|e| format!("Invalid arguments: {}", e))?;

    Ok(tool.invoke(&state.client, args).await)
}
