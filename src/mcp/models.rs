//! MCP Protocol Models and Constants
//!
//! This module contains all data structures and constants related to the
//! Model Context Protocol (MCP) specification.

use super::helpers::text_content;
use serde::Deserialize;
use serde_json::{json, Value};

// =============================================================================
// MCP Constants
// =============================================================================

/// Protocol versions this server speaks, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];
/// Usage hint returned in the `initialize` result
pub const SERVER_INSTRUCTIONS: &str =
    "This is a server that provides information about movie ticketing.";
/// URI of the backend OpenAPI document resource
pub const OPENAPI_RESOURCE_URI: &str = "openapi://backend";
/// MIME type of the OpenAPI document resource
pub const OPENAPI_MIME_TYPE: &str = "application/json";

// JSON-RPC 2.0 error codes
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    pub params: Option<Value>,

    /// Request identifier; absent for notifications
    pub id: Option<Value>,
}

/// Parameters of a `tools/call` request
#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    /// Name of the tool to invoke
    pub name: String,

    /// Tool arguments, validated against the tool's declared parameters
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Parameters of a `resources/read` request
#[derive(Debug, Deserialize)]
pub struct ReadResourceParams {
    pub uri: String,
}

/// Outcome of one tool invocation.
///
/// Once arguments have been validated a tool call always produces one of
/// these; backend failures are reported to the client inside the result, not
/// as JSON-RPC errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    /// The backend's JSON response, untouched.
    Success(Value),
    /// Description of what went wrong.
    Failure(String),
}

impl ToolResult {
    /// Human-readable text sent as the result's only content block.
    pub fn text(&self) -> String {
        match self {
            Self::Success(payload) => payload.to_string(),
            Self::Failure(message) => format!("Error: {message}"),
        }
    }

    /// Structured payload, present only on success.
    pub fn structured_payload(&self) -> Option<&Value> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure(_) => None,
        }
    }

    /// Serializes into an MCP `CallToolResult`.
    pub fn into_call_result(self) -> Value {
        let text = self.text();
        match self {
            Self::Success(payload) => json!({
                "content": [text_content(text)],
                "structuredContent": payload,
                "isError": false
            }),
            Self::Failure(_) => json!({
                "content": [text_content(text)],
                "isError": true
            }),
        }
    }
}
