//! Tool Registry
//!
//! Every MCP tool maps to exactly one backend endpoint. The mapping and the
//! shape of each tool's arguments are declared in the static [`TOOLS`] table;
//! arguments are checked against it before any backend call is made.

use super::models::ToolResult;
use crate::ticketing::TicketingClient;
use serde_json::{json, Map, Value};
use std::fmt;
use thiserror::Error;
use tracing::{error, info};

// =============================================================================
// Declarations
// =============================================================================

/// HTTP method used for a tool's backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// JSON type accepted for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
}

impl ParamKind {
    /// JSON Schema type name.
    pub fn schema_type(self) -> &'static str {
        match self {
            Self::String => "string",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
        }
    }
}

/// Where a parameter goes in the backend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Substituted into `{name}` in the path template.
    Path,
    /// Appended to the query string.
    Query,
    /// Field of the JSON request body.
    Body,
}

/// One declared tool parameter.
#[derive(Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub location: ParamLocation,
    pub required: bool,
    pub description: &'static str,
}

/// One tool and the backend endpoint behind it.
#[derive(Debug)]
pub struct ToolSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub method: HttpMethod,
    /// Endpoint relative to the backend root path; may contain `{param}`.
    pub path: &'static str,
    pub params: &'static [ParamSpec],
}

/// All tools exposed by this server.
pub static TOOLS: [ToolSpec; 4] = [
    ToolSpec {
        name: "get_tickets",
        title: "List tickets",
        description: "Get the tickets information, optionally filtered by owner or movie catalog id.",
        method: HttpMethod::Get,
        path: "/tickets",
        params: &[
            ParamSpec {
                name: "owner",
                kind: ParamKind::String,
                location: ParamLocation::Query,
                required: false,
                description: "Only return tickets held by this owner",
            },
            ParamSpec {
                name: "catalog_id",
                kind: ParamKind::String,
                location: ParamLocation::Query,
                required: false,
                description: "Only return tickets for this movie catalog entry",
            },
        ],
    },
    ToolSpec {
        name: "get_ticket_by_id",
        title: "Get ticket",
        description: "Get a single ticket by its identifier.",
        method: HttpMethod::Get,
        path: "/tickets/{ticket_id}",
        params: &[ParamSpec {
            name: "ticket_id",
            kind: ParamKind::String,
            location: ParamLocation::Path,
            required: true,
            description: "Identifier of the ticket",
        }],
    },
    ToolSpec {
        name: "issue_ticket",
        title: "Issue ticket",
        description: "Issue a ticket for a movie catalog entry to the given owner.",
        method: HttpMethod::Post,
        path: "/tickets/issue",
        params: &[
            ParamSpec {
                name: "catalog_id",
                kind: ParamKind::String,
                location: ParamLocation::Body,
                required: true,
                description: "Movie catalog entry to issue a ticket for",
            },
            ParamSpec {
                name: "owner",
                kind: ParamKind::String,
                location: ParamLocation::Body,
                required: true,
                description: "Owner of the new ticket",
            },
        ],
    },
    ToolSpec {
        name: "refund_ticket",
        title: "Refund ticket",
        description: "Refund a previously issued ticket.",
        method: HttpMethod::Post,
        path: "/tickets/refund",
        params: &[ParamSpec {
            name: "ticket_id",
            kind: ParamKind::String,
            location: ParamLocation::Body,
            required: true,
            description: "Identifier of the ticket to refund",
        }],
    },
];

/// Looks up a tool by name.
pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|tool| tool.name == name)
}

// =============================================================================
// Validation
// =============================================================================

/// Why a set of tool arguments was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("arguments must be a JSON object")]
    NotAnObject,

    #[error("missing required parameter `{0}`")]
    Missing(&'static str),

    #[error("parameter `{name}` must be of type {expected}")]
    WrongType {
        name: &'static str,
        expected: &'static str,
    },

    #[error("unknown parameter `{0}`")]
    Unknown(String),

    /// Empty and dot-segment values would be resolved into another endpoint.
    #[error("parameter `{0}` must not be empty, `.` or `..`")]
    InvalidPathSegment(&'static str),
}

/// Backend request derived from validated arguments.
#[derive(Debug, Default, PartialEq)]
pub struct BackendCall {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Map<String, Value>,
}

impl ToolSpec {
    /// JSON Schema of the arguments, as advertised in `tools/list`.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| {
                (
                    p.name.to_string(),
                    json!({ "type": p.kind.schema_type(), "description": p.description }),
                )
            })
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false
        })
    }

    /// Checks `args` against the declared parameters.
    ///
    /// Absent or `null` arguments count as an empty object. An optional
    /// parameter set to `null` is treated as absent and dropped.
    pub fn validate(&self, args: Option<Value>) -> Result<Map<String, Value>, ArgumentError> {
        let mut args = match args {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(ArgumentError::NotAnObject),
        };

        if let Some(unknown) = args
            .keys()
            .find(|key| !self.params.iter().any(|p| p.name == key.as_str()))
        {
            return Err(ArgumentError::Unknown(unknown.clone()));
        }

        args.retain(|_, value| !value.is_null());

        for param in self.params {
            match args.get(param.name) {
                None if param.required => return Err(ArgumentError::Missing(param.name)),
                None => {}
                Some(value) if !param.kind.accepts(value) => {
                    return Err(ArgumentError::WrongType {
                        name: param.name,
                        expected: param.kind.schema_type(),
                    })
                }
                Some(value)
                    if param.location == ParamLocation::Path
                        && matches!(value.as_str(), Some("" | "." | "..")) =>
                {
                    return Err(ArgumentError::InvalidPathSegment(param.name))
                }
                Some(_) => {}
            }
        }

        Ok(args)
    }

    /// Splits validated arguments into path, query string and body.
    pub fn backend_call(&self, args: &Map<String, Value>) -> BackendCall {
        let mut call = BackendCall {
            path: self.path.to_string(),
            ..Default::default()
        };

        for param in self.params {
            let Some(value) = args.get(param.name) else {
                continue;
            };
            match param.location {
                ParamLocation::Path => {
                    let placeholder = format!("{{{}}}", param.name);
                    let encoded = urlencoding::encode(&scalar_to_string(value)).into_owned();
                    call.path = call.path.replace(&placeholder, &encoded);
                }
                ParamLocation::Query => {
                    call.query.push((param.name.to_string(), scalar_to_string(value)));
                }
                ParamLocation::Body => {
                    call.body.insert(param.name.to_string(), value.clone());
                }
            }
        }

        call
    }

    /// Performs the backend call for validated arguments.
    ///
    /// Never fails: backend errors become [`ToolResult::Failure`].
    pub async fn invoke(&self, client: &TicketingClient, args: Map<String, Value>) -> ToolResult {
        let call = self.backend_call(&args);
        info!(tool = self.name, method = %self.method, path = %call.path, "invoking tool");

        let outcome = match self.method {
            HttpMethod::Get => client.get(&call.path, &call.query).await,
            HttpMethod::Post => client.post(&call.path, &Value::Object(call.body)).await,
        };

        match outcome {
            Ok(payload) => ToolResult::Success(payload),
            Err(e) => {
                let status = e.status().map(|s| s.as_u16());
                let message = e.full_message();
                error!(tool = self.name, status = ?status, error = %message, "tool call failed");
                ToolResult::Failure(message)
            }
        }
    }
}

/// Renders a scalar argument for a URL; strings are used verbatim.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
