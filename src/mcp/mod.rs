//! Model Context Protocol (MCP) Module
//!
//! This module contains all MCP protocol implementation, including:
//! - Protocol models (JsonRpcRequest, ToolResult, constants)
//! - RPC helpers (success/error responses, content blocks)
//! - Tool registry (static tool table, argument validation)
//! - MCP handlers (initialize, tools/list, tools/call, etc.)

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod tools;

// Re-export commonly used types and functions
pub use handlers::routes;
pub use models::ToolResult;
