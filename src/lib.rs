//! Movie Ticketing MCP Library
//!
//! Exposes a backend movie-ticketing HTTP API as MCP (Model Context Protocol)
//! tools: each tool call is forwarded as one HTTP request and the JSON reply
//! is wrapped into a tool result.

// Configuration
pub mod config;

// Domain modules
pub mod mcp;
pub mod ticketing;

// Infrastructure
pub mod router;
