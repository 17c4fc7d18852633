//! Process Configuration
//!
//! Two disjoint groups of settings are read once at startup: the MCP server
//! identity (`MCP_*`) and the backend ticketing API (`API_*`). Every value can
//! also be passed as a long flag, which takes precedence over the environment.

use clap::{Args, Parser};
use url::Url;

/// Default name reported to MCP clients.
pub const DEFAULT_SERVER_NAME: &str = "movie-ticketing-mcp-server";

/// Complete process configuration.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    #[command(flatten)]
    pub server: ServerSettings,

    #[command(flatten)]
    pub api: ApiSettings,
}

impl Settings {
    /// Loads `.env` (if any) into the environment, then parses flags and
    /// environment variables.
    ///
    /// Exits the process with a descriptive message when a value cannot be
    /// coerced to its type.
    pub fn load() -> Self {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::parse()
    }
}

/// Identity and listen address of this MCP server.
#[derive(Debug, Clone, Args)]
pub struct ServerSettings {
    /// Server name reported in the MCP handshake
    #[arg(long, env = "MCP_NAME", default_value = DEFAULT_SERVER_NAME)]
    pub name: String,

    /// Interface to bind
    #[arg(long, env = "MCP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "MCP_PORT", default_value_t = 9100)]
    pub port: u16,
}

impl ServerSettings {
    /// `host:port` string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location of the backend ticketing API.
#[derive(Debug, Clone, Args)]
pub struct ApiSettings {
    /// Backend server URL (scheme, host and port)
    #[arg(long, env = "API_SERVER_URL", default_value = "http://localhost:9000", value_parser = parse_server_url)]
    pub server_url: String,

    /// Prefix prepended to every backend endpoint
    #[arg(long, env = "API_ROOT_PATH", default_value = "/api/v1")]
    pub root_path: String,

    /// Path of the backend's OpenAPI document, relative to the server URL
    #[arg(long, env = "API_OPENAPI_PATH", default_value = "/openapi.json")]
    pub openapi_path: String,

    /// Timeout for a single backend request, in seconds
    #[arg(long, env = "API_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl ApiSettings {
    /// Server URL plus root path; tool endpoints are resolved against it.
    pub fn base_url(&self) -> String {
        join_url(&self.server_url, &self.root_path)
    }

    /// Full URL of the backend's OpenAPI document.
    pub fn openapi_url(&self) -> String {
        join_url(&self.server_url, &self.openapi_path)
    }
}

/// Joins `base` and `path` with exactly one `/` between them.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

fn parse_server_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw).map_err(|e| format!("invalid URL `{raw}`: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(format!("unsupported scheme `{other}`, expected http or https")),
    }
}
