//! Environment-driven configuration tests
//!
//! These mutate process environment variables, so they run serially.

use clap::Parser;
use movie_ticketing_mcp::config::{Settings, DEFAULT_SERVER_NAME};
use serial_test::serial;

const VARS: [&str; 7] = [
    "MCP_NAME",
    "MCP_HOST",
    "MCP_PORT",
    "API_SERVER_URL",
    "API_ROOT_PATH",
    "API_OPENAPI_PATH",
    "API_TIMEOUT_SECS",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

fn parse() -> Result<Settings, clap::Error> {
    Settings::try_parse_from(["movie-ticketing-mcp"])
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let settings = parse().unwrap();

    assert_eq!(settings.server.name, DEFAULT_SERVER_NAME);
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 9100);
    assert_eq!(settings.server.bind_address(), "0.0.0.0:9100");
    assert_eq!(settings.api.base_url(), "http://localhost:9000/api/v1");
    assert_eq!(settings.api.openapi_url(), "http://localhost:9000/openapi.json");
    assert_eq!(settings.api.timeout_secs, 30);
}

#[test]
#[serial]
fn test_mcp_port_override() {
    clear_env();
    std::env::set_var("MCP_PORT", "9200");

    let settings = parse().unwrap();
    clear_env();

    assert_eq!(settings.server.port, 9200);
    assert_eq!(settings.server.bind_address(), "0.0.0.0:9200");
}

#[test]
#[serial]
fn test_api_overrides() {
    clear_env();
    std::env::set_var("API_SERVER_URL", "http://tickets.internal:8080/");
    std::env::set_var("API_ROOT_PATH", "/v2/");
    std::env::set_var("API_OPENAPI_PATH", "docs/openapi.json");

    let settings = parse().unwrap();
    clear_env();

    assert_eq!(settings.api.base_url(), "http://tickets.internal:8080/v2/");
    assert_eq!(
        settings.api.openapi_url(),
        "http://tickets.internal:8080/docs/openapi.json"
    );
}

#[test]
#[serial]
fn test_flag_wins_over_environment() {
    clear_env();
    std::env::set_var("MCP_PORT", "9200");

    let settings = Settings::try_parse_from(["movie-ticketing-mcp", "--port", "9300"]).unwrap();
    clear_env();

    assert_eq!(settings.server.port, 9300);
}

#[test]
#[serial]
fn test_malformed_values_are_rejected() {
    clear_env();

    std::env::set_var("MCP_PORT", "not-a-port");
    let err = parse().unwrap_err();
    assert!(err.to_string().contains("not-a-port"));
    clear_env();

    std::env::set_var("API_SERVER_URL", "localhost:9000");
    assert!(parse().is_err());
    clear_env();
}
