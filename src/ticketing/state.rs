//! Application State
//!
//! Everything a request handler needs, built once at startup and shared
//! read-only across tasks.

use super::{client::TicketingClient, error::BackendError};
use crate::config::{ServerSettings, Settings};
use std::sync::Arc;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Server identity plus the backend client.
#[derive(Debug)]
pub struct AppState {
    /// Identity reported in the MCP handshake.
    pub server: ServerSettings,

    /// Client for the backend ticketing API.
    pub client: TicketingClient,
}

impl AppState {
    /// Creates the state from fully loaded settings.
    pub fn new(settings: &Settings) -> Result<Self, BackendError> {
        Ok(Self {
            server: settings.server.clone(),
            client: TicketingClient::new(&settings.api)?,
        })
    }
}
