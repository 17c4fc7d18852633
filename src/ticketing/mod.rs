//! Backend Ticketing API Module
//!
//! This module contains everything that talks to the backend:
//! - HTTP client adapter (GET/POST/OpenAPI)
//! - Error taxonomy for backend calls
//! - Response helpers
//! - Application state shared by handlers

pub mod client;
pub mod error;
pub mod helpers;
pub mod state;

// Re-export commonly used types for convenience
pub use client::TicketingClient;
pub use error::BackendError;
pub use state::{AppState, SharedState};
