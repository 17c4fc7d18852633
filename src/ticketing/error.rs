//! Backend Error Types
//!
//! Every failure of a backend call ends up in [`BackendError`]; tool handlers
//! turn it into an error result instead of a protocol fault. Display strings
//! never repeat their source, so the whole chain can be joined with `{:#}`.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by [`super::client::TicketingClient`].
#[derive(Debug, Error)]
pub enum BackendError {
    /// The HTTP client itself could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// Connection refused, timeout, DNS failure and similar.
    ///
    /// `source` is stripped of its URL, which is already in `url`.
    #[error("failed to reach backend at {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a 4xx or 5xx status.
    #[error("backend returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// A 2xx response whose body is not valid JSON.
    #[error("backend returned an invalid JSON body")]
    Decode(#[source] serde_json::Error),
}

impl BackendError {
    /// HTTP status of the backend response, when there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// This error followed by every underlying cause, `: `-separated.
    pub fn full_message(self) -> String {
        format!("{:#}", anyhow::Error::new(self))
    }
}
