//! Error types for the request client.
//!
//! Callers need to tell "the server said no" apart from "we never
//! reached the server", so those are distinct variants. Server error
//! payloads pass through verbatim, never wrapped or translated.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    /// The backend answered with a non-2xx status. `body` is the
    /// server's error payload exactly as received. Status 401 lands
    /// here too, after the login-redirect side effect has fired.
    #[error("server returned {status}")]
    Server { status: StatusCode, body: Value },

    /// No response was received: DNS failure, refused connection,
    /// timeout, dropped mid-body.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The request body could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl RequestError {
    /// True for the 401 case that triggers the login redirect.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            RequestError::Server { status, .. } if *status == StatusCode::UNAUTHORIZED
        )
    }

    /// The server's error payload, if a response was received.
    pub fn body(&self) -> Option<&Value> {
        match self {
            RequestError::Server { body, .. } => Some(body),
            _ => None,
        }
    }
}
