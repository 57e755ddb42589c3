//! API utilities for frontend-backend communication
//!
//! Builds endpoint URLs and turns raw HTTP replies into typed results.

use contracts::shared::error_body::ErrorBody;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with an `error` field.
    #[error("{0}")]
    Server(String),
    /// Network failure, non-2xx status without an error body, or a malformed reply.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    /// Message for the user: server message, else transport message, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        let message = match self {
            ApiError::Server(m) | ApiError::Transport(m) => m.trim(),
        };
        if message.is_empty() {
            fallback.to_string()
        } else {
            message.to_string()
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// Build a full URL from an endpoint path.
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::api_url;
/// assert_eq!(api_url("http://127.0.0.1:5000/", "/chat"), "http://127.0.0.1:5000/chat");
/// assert_eq!(api_url("", "/"), "/");
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Decode a reply body.
///
/// A non-empty `error` field wins regardless of status; otherwise a non-2xx status
/// is a transport failure and a 2xx body must parse as `T`.
pub fn decode_reply<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if let Ok(envelope) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = envelope.message() {
            return Err(ApiError::Server(message.to_string()));
        }
    }

    if !(200..300).contains(&status) {
        return Err(ApiError::Transport(format!(
            "Request failed with status code {}",
            status
        )));
    }

    serde_json::from_str::<T>(body)
        .map_err(|e| ApiError::Transport(format!("Malformed response: {}", e)))
}
