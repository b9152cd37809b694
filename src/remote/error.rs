//! Shared error handling for remote calls.
//!
//! Converts transport failures and non-2xx responses into `OfficeError`
//! values carrying a message fit to show the user.

use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::error::OfficeError;

/// Optional JSON body the service sends with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Pick the message for a failed response: the body's `message` when present
/// and non-blank, otherwise `fallback` or the status reason phrase.
pub fn error_message(status: StatusCode, body: &str, fallback: Option<&str>) -> String {
    let from_body = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());

    if let Some(message) = from_body {
        return message;
    }

    if let Some(fallback) = fallback {
        return fallback.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("HTTP {}", status.as_u16()),
    }
}

/// Turn a non-2xx response into `OfficeError::Server`.
pub async fn server_error(response: Response, fallback: Option<&str>) -> OfficeError {
    let status = response.status();
    // An unreadable body just means no message; the status still reports.
    let body = response.text().await.unwrap_or_default();
    OfficeError::Server {
        status: status.as_u16(),
        message: error_message(status, &body, fallback),
    }
}

/// Check the response status, passing 2xx responses through.
pub async fn check_status(response: Response, fallback: Option<&str>) -> Result<Response, OfficeError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(server_error(response, fallback).await)
    }
}

/// Classify a reqwest error raised while sending or reading a response.
pub fn transport_error(error: reqwest::Error) -> OfficeError {
    if error.is_decode() {
        OfficeError::Decode(error.to_string())
    } else {
        OfficeError::Network(error)
    }
}
