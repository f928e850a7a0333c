//! # SMS Core
//!
//! Core traits and types for sending SMS through a pluggable provider.
//!
//! This crate provides the fundamental building blocks shared by the rest of
//! the workspace:
//! - [`SmsClient`] trait implemented by every provider backend
//! - [`SendRequest`] / [`SendResponse`] for a single outbound message
//! - [`SmsError`] describing provider failures
//! - [`ApiResponse`] / [`HttpStatus`] so HTTP handling stays framework-neutral
//!
//! ## Example
//!
//! ```rust,ignore
//! use sms_core::{SendRequest, SmsClient};
//!
//! // Any SMS provider implements SmsClient
//! let response = client.send(SendRequest {
//!     to: "+1234567890",
//!     from: "+0987654321",
//!     text: "Hello world!"
//! }).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during SMS operations
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// HTTP communication error
    #[error("http error: {0}")]
    Http(String),
    /// Authentication/authorization error
    #[error("authentication error: {0}")]
    Auth(String),
    /// Invalid request parameters
    #[error("invalid request: {0}")]
    Invalid(String),
    /// SMS provider returned an error
    #[error("provider error: {0}")]
    Provider(String),
    /// Unexpected error occurred
    #[error("unexpected: {0}")]
    Unexpected(String),
}

/// HTTP status code for web responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Ok = 200,
    BadRequest = 400,
    NotFound = 404,
    MethodNotAllowed = 405,
    InternalServerError = 500,
}

impl HttpStatus {
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequest<'a> {
    pub to: &'a str,
    pub from: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    pub id: String,
    /// Name of the backend/provider that produced the response, e.g. "twilio".
    pub provider: &'static str,
    /// Raw provider payload for debugging / audit.
    pub raw: serde_json::Value,
}

/// Generic HTTP response that can be converted to any framework's response type
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: HttpStatus,
    pub body: String,
    pub content_type: String,
}

impl ApiResponse {
    /// Serialize `payload` as the JSON body of a response with the given status.
    pub fn json<T: Serialize>(status: HttpStatus, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self {
                status,
                body,
                content_type: "application/json".to_string(),
            },
            Err(e) => Self::error(
                HttpStatus::InternalServerError,
                &format!("response encoding failed: {}", e),
            ),
        }
    }

    pub fn error(status: HttpStatus, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
            content_type: "application/json".to_string(),
        }
    }
}

#[async_trait]
pub trait SmsClient: Send + Sync {
    /// Send a single text SMS.
    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError>;
}

/// Utility to create a pseudo id if a provider doesn't return one.
pub fn fallback_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_is_valid_json_with_quotes() {
        let response = ApiResponse::error(HttpStatus::BadRequest, r#"bad "to" field"#);
        assert_eq!(response.status.as_u16(), 400);
        assert_eq!(response.content_type, "application/json");

        let parsed: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(parsed["error"], r#"bad "to" field"#);
    }

    #[test]
    fn json_response_carries_payload() {
        let response = ApiResponse::json(
            HttpStatus::Ok,
            &serde_json::json!({ "status": "ok", "service": "svc" }),
        );
        assert_eq!(response.status, HttpStatus::Ok);
        assert!(response.body.contains(r#""service":"svc""#));
    }

    #[test]
    fn fallback_ids_are_unique() {
        assert_ne!(fallback_id(), fallback_id());
    }
}
