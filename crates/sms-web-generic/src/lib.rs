use serde::{Deserialize, Serialize};
use sms_core::{ApiResponse, HttpStatus};
use sms_dispatch::{DispatchError, DispatchResult, Dispatcher};
use tracing::{debug, error};

/// Service name reported by the health endpoint unless configured otherwise.
pub const DEFAULT_SERVICE_NAME: &str = "twilio-sms-service";

/// Body of `POST /send-sms`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendSmsRequest {
    pub to: String,
    pub message: String,
}

/// Body of `POST /send-bulk-sms`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkSendRequest {
    pub to: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SendSmsResponse {
    pub status: String,
    pub message: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Errors surfaced by request processing, before conversion to a response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    SendFailed(#[from] DispatchError),
}

/// Framework-agnostic processor that handles the send endpoints
#[derive(Clone)]
pub struct DispatchProcessor {
    dispatcher: Dispatcher,
    service_name: String,
}

impl DispatchProcessor {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self::with_service_name(dispatcher, DEFAULT_SERVICE_NAME)
    }

    pub fn with_service_name(dispatcher: Dispatcher, service_name: impl Into<String>) -> Self {
        Self {
            dispatcher,
            service_name: service_name.into(),
        }
    }

    /// Handle a single-recipient send and return a framework-agnostic response
    pub async fn process_send(&self, body: &[u8]) -> ApiResponse {
        match self.process_send_internal(body).await {
            Ok(response) => ApiResponse::json(HttpStatus::Ok, &response),
            Err(e) => self.error_to_response(e),
        }
    }

    /// Handle a bulk send. Per-recipient failures are reported inside a 200 body.
    pub async fn process_bulk_send(&self, body: &[u8]) -> ApiResponse {
        match self.process_bulk_send_internal(body).await {
            Ok(result) => ApiResponse::json(HttpStatus::Ok, &result),
            Err(e) => self.error_to_response(e),
        }
    }

    pub fn health(&self) -> ApiResponse {
        ApiResponse::json(
            HttpStatus::Ok,
            &HealthResponse {
                status: "ok".to_string(),
                service: self.service_name.clone(),
            },
        )
    }

    pub fn method_not_allowed() -> ApiResponse {
        ApiResponse::error(HttpStatus::MethodNotAllowed, "method not allowed")
    }

    async fn process_send_internal(&self, body: &[u8]) -> Result<SendSmsResponse, ApiError> {
        let req: SendSmsRequest = decode(body)?;
        let response = self.dispatcher.send_one(&req.to, &req.message).await?;
        debug!("single send to {} accepted as {}", req.to, response.id);

        Ok(SendSmsResponse {
            status: "success".to_string(),
            message: "SMS sent successfully".to_string(),
            to: req.to,
        })
    }

    async fn process_bulk_send_internal(&self, body: &[u8]) -> Result<DispatchResult, ApiError> {
        let req: BulkSendRequest = decode(body)?;
        Ok(self.dispatcher.send_bulk(req.to, &req.message).await)
    }

    fn error_to_response(&self, error: ApiError) -> ApiResponse {
        match error {
            ApiError::InvalidRequest(_) => {
                debug!("rejecting request: {}", error);
                ApiResponse::error(HttpStatus::BadRequest, &error.to_string())
            }
            ApiError::SendFailed(_) => {
                error!("{}", error);
                ApiResponse::error(HttpStatus::InternalServerError, &error.to_string())
            }
        }
    }
}

fn decode<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

/// Helper trait for framework adapters to convert responses
pub trait ResponseConverter {
    type ResponseType;

    fn from_api_response(response: ApiResponse) -> Self::ResponseType;
}
