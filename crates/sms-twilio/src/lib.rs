//! # Twilio SMS Provider
//!
//! Sends outbound messages through the Twilio Programmable Messaging REST API.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sms_core::{SendRequest, SmsClient};
//! use sms_twilio::TwilioClient;
//!
//! let client = TwilioClient::new("ACxxxxxxxx", "auth_token");
//! let response = client.send(SendRequest {
//!     to: "+1234567890",
//!     from: "+0987654321",
//!     text: "Hello from Twilio!"
//! }).await?;
//! ```

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use sms_core::{SendRequest, SendResponse, SmsClient, SmsError};
use tracing::debug;

const PROVIDER: &str = "twilio";
const API_VERSION: &str = "2010-04-01";

/// Twilio REST client.
#[derive(Clone, Debug)]
pub struct TwilioClient {
    /// Twilio Account SID, also the Basic auth username.
    pub account_sid: String,
    /// Twilio Auth Token (password for Basic auth).
    pub auth_token: String,
    /// API base URL; override for testing/mocking.
    pub base_url: String,
    http: reqwest::Client,
}

impl TwilioClient {
    pub fn new<S: Into<String>>(account_sid: S, auth_token: S) -> Self {
        Self::with_base_url(account_sid, auth_token, "https://api.twilio.com".to_string())
    }

    pub fn with_base_url<S: Into<String>>(account_sid: S, auth_token: S, base_url: String) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/Accounts/{}/Messages.json",
            self.base_url.trim_end_matches('/'),
            API_VERSION,
            self.account_sid
        )
    }
}

/// Form body of the Create Message call.
#[derive(Debug, Serialize)]
struct TwilioSendRequest<'a> {
    #[serde(rename = "To")]
    to: &'a str,
    #[serde(rename = "From")]
    from: &'a str,
    #[serde(rename = "Body")]
    body: &'a str,
}

/// Error document Twilio returns alongside 4xx/5xx statuses.
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<u32>,
    message: Option<String>,
}

fn describe_failure(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<TwilioErrorBody>(body) {
        Ok(TwilioErrorBody {
            code: Some(code),
            message: Some(message),
        }) => format!("HTTP {}: {} (code {})", status, message, code),
        Ok(TwilioErrorBody {
            message: Some(message),
            ..
        }) => format!("HTTP {}: {}", status, message),
        _ => format!("HTTP {}: {}", status, body),
    }
}

#[async_trait]
impl SmsClient for TwilioClient {
    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError> {
        let payload = TwilioSendRequest {
            to: req.to,
            from: req.from,
            body: req.text,
        };
        let res = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&payload)
            .send()
            .await
            .map_err(|e| SmsError::Http(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let detail = describe_failure(status, &body);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SmsError::Auth(detail),
                _ => SmsError::Provider(detail),
            });
        }

        let raw_text = res
            .text()
            .await
            .map_err(|e| SmsError::Http(e.to_string()))?;
        let raw_json: serde_json::Value = serde_json::from_str(&raw_text)
            .unwrap_or_else(|_| serde_json::json!({ "raw": raw_text }));

        let id = raw_json
            .get("sid")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(sms_core::fallback_id);
        debug!("Twilio accepted message {} for {}", id, req.to);

        Ok(SendResponse {
            id,
            provider: PROVIDER,
            raw: raw_json,
        })
    }
}
