//! # SMS Dispatch
//!
//! HTTP service that sends a text message to one recipient or fans it out to
//! many, through a pluggable SMS provider, with a cap on concurrent provider
//! calls.
//!
//! ## Features
//!
//! - **Single send**: `POST /send-sms` delivers one message and reports provider errors
//! - **Bulk send**: `POST /send-bulk-sms` dispatches to every recipient concurrently,
//!   at most 10 in flight by default, and returns `sent` / `failed` / `total`
//! - **Provider agnostic**: anything implementing [`SmsClient`](sms_core::SmsClient);
//!   Twilio ships in `sms-twilio`
//! - **Layered configuration**: defaults, `config/` files, `SMSDISPATCH__*` and the
//!   classic `TWILIO_*` / `PORT` variables
//! - **Structured logging** through `tracing`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use smsdispatch::prelude::*;
//! use sms_twilio::TwilioClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TwilioClient::new("ACxxxxxxxx", "auth_token");
//!     let dispatcher = Dispatcher::new(Arc::new(client), "+15550000000", DispatchConfig::default());
//!
//!     let result = dispatcher
//!         .send_bulk(vec!["+15551111111".into(), "+15552222222".into()], "Hello!")
//!         .await;
//!     println!("sent {} of {}", result.sent.len(), result.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! ```rust,ignore
//! use smsdispatch::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! config.validate()?;
//! println!("listening on {}", config.server.listen_addr());
//! ```

pub mod config;
pub mod telemetry;

pub use crate::config::*;

/// Common imports for smsdispatch usage
pub mod prelude {
    pub use crate::config::{
        AppConfig, DispatchSettings, LoggingConfig, SecurityConfig, ServerConfig, TwilioConfig,
    };
    pub use sms_core::*;
    pub use sms_dispatch::{DispatchConfig, DispatchError, DispatchResult, Dispatcher};
    pub use sms_web_axum::{AppState, router, router_with_body_limit};
    pub use sms_web_generic::DispatchProcessor;
}
