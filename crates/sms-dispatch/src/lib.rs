//! # SMS Dispatch
//!
//! Sends one message to one recipient, or fans a message out to many
//! recipients while capping how many provider calls are in flight.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sms_dispatch::{DispatchConfig, Dispatcher};
//!
//! let dispatcher = Dispatcher::new(Arc::new(client), "+15550000000", DispatchConfig::default());
//! let result = dispatcher
//!     .send_bulk(vec!["+15551111111".into(), "+15552222222".into()], "Hello!")
//!     .await;
//! assert_eq!(result.sent.len() + result.failed.len(), result.total);
//! ```

pub mod dispatcher;
pub mod result;

pub use dispatcher::{DEFAULT_MAX_IN_FLIGHT, DispatchConfig, DispatchError, Dispatcher};
pub use result::DispatchResult;
