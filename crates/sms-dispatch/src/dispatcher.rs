use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use sms_core::{SendRequest, SendResponse, SmsClient, SmsError};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::result::DispatchResult;

/// Provider calls allowed in flight per bulk dispatch unless configured otherwise.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 10;

/// Tuning knobs for [`Dispatcher`].
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Upper bound on concurrent provider calls within one bulk dispatch.
    /// Zero is treated as one.
    pub max_in_flight: usize,
    /// Deadline for a single provider call. `None` waits indefinitely.
    pub send_timeout: Option<Duration>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            send_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Failure to deliver one message to one recipient.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to send SMS to {to}: {source}")]
    SendFailed {
        to: String,
        #[source]
        source: SmsError,
    },
    #[error("sending SMS to {to} timed out after {after:?}")]
    TimedOut { to: String, after: Duration },
}

impl DispatchError {
    /// Recipient the failed send was addressed to.
    pub fn recipient(&self) -> &str {
        match self {
            Self::SendFailed { to, .. } | Self::TimedOut { to, .. } => to,
        }
    }
}

/// Sends messages from a fixed sender number through an injected provider.
///
/// Cloning is cheap; all clones share the same provider client.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn SmsClient>,
    from: Arc<str>,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn SmsClient>, from: impl Into<String>, config: DispatchConfig) -> Self {
        Self {
            client,
            from: Arc::from(from.into()),
            config,
        }
    }

    /// Sender number used for every outbound message.
    pub fn from_number(&self) -> &str {
        &self.from
    }

    fn max_in_flight(&self) -> usize {
        self.config.max_in_flight.max(1)
    }

    /// Deliver `text` to `to` with exactly one provider call.
    pub async fn send_one(&self, to: &str, text: &str) -> Result<SendResponse, DispatchError> {
        let attempt = self.client.send(SendRequest {
            to,
            from: &self.from,
            text,
        });

        let outcome = match self.config.send_timeout {
            Some(after) => tokio::time::timeout(after, attempt)
                .await
                .map_err(|_| DispatchError::TimedOut {
                    to: to.to_string(),
                    after,
                })?,
            None => attempt.await,
        };

        outcome.map_err(|source| DispatchError::SendFailed {
            to: to.to_string(),
            source,
        })
    }

    /// Send `text` to every recipient and return once all of them have finished.
    ///
    /// Each recipient gets its own task. At most `max_in_flight` of them talk to
    /// the provider at once; the rest wait for a permit. A failure, timeout or
    /// panic in one task is recorded against that recipient only.
    pub async fn send_bulk(&self, recipients: Vec<String>, text: &str) -> DispatchResult {
        let total = recipients.len();
        if total == 0 {
            return DispatchResult::default();
        }
        debug!(
            "dispatching to {} recipients, {} in flight max",
            total,
            self.max_in_flight()
        );

        let gate = Arc::new(Semaphore::new(self.max_in_flight()));
        let outcome = Arc::new(Mutex::new(DispatchResult::with_capacity(total)));
        let text: Arc<str> = Arc::from(text);

        let mut workers = Vec::with_capacity(total);
        for to in recipients {
            let recipient = to.clone();
            let dispatcher = self.clone();
            let gate = Arc::clone(&gate);
            let outcome = Arc::clone(&outcome);
            let text = Arc::clone(&text);

            let handle = tokio::spawn(async move {
                // Only a closed semaphore refuses a permit, and this gate is never closed.
                let Ok(permit) = gate.acquire_owned().await else {
                    lock(&outcome).failed.push(to);
                    return;
                };
                let delivery = dispatcher.send_one(&to, &text).await;
                drop(permit);
                record(&outcome, to, delivery);
            });
            workers.push((recipient, handle));
        }

        for (to, handle) in workers {
            if let Err(e) = handle.await {
                error!("dispatch worker for {} did not finish: {}", to, e);
                lock(&outcome).failed.push(to);
            }
        }

        let result = std::mem::take(&mut *lock(&outcome));
        info!(
            total = result.total,
            sent = result.sent.len(),
            failed = result.failed.len(),
            "bulk dispatch finished"
        );
        result
    }
}

fn record(
    outcome: &Mutex<DispatchResult>,
    to: String,
    delivery: Result<SendResponse, DispatchError>,
) {
    match delivery {
        Ok(response) => {
            info!("SMS sent to {} via {} ({})", to, response.provider, response.id);
            lock(outcome).sent.push(to);
        }
        Err(e) => {
            warn!("error sending SMS to {}: {}", to, e);
            lock(outcome).failed.push(to);
        }
    }
}

fn lock(outcome: &Mutex<DispatchResult>) -> MutexGuard<'_, DispatchResult> {
    outcome.lock().unwrap_or_else(PoisonError::into_inner)
}
