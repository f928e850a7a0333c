use serde::{Deserialize, Serialize};

/// Aggregated outcome of a bulk dispatch.
///
/// Recipients appear in completion order, which is not the order they were
/// submitted in. Duplicates in the request are counted once per occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    /// Recipients the provider accepted.
    pub sent: Vec<String>,
    /// Recipients whose send failed, timed out or whose worker crashed.
    pub failed: Vec<String>,
    /// Number of recipients in the request.
    pub total: usize,
}

impl DispatchResult {
    pub(crate) fn with_capacity(total: usize) -> Self {
        Self {
            sent: Vec::with_capacity(total),
            failed: Vec::new(),
            total,
        }
    }

    /// Every recipient has been accounted for as either sent or failed.
    pub fn is_complete(&self) -> bool {
        self.sent.len() + self.failed.len() == self.total
    }
}
