use parking_lot::Mutex;

use super::{MailTransport, OutgoingMessage};
use crate::error::TransportError;

/// Keeps every message it is given. Optionally rejects them all instead.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Mutex<Vec<OutgoingMessage>>,
    reject_with: Option<String>,
}

impl MemoryTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that rejects every message with `reason`.
    #[must_use]
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            sent: Mutex::default(),
            reject_with: Some(reason.into()),
        }
    }

    /// Messages accepted so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().clone()
    }
}

impl MailTransport for MemoryTransport {
    fn send(&self, message: &OutgoingMessage) -> Result<(), TransportError> {
        if let Some(reason) = &self.reject_with {
            return Err(TransportError::Rejected(reason.clone()));
        }

        self.sent.lock().push(message.clone());
        Ok(())
    }
}
