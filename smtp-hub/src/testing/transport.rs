//! Recording mail transport

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::email::{MailTransport, SendRequest};
use crate::error::Result;

/// Mail transport that captures requests instead of delivering them
///
/// The envelope is still validated, so malformed addresses fail the same way
/// they would against a real server.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<SendRequest>>>,
}

impl RecordingTransport {
    /// Create a transport with nothing recorded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accepted requests
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Every accepted request, oldest first
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn sent(&self) -> Vec<SendRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// Most recent accepted request
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn last_sent(&self) -> Option<SendRequest> {
        self.sent.lock().unwrap().last().cloned()
    }

    /// Whether any request listed `address` as a recipient
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn was_sent_to(&self, address: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .any(|request| request.to.iter().any(|to| to == address))
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, request: SendRequest) -> Result<()> {
        request.envelope()?;
        self.sent.lock().unwrap().push(request);
        Ok(())
    }
}
