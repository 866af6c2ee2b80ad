//! Notifier that keeps every message in memory.

use async_trait::async_trait;
use tokio::sync::Mutex;

use chipin_core::notifier::{Notifier, NotifierError, OutboundEmail};

#[derive(Default)]
pub struct OutboxNotifier {
    sent: Mutex<Vec<OutboundEmail>>,
    failure: Option<String>,
}

impl OutboxNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(reason.into()),
        }
    }

    pub async fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifierError> {
        if let Some(reason) = &self.failure {
            return Err(NotifierError::SendFailed(reason.clone()));
        }
        self.sent.lock().await.push(email.clone());
        Ok(())
    }
}
