//! Notifier that writes messages to the log instead of sending them.

use async_trait::async_trait;
use tracing::info;

use chipin_core::notifier::{Notifier, NotifierError, OutboundEmail};

pub struct LogNotifier {
    from: String,
}

impl LogNotifier {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifierError> {
        info!(
            from = %self.from,
            to = ?email.to,
            subject = %email.subject,
            body = %email.html_body,
            "Email not sent (log transport)"
        );
        Ok(())
    }
}
