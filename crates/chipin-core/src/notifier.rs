//! Outbound email port

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Notifier error
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A single HTML email. The sender address belongs to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// Sends email. Delivery is not confirmed beyond the transport accepting the message.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifierError>;
}
