//! Notifier adapters.
//!
//! `smtp` delivers through a relay, `log` writes the message to the tracing
//! output instead of sending it, and the outbox keeps messages in memory.

mod log;
mod outbox;
mod smtp;

pub use log::LogNotifier;
pub use outbox::OutboxNotifier;
pub use smtp::SmtpNotifier;

use std::sync::Arc;

use chipin_core::notifier::{Notifier, NotifierError};
use chipin_shared::config::{MailSettings, MailTransport};

/// Create the configured notifier
pub fn create_notifier(settings: &MailSettings) -> Result<Arc<dyn Notifier>, NotifierError> {
    let from = format!("{} <{}>", settings.from_name, settings.from_address);

    match settings.transport {
        MailTransport::Smtp => {
            let smtp = &settings.smtp;
            let notifier = SmtpNotifier::new(
                smtp.host.clone(),
                smtp.port,
                smtp.username.clone(),
                smtp.password.clone(),
                smtp.use_tls,
                &from,
            )?;
            Ok(Arc::new(notifier))
        }
        MailTransport::Log => Ok(Arc::new(LogNotifier::new(from))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipin_shared::config::SmtpSettings;

    fn settings(transport: MailTransport, from_address: &str) -> MailSettings {
        MailSettings {
            transport,
            from_address: from_address.to_string(),
            from_name: "ChipIn".to_string(),
            smtp: SmtpSettings {
                host: "localhost".to_string(),
                port: 25,
                username: None,
                password: None,
                use_tls: false,
            },
        }
    }

    #[test]
    fn test_create_log_notifier() {
        assert!(create_notifier(&settings(MailTransport::Log, "noreply@chipin.test")).is_ok());
    }

    #[test]
    fn test_create_smtp_notifier() {
        assert!(create_notifier(&settings(MailTransport::Smtp, "noreply@chipin.test")).is_ok());
    }

    #[test]
    fn test_smtp_rejects_bad_sender() {
        let result = create_notifier(&settings(MailTransport::Smtp, "not an address"));
        assert!(matches!(result, Err(NotifierError::InvalidConfig(_))));
    }
}
