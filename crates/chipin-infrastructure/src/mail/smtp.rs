//! SMTP notifier implementation.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use chipin_core::notifier::{Notifier, NotifierError, OutboundEmail};

/// SMTP notifier.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Create a new SMTP notifier. `from` is a mailbox such as `ChipIn <noreply@example.com>`.
    pub fn new(
        host: String,
        port: u16,
        username: Option<String>,
        password: Option<String>,
        use_tls: bool,
        from: &str,
    ) -> Result<Self, NotifierError> {
        let from: Mailbox = from
            .parse()
            .map_err(|e| NotifierError::InvalidConfig(format!("Invalid from address: {}", e)))?;

        let mut builder = if use_tls {
            let tls_params = TlsParameters::new(host.clone()).map_err(|e| {
                NotifierError::InvalidConfig(format!("TLS configuration error: {}", e))
            })?;

            // Port 465 uses implicit TLS (SMTPS), other ports use STARTTLS
            if port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
                    .map_err(|e| NotifierError::InvalidConfig(format!("SMTP relay error: {}", e)))?
                    .port(port)
                    .tls(Tls::Wrapper(tls_params))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
                    .map_err(|e| NotifierError::InvalidConfig(format!("SMTP relay error: {}", e)))?
                    .port(port)
                    .tls(Tls::Required(tls_params))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&host).port(port)
        };

        if let (Some(user), Some(pass)) = (username, password) {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message, NotifierError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML);

        for recipient in &email.to {
            let mailbox: Mailbox = recipient
                .parse()
                .map_err(|e| NotifierError::InvalidAddress(format!("{}: {}", recipient, e)))?;
            builder = builder.to(mailbox);
        }

        builder
            .body(email.html_body.clone())
            .map_err(|e| NotifierError::SendFailed(format!("Failed to build email: {}", e)))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifierError> {
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifierError::SendFailed(e.to_string()))?;

        debug!("SMTP accepted message \"{}\"", email.subject);
        Ok(())
    }
}
