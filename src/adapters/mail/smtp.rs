//! SMTP notifier
//!
//! Messages carry no subject line; short bodies read better on SMS gateways
//! without one.

use super::Notifier;
use crate::config::{MailConfig, SmtpSecurity};
use crate::domain::{Result, ShiftWatchError};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

/// Sends notifications through an SMTP relay
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl SmtpNotifier {
    /// Build a notifier from configuration
    ///
    /// No connection is made until the first send.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an address does not parse or the
    /// relay host is rejected.
    pub fn new(config: &MailConfig) -> Result<Self> {
        let sender = parse_mailbox("mail.sender", &config.sender)?;
        let recipient = parse_mailbox("mail.recipient", &config.recipient)?;

        let builder = match config.security {
            SmtpSecurity::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            }
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host),
            SmtpSecurity::None => {
                tracing::warn!("SMTP connection is not encrypted");
                Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(
                    &config.smtp_host,
                ))
            }
        }
        .map_err(|e| {
            ShiftWatchError::Configuration(format!(
                "Invalid SMTP relay '{}': {e}",
                config.smtp_host
            ))
        })?;

        let mut builder = builder.port(config.smtp_port);
        if let Some(password) = &config.password {
            builder = builder.credentials(Credentials::new(
                config.login().to_string(),
                password.expose_secret().to_string(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            sender,
            recipient,
        })
    }
}

/// Builds the plain-text, subject-less notification message
pub fn build_message(sender: &Mailbox, recipient: &Mailbox, body: &str) -> Result<Message> {
    Message::builder()
        .from(sender.clone())
        .to(recipient.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|e| ShiftWatchError::Delivery(format!("Failed to build message: {e}")))
}

fn parse_mailbox(field: &str, value: &str) -> Result<Mailbox> {
    value.parse::<Mailbox>().map_err(|e| {
        ShiftWatchError::Configuration(format!("{field} is not a valid address '{value}': {e}"))
    })
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, body: &str) -> Result<()> {
        let message = build_message(&self.sender, &self.recipient, body)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| ShiftWatchError::Delivery(e.to_string()))?;

        tracing::info!(recipient = %self.recipient, "Notification sent");
        Ok(())
    }

    fn channel(&self) -> &'static str {
        "smtp"
    }
}
