//! Change notification delivery
//!
//! [`SmtpNotifier`] sends the formatted change message as a plain-text mail.
//! [`LogNotifier`] is used when mail is disabled and only writes the message
//! to the log.

pub mod smtp;

pub use smtp::SmtpNotifier;

use crate::domain::Result;
use async_trait::async_trait;

/// Delivers a change message to the configured recipient
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `body` as-is
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ShiftWatchError::Delivery`] if the message was
    /// not accepted.
    async fn send(&self, body: &str) -> Result<()>;

    /// Short description of the channel, for logs
    fn channel(&self) -> &'static str;
}

/// Notifier that logs the message instead of sending it
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, body: &str) -> Result<()> {
        tracing::info!(message = %body, "Mail disabled; notification not sent");
        Ok(())
    }

    fn channel(&self) -> &'static str {
        "log"
    }
}
