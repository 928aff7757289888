//! Outbound notification collaborator traits.
//!
//! The invite worker dispatches rendered messages through these seams;
//! concrete providers (SendGrid, WhatsApp Cloud API, log-only) live in
//! the worker crate.

use async_trait::async_trait;

use crate::result::AppResult;

/// Sends a rendered HTML email to a single recipient.
#[async_trait]
pub trait EmailSender: Send + Sync + std::fmt::Debug {
    /// Deliver an email. Success means the provider accepted the message,
    /// not that it reached the inbox.
    async fn send_email(&self, to: &str, subject: &str, html: &str) -> AppResult<()>;
}

/// Sends a plain-text WhatsApp message to a phone number.
#[async_trait]
pub trait WhatsAppSender: Send + Sync + std::fmt::Debug {
    /// Deliver a WhatsApp text message.
    async fn send_message(&self, phone: &str, message: &str) -> AppResult<()>;
}
