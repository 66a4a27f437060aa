//! Confirmation Mailer Port - outbound confirmation-link delivery.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::RequestId;
use crate::domain::subscriber::{ConfirmationToken, EmailAddress, SubscriberName};

/// Port for delivering a confirmation message carrying a token.
///
/// The implementation builds the verification link embedding the token and
/// the configured validity window. Delivery is fire-and-forget from the
/// workflow's perspective: a failure is reported through the `Result` but
/// must never roll back the already-committed subscription.
#[async_trait]
pub trait ConfirmationMailer: Send + Sync {
    /// Sends the confirmation link for `token` to `to`.
    async fn deliver(
        &self,
        to: &EmailAddress,
        display_name: &SubscriberName,
        token: &ConfirmationToken,
        request_id: RequestId,
    ) -> Result<(), DeliveryError>;
}

/// Errors from the delivery transport.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// The transport could not be reached.
    #[error("mail transport error: {0}")]
    Transport(String),

    /// The mail API rejected the message.
    #[error("mail API rejected the message with status {status}")]
    Rejected { status: u16 },
}

impl DeliveryError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}
