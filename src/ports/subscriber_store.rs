//! Subscriber Store Port - transactional persistence for subscribers.
//!
//! The store is the only writer of subscriber state. Both mutating
//! operations execute as a single transaction against the backing store,
//! which is where all cross-request safety lives: concurrent submissions
//! and verifications coordinate purely through the store's row locks and
//! uniqueness constraints.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{SubscriberId, Timestamp};
use crate::domain::subscriber::{ConfirmationToken, EmailAddress, SubscriberName};

/// Post-write state returned by [`SubscriberStore::upsert_pending`].
///
/// `Pending` carries the effective token: the candidate if it was freshly
/// inserted or refreshed. A `Confirmed` snapshot never exposes a token.
#[derive(Debug, Clone)]
pub enum SubscriberSnapshot {
    Pending {
        email: EmailAddress,
        full_name: SubscriberName,
        token: ConfirmationToken,
        expires_at: Timestamp,
    },
    Confirmed {
        email: EmailAddress,
        full_name: SubscriberName,
    },
}

impl SubscriberSnapshot {
    /// Returns true if the snapshot shows a confirmed subscriber.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SubscriberSnapshot::Confirmed { .. })
    }
}

/// Public subscriber fields exposed by lookup. Never includes token,
/// expiry, or confirmation status.
#[derive(Debug, Clone)]
pub struct SubscriberRecord {
    pub id: SubscriberId,
    pub email: EmailAddress,
    pub full_name: SubscriberName,
    pub created_at: Timestamp,
}

/// Port for subscriber persistence.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Creates or refreshes a pending subscription in one transaction.
    ///
    /// No row for the email: inserts a new Pending subscriber with the
    /// candidate token and expiry. Existing row: always refreshes the
    /// name; refreshes token and expiry only while the row is still
    /// Pending. A Confirmed row keeps its token fields absent, so a
    /// late-arriving duplicate submission can never revert it.
    async fn upsert_pending(
        &self,
        email: &EmailAddress,
        full_name: &SubscriberName,
        candidate_token: &ConfirmationToken,
        expires_at: Timestamp,
    ) -> Result<SubscriberSnapshot, StoreError>;

    /// Atomically consumes a confirmation token.
    ///
    /// One conditional update matches a row whose token equals the input
    /// and whose expiry is strictly in the future, sets `confirmed_at`
    /// and clears the token fields in the same step. Returns true iff a
    /// row transitioned; wrong, consumed, and expired tokens all yield
    /// false with no state change.
    async fn consume_token(&self, token: &ConfirmationToken) -> Result<bool, StoreError>;

    /// Read-only lookup by normalized email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<SubscriberRecord>, StoreError>;
}

/// Errors from the subscriber store.
///
/// Both variants are infrastructure failures: they are surfaced to the
/// caller as a generic internal error, never swallowed, and never carry
/// raw driver text past the HTTP boundary.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Storage unreachable or the transaction failed; retryable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A uniqueness or state constraint was violated.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

impl StoreError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a constraint violation error.
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::ConstraintViolation(message.into())
    }
}
