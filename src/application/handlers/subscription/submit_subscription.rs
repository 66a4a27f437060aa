//! SubmitSubscriptionHandler - Command handler for signup submissions.

use std::sync::Arc;

use crate::config::ConfirmationConfig;
use crate::domain::foundation::{DomainError, ErrorCode, RequestId, Timestamp};
use crate::domain::subscriber::{ConfirmationToken, EmailAddress, SubscriberName};
use crate::ports::{ConfirmationMailer, SubscriberSnapshot, SubscriberStore};

/// Command to create or refresh a subscription.
///
/// `company` is a honeypot: the public form hides it, so a populated value
/// signals automated submission.
#[derive(Debug, Clone)]
pub struct SubmitSubscriptionCommand {
    pub full_name: String,
    pub email: String,
    pub company: Option<String>,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The address was confirmed earlier; no mail is sent and no token
    /// fields are touched.
    AlreadyConfirmed {
        email: EmailAddress,
        full_name: SubscriberName,
    },
    /// The subscription is pending and a confirmation link is on its way.
    PendingConfirmation {
        email: EmailAddress,
        full_name: SubscriberName,
        expires_in_hours: i64,
    },
}

/// Handler for signup submissions.
pub struct SubmitSubscriptionHandler {
    store: Arc<dyn SubscriberStore>,
    mailer: Arc<dyn ConfirmationMailer>,
    confirmation: ConfirmationConfig,
}

impl SubmitSubscriptionHandler {
    pub fn new(
        store: Arc<dyn SubscriberStore>,
        mailer: Arc<dyn ConfirmationMailer>,
        confirmation: ConfirmationConfig,
    ) -> Self {
        Self {
            store,
            mailer,
            confirmation,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitSubscriptionCommand,
        request_id: RequestId,
    ) -> Result<SubmitOutcome, DomainError> {
        // 1. Validate and normalize input
        let email = EmailAddress::parse(&cmd.email)
            .map_err(|e| DomainError::new(ErrorCode::InvalidEmail, e.to_string()))?;
        let full_name = SubscriberName::parse(&cmd.full_name)
            .map_err(|e| DomainError::new(ErrorCode::InvalidName, e.to_string()))?;

        // 2. Honeypot tripped: answer exactly like a real pending signup but
        // persist nothing and send nothing, so bots learn nothing.
        if cmd.company.as_deref().is_some_and(|c| !c.trim().is_empty()) {
            tracing::info!(%request_id, "honeypot field populated, dropping submission");
            return Ok(SubmitOutcome::PendingConfirmation {
                email,
                full_name,
                expires_in_hours: self.confirmation.ttl_hours(),
            });
        }

        // 3. Issue a candidate token and expiry
        let candidate_token = ConfirmationToken::generate();
        let expires_at = Timestamp::now().plus(self.confirmation.window());

        // 4. Atomic create-or-refresh
        let snapshot = self
            .store
            .upsert_pending(&email, &full_name, &candidate_token, expires_at)
            .await
            .map_err(|e| {
                tracing::error!(%request_id, error = %e, "subscription upsert failed");
                DomainError::new(ErrorCode::DatabaseError, e.to_string())
            })?;

        match snapshot {
            // 5. Already confirmed: never re-send, never reissue
            SubscriberSnapshot::Confirmed { email, full_name } => {
                Ok(SubmitOutcome::AlreadyConfirmed { email, full_name })
            }
            // 6. Pending: deliver the effective token. A delivery failure is
            // logged but the committed subscription stands; a later
            // resubmission will reissue the token.
            SubscriberSnapshot::Pending {
                email,
                full_name,
                token,
                ..
            } => {
                if let Err(e) = self
                    .mailer
                    .deliver(&email, &full_name, &token, request_id)
                    .await
                {
                    tracing::warn!(
                        %request_id,
                        email = %email,
                        error = %e,
                        "confirmation mail delivery failed, subscription remains pending"
                    );
                }
                Ok(SubmitOutcome::PendingConfirmation {
                    email,
                    full_name,
                    expires_in_hours: self.confirmation.ttl_hours(),
                })
            }
        }
    }
}
