//! LookupSubscriberHandler - Read-only subscriber existence check.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, RequestId, Timestamp};
use crate::domain::subscriber::{EmailAddress, SubscriberName};
use crate::ports::SubscriberStore;

/// Public view of a lookup result. Token, expiry, and confirmation status
/// are never exposed here.
#[derive(Debug, Clone)]
pub struct SubscriberLookup {
    pub exists: bool,
    pub full_name: Option<SubscriberName>,
    pub created_at: Option<Timestamp>,
}

/// Handler for read-only lookups by email.
pub struct LookupSubscriberHandler {
    store: Arc<dyn SubscriberStore>,
}

impl LookupSubscriberHandler {
    pub fn new(store: Arc<dyn SubscriberStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        raw_email: &str,
        request_id: RequestId,
    ) -> Result<SubscriberLookup, DomainError> {
        let email = EmailAddress::parse(raw_email)
            .map_err(|e| DomainError::new(ErrorCode::InvalidEmail, e.to_string()))?;

        let record = self.store.find_by_email(&email).await.map_err(|e| {
            tracing::error!(%request_id, error = %e, "subscriber lookup failed");
            DomainError::new(ErrorCode::DatabaseError, e.to_string())
        })?;

        Ok(match record {
            Some(record) => SubscriberLookup {
                exists: true,
                full_name: Some(record.full_name),
                created_at: Some(record.created_at),
            },
            None => SubscriberLookup {
                exists: false,
                full_name: None,
                created_at: None,
            },
        })
    }
}
