//! VerifySubscriptionHandler - Command handler for confirmation-link visits.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, RequestId};
use crate::domain::subscriber::ConfirmationToken;
use crate::ports::SubscriberStore;

/// Handler for token verification.
///
/// The entire verification algorithm is the store's single conditional
/// update; this handler only screens input that could never match.
pub struct VerifySubscriptionHandler {
    store: Arc<dyn SubscriberStore>,
}

impl VerifySubscriptionHandler {
    pub fn new(store: Arc<dyn SubscriberStore>) -> Self {
        Self { store }
    }

    /// Consumes `raw_token`, confirming the matching subscriber.
    ///
    /// An empty token is rejected as missing without touching storage. A
    /// malformed token cannot match any stored value and maps straight to
    /// the same invalid-or-expired outcome as a wrong, consumed, or
    /// expired one; the causes are deliberately indistinguishable to the
    /// caller.
    pub async fn handle(
        &self,
        raw_token: &str,
        request_id: RequestId,
    ) -> Result<(), DomainError> {
        if raw_token.is_empty() {
            return Err(DomainError::new(ErrorCode::MissingToken, "token is required"));
        }

        let token = match ConfirmationToken::parse(raw_token) {
            Ok(token) => token,
            Err(_) => {
                return Err(DomainError::new(
                    ErrorCode::InvalidOrExpired,
                    "token is invalid or expired",
                ))
            }
        };

        let confirmed = self.store.consume_token(&token).await.map_err(|e| {
            tracing::error!(%request_id, error = %e, "token consumption failed");
            DomainError::new(ErrorCode::DatabaseError, e.to_string())
        })?;

        if confirmed {
            tracing::info!(%request_id, "subscription confirmed");
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidOrExpired,
                "token is invalid or expired",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::subscriber::{EmailAddress, SubscriberName};
    use crate::ports::{StoreError, SubscriberRecord, SubscriberSnapshot};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Store holding one pending row keyed by token, consumable once.
    struct MockStore {
        token: Mutex<Option<String>>,
        expired: bool,
        calls: Mutex<usize>,
    }

    impl MockStore {
        fn with_token(token: &str) -> Self {
            Self {
                token: Mutex::new(Some(token.to_string())),
                expired: false,
                calls: Mutex::new(0),
            }
        }

        fn with_expired_token(token: &str) -> Self {
            Self {
                token: Mutex::new(Some(token.to_string())),
                expired: true,
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl SubscriberStore for MockStore {
        async fn upsert_pending(
            &self,
            _email: &EmailAddress,
            _full_name: &SubscriberName,
            _candidate_token: &ConfirmationToken,
            _expires_at: Timestamp,
        ) -> Result<SubscriberSnapshot, StoreError> {
            unimplemented!("not used by verification tests")
        }

        async fn consume_token(&self, token: &ConfirmationToken) -> Result<bool, StoreError> {
            *self.calls.lock().unwrap() += 1;
            if self.expired {
                return Ok(false);
            }
            let mut stored = self.token.lock().unwrap();
            if stored.as_deref() == Some(token.as_str()) {
                *stored = None;
                Ok(true)
            } else {
                Ok(false)
            }
        }

        async fn find_by_email(
            &self,
            _email: &EmailAddress,
        ) -> Result<Option<SubscriberRecord>, StoreError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn valid_token_confirms_exactly_once() {
        let token = ConfirmationToken::generate();
        let store = Arc::new(MockStore::with_token(token.as_str()));
        let handler = VerifySubscriptionHandler::new(store.clone());

        assert!(handler.handle(token.as_str(), RequestId::new()).await.is_ok());

        // single-use: the second attempt reports invalid-or-expired
        let err = handler
            .handle(token.as_str(), RequestId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrExpired);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let token = ConfirmationToken::generate();
        let store = Arc::new(MockStore::with_expired_token(token.as_str()));
        let handler = VerifySubscriptionHandler::new(store);

        let err = handler
            .handle(token.as_str(), RequestId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrExpired);
    }

    #[tokio::test]
    async fn empty_token_never_touches_storage() {
        let store = Arc::new(MockStore::with_token("unused"));
        let handler = VerifySubscriptionHandler::new(store.clone());

        let err = handler.handle("", RequestId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingToken);
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn malformed_token_never_touches_storage() {
        let store = Arc::new(MockStore::with_token("unused"));
        let handler = VerifySubscriptionHandler::new(store.clone());

        let err = handler
            .handle("definitely-not-a-token", RequestId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrExpired);
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn wrong_token_is_rejected() {
        let store = Arc::new(MockStore::with_token(
            ConfirmationToken::generate().as_str(),
        ));
        let handler = VerifySubscriptionHandler::new(store);

        let other = ConfirmationToken::generate();
        let err = handler
            .handle(other.as_str(), RequestId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrExpired);
    }
}
