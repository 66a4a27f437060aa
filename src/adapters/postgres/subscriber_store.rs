//! PostgreSQL implementation of SubscriberStore.
//!
//! Both mutating operations run as a single transaction. The upsert takes
//! a `FOR UPDATE` row lock before branching on confirmation state, so a
//! concurrent verification can never be invalidated by a token refresh
//! that has not committed, and two concurrent submissions serialize on
//! the row. Token consumption is one conditional UPDATE, with no separate
//! read, so exactly one of any number of concurrent verifications with
//! the same token can transition the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{SubscriberId, Timestamp};
use crate::domain::subscriber::{ConfirmationToken, EmailAddress, SubscriberName};
use crate::ports::{StoreError, SubscriberRecord, SubscriberSnapshot, SubscriberStore};

/// PostgreSQL implementation of the SubscriberStore port.
pub struct PostgresSubscriberStore {
    pool: PgPool,
}

impl PostgresSubscriberStore {
    /// Creates a new PostgresSubscriberStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn try_upsert(
        &self,
        email: &EmailAddress,
        full_name: &SubscriberName,
        candidate_token: &ConfirmationToken,
        expires_at: Timestamp,
    ) -> Result<SubscriberSnapshot, StoreError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        // Locking read: serializes concurrent submissions for one email
        // and pins the row state the branch below relies on.
        let existing = sqlx::query_as::<_, LockedRow>(
            r#"
            SELECT confirmed_at
            FROM subscribers
            WHERE email = $1
            FOR UPDATE
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error)?;

        let snapshot = match existing {
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO subscribers (id, email, full_name, confirm_token, confirm_expires)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(SubscriberId::new().as_uuid())
                .bind(email.as_str())
                .bind(full_name.as_str())
                .bind(candidate_token.as_str())
                .bind(expires_at.as_datetime())
                .execute(&mut *tx)
                .await
                .map_err(insert_error)?;

                SubscriberSnapshot::Pending {
                    email: email.clone(),
                    full_name: full_name.clone(),
                    token: candidate_token.clone(),
                    expires_at,
                }
            }
            Some(row) if row.confirmed_at.is_some() => {
                // Confirmed is terminal: refresh the name, leave the
                // token fields absent.
                sqlx::query("UPDATE subscribers SET full_name = $2 WHERE email = $1")
                    .bind(email.as_str())
                    .bind(full_name.as_str())
                    .execute(&mut *tx)
                    .await
                    .map_err(storage_error)?;

                SubscriberSnapshot::Confirmed {
                    email: email.clone(),
                    full_name: full_name.clone(),
                }
            }
            Some(_) => {
                sqlx::query(
                    r#"
                    UPDATE subscribers
                    SET full_name = $2, confirm_token = $3, confirm_expires = $4
                    WHERE email = $1
                    "#,
                )
                .bind(email.as_str())
                .bind(full_name.as_str())
                .bind(candidate_token.as_str())
                .bind(expires_at.as_datetime())
                .execute(&mut *tx)
                .await
                .map_err(storage_error)?;

                SubscriberSnapshot::Pending {
                    email: email.clone(),
                    full_name: full_name.clone(),
                    token: candidate_token.clone(),
                    expires_at,
                }
            }
        };

        tx.commit().await.map_err(storage_error)?;
        Ok(snapshot)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LockedRow {
    confirmed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, sqlx::FromRow)]
struct PublicRow {
    id: Uuid,
    email: String,
    full_name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PublicRow> for SubscriberRecord {
    type Error = StoreError;

    fn try_from(row: PublicRow) -> Result<Self, Self::Error> {
        Ok(SubscriberRecord {
            id: SubscriberId::from_uuid(row.id),
            email: EmailAddress::parse(&row.email)
                .map_err(|e| StoreError::constraint(format!("stored email invalid: {}", e)))?,
            full_name: SubscriberName::parse(&row.full_name)
                .map_err(|e| StoreError::constraint(format!("stored name invalid: {}", e)))?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn storage_error(e: sqlx::Error) -> StoreError {
    StoreError::unavailable(e.to_string())
}

fn insert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("uq_subscribers_email") {
            return StoreError::constraint("email already exists");
        }
        if db_err.constraint() == Some("uq_subscribers_confirm_token") {
            return StoreError::constraint("token already exists");
        }
    }
    storage_error(e)
}

#[async_trait]
impl SubscriberStore for PostgresSubscriberStore {
    async fn upsert_pending(
        &self,
        email: &EmailAddress,
        full_name: &SubscriberName,
        candidate_token: &ConfirmationToken,
        expires_at: Timestamp,
    ) -> Result<SubscriberSnapshot, StoreError> {
        // Two submissions racing on a brand-new email can both pass the
        // locking read and collide on the email uniqueness constraint.
        // The loser retries once and lands on the refresh path.
        match self
            .try_upsert(email, full_name, candidate_token, expires_at)
            .await
        {
            Err(StoreError::ConstraintViolation(_)) => {
                self.try_upsert(email, full_name, candidate_token, expires_at)
                    .await
            }
            result => result,
        }
    }

    async fn consume_token(&self, token: &ConfirmationToken) -> Result<bool, StoreError> {
        // The whole verification algorithm: one conditional update, no
        // read-then-write. Wrong, consumed, and expired tokens match no
        // row and mutate nothing.
        let result = sqlx::query(
            r#"
            UPDATE subscribers
            SET confirmed_at = now(), confirm_token = NULL, confirm_expires = NULL
            WHERE confirm_token = $1 AND confirm_expires > now()
            "#,
        )
        .bind(token.as_str())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<SubscriberRecord>, StoreError> {
        let row = sqlx::query_as::<_, PublicRow>(
            r#"
            SELECT id, email, full_name, created_at
            FROM subscribers
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(SubscriberRecord::try_from).transpose()
    }
}
