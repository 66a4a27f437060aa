//! Ports - trait seams between the workflow and its collaborators.
//!
//! The application layer depends only on these traits; adapters provide
//! the Postgres and Resend implementations.

mod confirmation_mailer;
mod subscriber_store;

pub use confirmation_mailer::{ConfirmationMailer, DeliveryError};
pub use subscriber_store::{StoreError, SubscriberRecord, SubscriberSnapshot, SubscriberStore};
