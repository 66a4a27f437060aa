//! Subscriber value objects.
//!
//! A subscriber is in exactly one of two states: Pending (holds an active
//! confirmation token and expiry) or Confirmed (terminal, token fields
//! cleared). The state machine itself lives behind the
//! [`SubscriberStore`](crate::ports::SubscriberStore) port, which returns
//! typed snapshots; this module owns the validated inputs.

mod confirmation_token;
mod email_address;
mod subscriber_name;

pub use confirmation_token::{ConfirmationToken, TOKEN_LENGTH};
pub use email_address::EmailAddress;
pub use subscriber_name::SubscriberName;
