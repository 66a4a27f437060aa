//! Subscription workflow handlers.
//!
//! Signup, verification, and lookup. All cross-request coordination is
//! delegated to the [`SubscriberStore`](crate::ports::SubscriberStore);
//! the handlers only validate input, sequence the port calls, and decide
//! what the caller gets to see.

mod lookup_subscriber;
mod submit_subscription;
mod verify_subscription;

pub use lookup_subscriber::{LookupSubscriberHandler, SubscriberLookup};
pub use submit_subscription::{
    SubmitOutcome, SubmitSubscriptionCommand, SubmitSubscriptionHandler,
};
pub use verify_subscription::VerifySubscriptionHandler;
