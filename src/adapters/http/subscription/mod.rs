//! HTTP adapter for the subscription module.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::SubscriptionAppState;
pub use routes::{subscription_router, subscription_routes};
