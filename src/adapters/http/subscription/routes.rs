//! Axum router configuration for subscription endpoints.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use super::handlers::{lookup, subscribe, verify, SubscriptionAppState};

/// Signup bodies are tiny; anything larger is rejected up front.
const MAX_SUBSCRIBE_BODY_BYTES: usize = 2048;

/// Create the subscription API router.
///
/// # Routes
/// - `POST /subscribers` - create or refresh a subscription
/// - `GET /subscribers` - public existence check by email
/// - `GET /verify` - consume a confirmation token
pub fn subscription_routes() -> Router<SubscriptionAppState> {
    Router::new()
        .route("/subscribers", post(subscribe).get(lookup))
        .route("/verify", get(verify))
        .layer(DefaultBodyLimit::max(MAX_SUBSCRIBE_BODY_BYTES))
}

/// Create the complete subscription module router, mounted at `/api`.
pub fn subscription_router() -> Router<SubscriptionAppState> {
    Router::new().nest("/api", subscription_routes())
}
