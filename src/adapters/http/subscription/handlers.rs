//! Axum handlers for subscription endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::dto::{
    ErrorResponse, LookupParams, LookupResponse, SubscribeRequest, SubscribeResponse,
    VerifyParams, VerifyResponse,
};
use crate::application::handlers::subscription::{
    LookupSubscriberHandler, SubmitSubscriptionCommand, SubmitSubscriptionHandler,
    VerifySubscriptionHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode, RequestId};

/// Shared state for the subscription router.
#[derive(Clone)]
pub struct SubscriptionAppState {
    pub submit: Arc<SubmitSubscriptionHandler>,
    pub verify: Arc<VerifySubscriptionHandler>,
    pub lookup: Arc<LookupSubscriberHandler>,
}

/// POST /api/subscribers - create or refresh a subscription.
pub async fn subscribe(
    State(state): State<SubscriptionAppState>,
    payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Response {
    let request_id = RequestId::new();

    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection_response(rejection),
    };

    let cmd = SubmitSubscriptionCommand {
        full_name: req.full_name,
        email: req.email,
        company: req.company,
    };

    match state.submit.handle(cmd, request_id).await {
        Ok(outcome) => (StatusCode::OK, Json(SubscribeResponse::from(outcome))).into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/verify?token=... - consume a confirmation token.
pub async fn verify(
    State(state): State<SubscriptionAppState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let request_id = RequestId::new();
    let token = params.token.unwrap_or_default();

    match state.verify.handle(&token, request_id).await {
        Ok(()) => (StatusCode::OK, Json(VerifyResponse { ok: true })).into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/subscribers?email=... - public existence check.
pub async fn lookup(
    State(state): State<SubscriptionAppState>,
    Query(params): Query<LookupParams>,
) -> Response {
    let request_id = RequestId::new();

    let Some(email) = params.email else {
        return error_body(
            StatusCode::BAD_REQUEST,
            "invalid_email",
            "email parameter is required",
        );
    };

    match state.lookup.handle(&email, request_id).await {
        Ok(result) => (StatusCode::OK, Json(LookupResponse::from(result))).into_response(),
        Err(err) => error_response(err),
    }
}

/// Maps a domain error to its HTTP representation.
///
/// Infrastructure errors are collapsed to a generic body; raw storage text
/// never leaves this boundary.
fn error_response(err: DomainError) -> Response {
    match err.code {
        ErrorCode::InvalidEmail | ErrorCode::InvalidName | ErrorCode::MissingToken => {
            error_body(StatusCode::BAD_REQUEST, &wire_code(err.code), &err.message)
        }
        ErrorCode::InvalidOrExpired => error_body(
            StatusCode::BAD_REQUEST,
            "invalid_or_expired",
            "the confirmation link is invalid or has expired",
        ),
        ErrorCode::PayloadTooLarge => error_body(
            StatusCode::PAYLOAD_TOO_LARGE,
            "payload_too_large",
            "request body exceeds the allowed size",
        ),
        ErrorCode::DatabaseError | ErrorCode::InternalError => {
            tracing::error!(error = %err, "internal error");
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "an unexpected error occurred",
            )
        }
    }
}

fn json_rejection_response(rejection: JsonRejection) -> Response {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        error_body(
            StatusCode::PAYLOAD_TOO_LARGE,
            "payload_too_large",
            "request body exceeds the allowed size",
        )
    } else {
        error_body(
            StatusCode::BAD_REQUEST,
            "invalid_payload",
            "request body is not a valid subscription",
        )
    }
}

fn wire_code(code: ErrorCode) -> String {
    code.to_string().to_lowercase()
}

fn error_body(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: message.to_string(),
        }),
    )
        .into_response()
}
