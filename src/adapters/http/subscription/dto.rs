//! HTTP DTOs for subscription endpoints.
//!
//! Wire format is camelCase, matching the public form client. These types
//! decouple the HTTP API from domain types.

use serde::{Deserialize, Serialize};

use crate::application::handlers::subscription::{SubmitOutcome, SubscriberLookup};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Signup submission. `company` is the honeypot field: the form hides it
/// and real clients leave it empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubscribeRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
}

/// Query parameters for token verification.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyParams {
    #[serde(default)]
    pub token: Option<String>,
}

/// Query parameters for subscriber lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub email: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Subscription state reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    AlreadyConfirmed,
    PendingConfirmation,
}

/// Response for a signup submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub status: SubscriptionStatus,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_hours: Option<i64>,
}

impl From<SubmitOutcome> for SubscribeResponse {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::AlreadyConfirmed { email, full_name } => Self {
                status: SubscriptionStatus::AlreadyConfirmed,
                email: email.as_str().to_string(),
                full_name: full_name.as_str().to_string(),
                expires_in_hours: None,
            },
            SubmitOutcome::PendingConfirmation {
                email,
                full_name,
                expires_in_hours,
            } => Self {
                status: SubscriptionStatus::PendingConfirmation,
                email: email.as_str().to_string(),
                full_name: full_name.as_str().to_string(),
                expires_in_hours: Some(expires_in_hours),
            },
        }
    }
}

/// Response for a successful verification.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    pub ok: bool,
}

/// Response for a subscriber lookup. Only public fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl From<SubscriberLookup> for LookupResponse {
    fn from(lookup: SubscriberLookup) -> Self {
        Self {
            exists: lookup.exists,
            full_name: lookup.full_name.map(|n| n.as_str().to_string()),
            created_at: lookup.created_at,
        }
    }
}

/// Stable error body. `error` is a machine-readable code; `message` never
/// contains raw storage detail.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subscribe_request_deserializes_camel_case() {
        let req: SubscribeRequest = serde_json::from_value(json!({
            "fullName": "Ada Lovelace",
            "email": "ada@example.com"
        }))
        .unwrap();
        assert_eq!(req.full_name, "Ada Lovelace");
        assert!(req.company.is_none());
    }

    #[test]
    fn subscribe_request_rejects_unknown_fields() {
        let result: Result<SubscribeRequest, _> = serde_json::from_value(json!({
            "fullName": "Ada",
            "email": "ada@example.com",
            "unexpected": true
        }));
        assert!(result.is_err());
    }

    #[test]
    fn pending_response_serializes_with_window() {
        let body = serde_json::to_value(SubscribeResponse {
            status: SubscriptionStatus::PendingConfirmation,
            email: "ada@example.com".to_string(),
            full_name: "Ada".to_string(),
            expires_in_hours: Some(24),
        })
        .unwrap();
        assert_eq!(body["status"], "pending_confirmation");
        assert_eq!(body["expiresInHours"], 24);
    }

    #[test]
    fn confirmed_response_omits_window() {
        let body = serde_json::to_value(SubscribeResponse {
            status: SubscriptionStatus::AlreadyConfirmed,
            email: "ada@example.com".to_string(),
            full_name: "Ada".to_string(),
            expires_in_hours: None,
        })
        .unwrap();
        assert_eq!(body["status"], "already_confirmed");
        assert!(body.get("expiresInHours").is_none());
    }

    #[test]
    fn lookup_response_omits_absent_fields() {
        let body = serde_json::to_value(LookupResponse {
            exists: false,
            full_name: None,
            created_at: None,
        })
        .unwrap();
        assert_eq!(body, json!({ "exists": false }));
    }
}
