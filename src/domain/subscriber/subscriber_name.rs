//! Subscriber display name value object.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::ValidationError;

const MAX_NAME_LENGTH: usize = 100;

/// Free-text display name, trimmed, non-empty, bounded in length.
///
/// Mutable on re-submission: a later signup for the same email always
/// refreshes the stored name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubscriberName(String);

impl SubscriberName {
    /// Parses and trims a raw name string.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("fullName"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::too_long(
                "fullName",
                MAX_NAME_LENGTH,
                trimmed.chars().count(),
            ));
        }
        if trimmed.chars().any(|c| c.is_control()) {
            return Err(ValidationError::invalid_format(
                "fullName",
                "control characters are not allowed",
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the trimmed name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubscriberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
