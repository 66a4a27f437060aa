//! Single-use confirmation token value object and issuer.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use std::fmt;

use crate::domain::foundation::ValidationError;

/// 32 random bytes encode to exactly 43 unpadded base64url characters.
const TOKEN_BYTES: usize = 32;
pub const TOKEN_LENGTH: usize = 43;

/// Unguessable single-use credential proving control of a confirmation link.
///
/// Tokens are generated from the OS CSPRNG; collision handling is deferred
/// to the store's uniqueness constraint on the token column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConfirmationToken(String);

impl ConfirmationToken {
    /// Generates a fresh random token.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Validates an inbound token string without consulting storage.
    ///
    /// Anything that is not exactly 43 URL-safe base64 characters can never
    /// match a stored token, so it is rejected up front.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::empty_field("token"));
        }
        if raw.len() != TOKEN_LENGTH
            || !raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::invalid_format(
                "token",
                "not a valid confirmation token",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the encoded token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ConfirmationToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
