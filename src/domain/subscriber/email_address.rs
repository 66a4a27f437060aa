//! Normalized email address value object.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Longest mailbox address we accept, matching the storage column.
const MAX_EMAIL_LENGTH: usize = 254;

/// Case-normalized email address, the primary business key of a subscriber.
///
/// Construction trims surrounding whitespace and lower-cases the input, so
/// two submissions differing only in case or padding always resolve to the
/// same subscriber row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and normalizes a raw email string.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if normalized.len() > MAX_EMAIL_LENGTH {
            return Err(ValidationError::too_long(
                "email",
                MAX_EMAIL_LENGTH,
                normalized.len(),
            ));
        }

        let mut parts = normalized.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next();

        let domain_ok = domain
            .map(|d| !d.is_empty() && d.contains('.') && !d.starts_with('.') && !d.ends_with('.'))
            .unwrap_or(false);

        if local.is_empty()
            || !domain_ok
            || normalized.chars().any(|c| c.is_whitespace() || c.is_control())
            || normalized.matches('@').count() != 1
        {
            return Err(ValidationError::invalid_format(
                "email",
                "not a valid email address",
            ));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn trims_and_lowercases() {
        let email = EmailAddress::parse(" ADA@Example.com ").unwrap();
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[test]
    fn rejects_empty() {
        assert!(EmailAddress::parse("   ").is_err());
    }

    #[test]
    fn rejects_missing_at() {
        assert!(EmailAddress::parse("ada.example.com").is_err());
    }

    #[test]
    fn rejects_missing_local_part() {
        assert!(EmailAddress::parse("@example.com").is_err());
    }

    #[test]
    fn rejects_bare_domain() {
        assert!(EmailAddress::parse("ada@localhost").is_err());
    }

    #[test]
    fn rejects_double_at() {
        assert!(EmailAddress::parse("ada@@example.com").is_err());
        assert!(EmailAddress::parse("ada@ex@ample.com").is_err());
    }

    #[test]
    fn rejects_interior_whitespace() {
        assert!(EmailAddress::parse("ada lovelace@example.com").is_err());
    }

    #[test]
    fn rejects_overlong_address() {
        let raw = format!("{}@example.com", "a".repeat(250));
        assert!(EmailAddress::parse(&raw).is_err());
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(local in "[a-z0-9.]{1,20}", domain in "[a-z0-9]{1,10}") {
            let raw = format!("  {}@{}.com  ", local.to_uppercase(), domain);
            if let Ok(first) = EmailAddress::parse(&raw) {
                let second = EmailAddress::parse(first.as_str()).unwrap();
                prop_assert_eq!(first, second);
            }
        }
    }
}
