//! Confirmation-link configuration

use chrono::Duration;
use serde::Deserialize;

use super::error::ValidationError;

/// Default token validity window in hours.
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// Confirmation workflow configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmationConfig {
    /// Public base URL used to build verification links
    pub base_url: String,

    /// Token validity window in hours
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,
}

impl ConfirmationConfig {
    /// Effective validity window in hours.
    ///
    /// A non-positive configured value falls back to the default so the
    /// issuer can never hand out an already-expired token.
    pub fn ttl_hours(&self) -> i64 {
        if self.ttl_hours > 0 {
            self.ttl_hours
        } else {
            DEFAULT_TTL_HOURS
        }
    }

    /// Effective validity window as a Duration. Always positive.
    pub fn window(&self) -> Duration {
        Duration::hours(self.ttl_hours())
    }

    /// Validate confirmation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("CONFIRMATION_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.ttl_hours <= 0 {
            return Err(ValidationError::InvalidConfirmationWindow);
        }
        Ok(())
    }
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            ttl_hours: default_ttl_hours(),
        }
    }
}

fn default_ttl_hours() -> i64 {
    DEFAULT_TTL_HOURS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_config_defaults() {
        let config = ConfirmationConfig::default();
        assert_eq!(config.ttl_hours(), 24);
        assert_eq!(config.window(), Duration::hours(24));
    }

    #[test]
    fn test_window_falls_back_when_non_positive() {
        let config = ConfirmationConfig {
            base_url: "https://example.com".to_string(),
            ttl_hours: 0,
        };
        assert_eq!(config.ttl_hours(), 24);

        let config = ConfirmationConfig {
            base_url: "https://example.com".to_string(),
            ttl_hours: -5,
        };
        assert_eq!(config.window(), Duration::hours(24));
    }

    #[test]
    fn test_custom_window() {
        let config = ConfirmationConfig {
            base_url: "https://example.com".to_string(),
            ttl_hours: 48,
        };
        assert_eq!(config.ttl_hours(), 48);
        assert_eq!(config.window(), Duration::hours(48));
    }

    #[test]
    fn test_validation_missing_base_url() {
        let config = ConfirmationConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let config = ConfirmationConfig {
            base_url: "example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_positive_window() {
        let config = ConfirmationConfig {
            base_url: "https://example.com".to_string(),
            ttl_hours: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = ConfirmationConfig {
            base_url: "https://news.example.com".to_string(),
            ttl_hours: 24,
        };
        assert!(config.validate().is_ok());
    }
}
