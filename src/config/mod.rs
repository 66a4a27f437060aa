//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `LETTERDROP` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use letterdrop::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod confirmation;
mod database;
mod email;
mod error;
mod server;

pub use confirmation::{ConfirmationConfig, DEFAULT_TTL_HOURS};
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Email configuration (Resend)
    pub email: EmailConfig,

    /// Confirmation link configuration (base URL, validity window)
    pub confirmation: ConfirmationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads environment variables with the
    /// `LETTERDROP` prefix, using `__` to separate nested values:
    ///
    /// - `LETTERDROP__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `LETTERDROP__DATABASE__URL=...` -> `database.url = ...`
    /// - `LETTERDROP__CONFIRMATION__TTL_HOURS=48` -> `confirmation.ttl_hours = 48`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LETTERDROP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.email.validate()?;
        self.confirmation.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
