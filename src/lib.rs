//! appconf - environment-driven application configuration
//!
//! Reads the process environment (gap-filled from an optional `.env` file),
//! validates it against a fixed schema, and produces an immutable
//! [`AppConfig`] to be handed to the rest of the application at startup.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): schema, raw/validated mappings, the config tree
//! - **Infrastructure Layer** (`infrastructure`): environment and file sources, logging
//! - **CLI Layer** (`cli`): `check`, `show` and `schema` commands
//!
//! # Example
//!
//! ```no_run
//! use appconf::ConfigLoader;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().load()?;
//!     println!("listening on {}", config.port);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::errors::{ConfigValidationError, ValidationReason};
pub use domain::models::{
    AppConfig, DatabaseConfig, EmailConfig, EmailTransport, Environment, JwtConfig,
    RawEnvironment, Schema, SmtpAuth, SmtpConfig, ValidatedEnv,
};
pub use infrastructure::config::ConfigLoader;

/// Load the application configuration with default settings.
///
/// Shorthand for [`ConfigLoader::load`] on a default loader.
pub fn load() -> Result<AppConfig, ConfigValidationError> {
    ConfigLoader::new().load()
}
