//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or human log formatting on stderr
//! - Level and format configured through `APPCONF_LOG_*`
//! - Secret scrubbing for anything printed

pub mod config;
pub mod logger;
pub mod secret_scrubbing;

pub use config::{LogConfig, LogFormat, LOG_ENV_PREFIX};
pub use secret_scrubbing::{SecretScrubber, REDACTED};
