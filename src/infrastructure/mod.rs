//! Infrastructure layer module
//!
//! Adapters between the domain and the outside world:
//! - Configuration loading (process environment, `.env` override file)
//! - Logging infrastructure

pub mod config;
pub mod logging;
