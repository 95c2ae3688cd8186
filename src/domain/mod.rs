//! Domain layer for environment-driven configuration
//!
//! Pure data and rules: the raw variable mapping, the schema applied to it,
//! and the typed configuration tree. No process or file access lives here.

pub mod errors;
pub mod models;

pub use errors::{ConfigValidationError, ValidationReason};
