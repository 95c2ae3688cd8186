//! Configuration loading infrastructure
//!
//! - Process environment snapshot
//! - `.env` override file (fills gaps, never clobbers)
//! - Schema validation into the typed config tree

pub mod env_source;
pub mod loader;

pub use loader::{ConfigLoader, DEFAULT_ENV_FILE, DOTENV_DISABLED};
