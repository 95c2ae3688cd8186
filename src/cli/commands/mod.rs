//! CLI command implementations.

pub mod check;
pub mod schema;
pub mod show;
