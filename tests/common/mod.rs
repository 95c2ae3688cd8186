//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use appconf::RawEnvironment;
use tempfile::TempDir;

/// Every variable the application schema reads.
pub const SCHEMA_VARS: [&str; 10] = [
    "NODE_ENV",
    "PORT",
    "MONGODB_CONNECTION_URL",
    "JWT_ACCESS_EXPIRATION_MINUTES",
    "JWT_REFRESH_EXPIRATION_DAYS",
    "SMTP_HOST",
    "SMTP_PORT",
    "EMAIL_USERNAME",
    "EMAIL_PASSWORD",
    "EMAIL_FROM",
];

/// Minimal valid environment for `env`.
pub fn minimal_env(env: &str) -> RawEnvironment {
    [
        ("NODE_ENV", env),
        ("MONGODB_CONNECTION_URL", "mongodb://localhost/db"),
    ]
    .into_iter()
    .collect()
}

/// Build a raw environment from pairs.
pub fn raw(pairs: &[(&str, &str)]) -> RawEnvironment {
    pairs.iter().copied().collect()
}

/// Write an override file into a fresh temp directory.
///
/// Returns the directory (cleaned up on drop) and the file path.
pub fn write_env_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(".env");
    fs::write(&path, contents).expect("Failed to write override file");
    (dir, path)
}

/// `(key, None)` pairs that unset every schema variable, for `temp_env`.
pub fn unset_schema_vars() -> Vec<(&'static str, Option<&'static str>)> {
    SCHEMA_VARS.iter().map(|key| (*key, None)).collect()
}
