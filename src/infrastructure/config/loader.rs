use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::env_source;
use crate::domain::errors::ConfigValidationError;
use crate::domain::models::{AppConfig, RawEnvironment, Schema};

/// Override file read when none is configured. Relative, so it resolves
/// against the current working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Setting this variable to a truthy value skips the override file.
pub const DOTENV_DISABLED: &str = "DOTENV_DISABLED";

/// Loads and validates the application configuration.
///
/// Sources, lowest to highest precedence:
/// 1. Schema defaults
/// 2. The override file
/// 3. The live process environment
///
/// The override file defaults to `.env` resolved against the current working
/// directory, not the location of the binary. Launch from the application
/// root or pass an absolute path to [`ConfigLoader::with_env_file`].
///
/// The process environment itself is never modified.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    schema: Schema,
    env_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            schema: Schema::app(),
            env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from `path` instead of `.env`. A relative `path` is
    /// resolved against the current working directory.
    #[must_use]
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Do not read any override file.
    #[must_use]
    pub fn without_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Load configuration from the process environment and override file.
    ///
    /// Call once at startup; the returned value is meant to be passed to
    /// whatever needs it.
    pub fn load(&self) -> Result<AppConfig, ConfigValidationError> {
        self.load_from(&self.raw_environment())
    }

    /// Collect the raw variable mapping without validating it.
    pub fn raw_environment(&self) -> RawEnvironment {
        let mut raw = env_source::from_process();

        let Some(path) = self.env_file.as_deref() else {
            return raw;
        };

        if raw.get(DOTENV_DISABLED).is_some_and(env_source::is_truthy) {
            debug!(path = %path.display(), "override file disabled by {DOTENV_DISABLED}");
            return raw;
        }

        env_source::merge_override_file(&mut raw, path);
        raw
    }

    /// Validate `raw` and shape it into an [`AppConfig`].
    ///
    /// Pure apart from logging: equal inputs give equal outputs.
    pub fn load_from(&self, raw: &RawEnvironment) -> Result<AppConfig, ConfigValidationError> {
        let validated = self.schema.validate(raw)?;
        let config = AppConfig::from_validated(&validated)?;

        if config.email.is_partially_configured() {
            warn!("email settings present without SMTP_HOST; email sending is disabled");
        }

        info!(
            env = %config.env,
            port = config.port,
            email_enabled = config.email.is_enabled(),
            ignored_vars = validated.passthrough().len(),
            "configuration loaded"
        );

        Ok(config)
    }
}
