//! Domain errors for environment validation.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why a single variable failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationReason {
    /// A required variable is absent.
    Required,
    /// A string variable is present but empty.
    Empty,
    /// The value is not one of the allowed values.
    InvalidEnumValue,
    /// The value does not coerce to the declared kind.
    TypeMismatch,
}

impl ValidationReason {
    /// Stable reason code, as reported in JSON output.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Empty => "empty",
            Self::InvalidEnumValue => "invalid-enum-value",
            Self::TypeMismatch => "type-mismatch",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A startup-fatal validation failure for one environment variable.
///
/// Validation stops at the first failure, so a single error always names a
/// single variable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Config validation error: \"{field}\" {detail}")]
pub struct ConfigValidationError {
    field: String,
    reason: ValidationReason,
    detail: String,
}

impl ConfigValidationError {
    /// Variable is required but was not supplied.
    pub fn required(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: ValidationReason::Required,
            detail: "is required".to_string(),
        }
    }

    /// Variable was supplied as an empty string.
    pub fn empty(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: ValidationReason::Empty,
            detail: "cannot be empty".to_string(),
        }
    }

    /// Variable is outside its allowed set.
    pub fn invalid_enum_value(field: impl Into<String>, allowed: &[&str]) -> Self {
        Self {
            field: field.into(),
            reason: ValidationReason::InvalidEnumValue,
            detail: format!("must be one of [{}]", allowed.join(", ")),
        }
    }

    /// Variable does not coerce to `expected`.
    pub fn type_mismatch(field: impl Into<String>, expected: impl fmt::Display) -> Self {
        Self {
            field: field.into(),
            reason: ValidationReason::TypeMismatch,
            detail: format!("must be {expected}"),
        }
    }

    /// Name of the offending variable.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub const fn reason(&self) -> ValidationReason {
        self.reason
    }

    /// Human-readable reason text without the field label.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}
