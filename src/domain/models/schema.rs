//! Declarative description of the variables the application reads.
//!
//! The schema is applied once per load: each known variable is checked in
//! declaration order, coerced to its kind, and defaulted when optional. The
//! first failure aborts validation. Variables the schema does not know about
//! are carried through untouched.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::config::Environment;
use super::environment::RawEnvironment;
use crate::domain::errors::ConfigValidationError;

/// Largest value accepted for a TCP port.
pub const MAX_PORT: u64 = 65_535;

/// Declared kind of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum FieldKind {
    /// Any non-empty string.
    String,
    /// Any finite number: sign, fraction and exponent allowed.
    Number,
    /// Whole number between 0 and `max`.
    Integer { max: u64 },
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("a string"),
            Self::Number => f.write_str("a number"),
            Self::Integer { max } => write!(f, "an integer between 0 and {max}"),
        }
    }
}

/// A coerced variable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Number(f64),
    Integer(u64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// One schema entry.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
    #[serde(skip_serializing_if = "is_unrestricted")]
    pub allowed: &'static [&'static str],
    pub description: &'static str,
}

fn is_unrestricted(allowed: &&'static [&'static str]) -> bool {
    allowed.is_empty()
}

impl FieldSpec {
    const fn string(key: &'static str, description: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::String,
            required: false,
            default: None,
            allowed: &[],
            description,
        }
    }

    const fn number(key: &'static str, description: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::Number,
            required: false,
            default: None,
            allowed: &[],
            description,
        }
    }

    const fn integer(key: &'static str, max: u64, description: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::Integer { max },
            required: false,
            default: None,
            allowed: &[],
            description,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = allowed;
        self
    }

    fn default_number(mut self, value: f64) -> Self {
        self.default = Some(FieldValue::Number(value));
        self
    }

    fn default_integer(mut self, value: u64) -> Self {
        self.default = Some(FieldValue::Integer(value));
        self
    }

    /// Validate a single raw value against this entry.
    ///
    /// `None` means the variable was not supplied; the result is then the
    /// default (possibly `None`) or a `required` error.
    pub fn check(&self, raw: Option<&str>) -> Result<Option<FieldValue>, ConfigValidationError> {
        let Some(raw) = raw else {
            if self.required {
                return Err(ConfigValidationError::required(self.key));
            }
            return Ok(self.default.clone());
        };

        // An allowed set is checked before emptiness, so "" is just another
        // value outside the set.
        if !self.allowed.is_empty() && !self.allowed.contains(&raw) {
            return Err(ConfigValidationError::invalid_enum_value(
                self.key,
                self.allowed,
            ));
        }

        let value = match self.kind {
            FieldKind::String if raw.is_empty() => return Err(ConfigValidationError::empty(self.key)),
            FieldKind::String => Some(FieldValue::String(raw.to_string())),
            FieldKind::Number => parse_number(raw).map(FieldValue::Number),
            FieldKind::Integer { max } => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| *n <= max)
                .map(FieldValue::Integer),
        };

        value
            .map(Some)
            .ok_or_else(|| ConfigValidationError::type_mismatch(self.key, self.kind))
    }
}

/// Parse a decimal number with optional sign, fraction and exponent.
///
/// Surrounding whitespace is ignored. Infinities, NaN and hexadecimal
/// spellings are rejected.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let numeric = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !numeric {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Ordered list of schema entries.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub const NODE_ENV: &'static str = "NODE_ENV";
    pub const PORT: &'static str = "PORT";
    pub const MONGODB_CONNECTION_URL: &'static str = "MONGODB_CONNECTION_URL";
    pub const JWT_ACCESS_EXPIRATION_MINUTES: &'static str = "JWT_ACCESS_EXPIRATION_MINUTES";
    pub const JWT_REFRESH_EXPIRATION_DAYS: &'static str = "JWT_REFRESH_EXPIRATION_DAYS";
    pub const SMTP_HOST: &'static str = "SMTP_HOST";
    pub const SMTP_PORT: &'static str = "SMTP_PORT";
    pub const EMAIL_USERNAME: &'static str = "EMAIL_USERNAME";
    pub const EMAIL_PASSWORD: &'static str = "EMAIL_PASSWORD";
    pub const EMAIL_FROM: &'static str = "EMAIL_FROM";

    /// The application schema.
    pub fn app() -> Self {
        Self {
            fields: vec![
                FieldSpec::string(Self::NODE_ENV, "runtime environment name")
                    .required()
                    .one_of(Environment::NAMES),
                FieldSpec::integer(Self::PORT, MAX_PORT, "port the HTTP server listens on")
                    .default_integer(3000),
                FieldSpec::string(Self::MONGODB_CONNECTION_URL, "Mongo DB url").required(),
                FieldSpec::number(
                    Self::JWT_ACCESS_EXPIRATION_MINUTES,
                    "minutes after which access tokens expire",
                )
                .default_number(30.0),
                FieldSpec::number(
                    Self::JWT_REFRESH_EXPIRATION_DAYS,
                    "days after which refresh tokens expire",
                )
                .default_number(30.0),
                FieldSpec::string(Self::SMTP_HOST, "server that will send the emails"),
                FieldSpec::integer(Self::SMTP_PORT, MAX_PORT, "port to connect to the email server"),
                FieldSpec::string(Self::EMAIL_USERNAME, "username for email server"),
                FieldSpec::string(Self::EMAIL_PASSWORD, "password for email server"),
                FieldSpec::string(
                    Self::EMAIL_FROM,
                    "the from field in the emails sent by the app",
                ),
            ],
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Apply the schema to `raw`, stopping at the first failure.
    pub fn validate(&self, raw: &RawEnvironment) -> Result<ValidatedEnv, ConfigValidationError> {
        let mut values = BTreeMap::new();
        for field in &self.fields {
            if let Some(value) = field.check(raw.get(field.key))? {
                values.insert(field.key, value);
            }
        }

        let passthrough = raw
            .iter()
            .filter(|(key, _)| self.get(key).is_none())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Ok(ValidatedEnv {
            values,
            passthrough,
        })
    }
}

/// Result of a successful schema pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEnv {
    values: BTreeMap<&'static str, FieldValue>,
    passthrough: BTreeMap<String, String>,
}

impl ValidatedEnv {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// String value of `key`, if present and of string kind.
    pub fn string(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(FieldValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric value of `key`, if present and of number kind.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Integer value of `key`, if present and of integer kind.
    pub fn integer(&self, key: &str) -> Option<u64> {
        match self.values.get(key) {
            Some(FieldValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Variables the schema did not recognise.
    pub fn passthrough(&self) -> &BTreeMap<String, String> {
        &self.passthrough
    }
}
