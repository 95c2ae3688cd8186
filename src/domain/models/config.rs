use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::schema::{Schema, ValidatedEnv};
use crate::domain::errors::ConfigValidationError;

/// Suffix appended to the database URL when running tests.
pub const TEST_DATABASE_SUFFIX: &str = "-test";

/// Runtime environment name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Development,
    Test,
}

impl Environment {
    /// Accepted spellings, in schema order.
    pub const NAMES: &'static [&'static str] = &["production", "development", "test"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
        }
    }

    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    pub const fn is_test(self) -> bool {
        matches!(self, Self::Test)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            _ => Err(ConfigValidationError::invalid_enum_value(
                Schema::NODE_ENV,
                Self::NAMES,
            )),
        }
    }
}

/// Complete application configuration.
///
/// Built once at startup by the config loader and handed to consumers
/// explicitly; nothing reads it from a global.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    pub env: Environment,

    /// Port the HTTP server binds to
    pub port: u16,

    pub database: DatabaseConfig,

    pub jwt: JwtConfig,

    pub email: EmailConfig,
}

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseConfig {
    /// Connection URL, already suffixed for the test environment
    pub url: String,
}

/// Token lifetimes. Fractional values are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct JwtConfig {
    pub access_expiration_minutes: f64,
    pub refresh_expiration_days: f64,
}

impl JwtConfig {
    pub fn access_ttl(&self) -> Duration {
        secs_to_duration(self.access_expiration_minutes * 60.0)
    }

    pub fn refresh_ttl(&self) -> Duration {
        secs_to_duration(self.refresh_expiration_days * 24.0 * 60.0 * 60.0)
    }
}

/// Zero for non-positive lifetimes, saturating at [`Duration::MAX`].
fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

/// Outbound email settings. Every field is optional; nothing is defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmailConfig {
    pub smtp: SmtpConfig,

    /// The from field in the emails sent by the app
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub auth: SmtpAuth,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SmtpAuth {
    pub user: Option<String>,
    pub pass: Option<String>,
}

/// How the application should send email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTransport<'a> {
    /// No SMTP host configured; sending is switched off.
    Disabled,
    Smtp {
        host: &'a str,
        port: Option<u16>,
        auth: Option<(&'a str, &'a str)>,
    },
}

impl EmailConfig {
    /// Resolve the transport. A missing host disables email entirely; auth is
    /// only used when both user and password are present.
    pub fn transport(&self) -> EmailTransport<'_> {
        let Some(host) = self.smtp.host.as_deref() else {
            return EmailTransport::Disabled;
        };
        let auth = match (self.smtp.auth.user.as_deref(), self.smtp.auth.pass.as_deref()) {
            (Some(user), Some(pass)) => Some((user, pass)),
            _ => None,
        };
        EmailTransport::Smtp {
            host,
            port: self.smtp.port,
            auth,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.smtp.host.is_some()
    }

    /// True when some email setting is present but no host is, i.e. the
    /// settings can never take effect.
    pub fn is_partially_configured(&self) -> bool {
        !self.is_enabled()
            && (self.smtp.port.is_some()
                || self.smtp.auth.user.is_some()
                || self.smtp.auth.pass.is_some()
                || self.from.is_some())
    }
}

impl AppConfig {
    /// Shape validated variables into the config tree.
    ///
    /// Required variables are guaranteed present by the schema pass; the
    /// errors here only fire if `validated` came from a different schema.
    pub fn from_validated(validated: &ValidatedEnv) -> Result<Self, ConfigValidationError> {
        let env: Environment = required_string(validated, Schema::NODE_ENV)?.parse()?;
        let port = port_number(validated, Schema::PORT)?
            .ok_or_else(|| ConfigValidationError::required(Schema::PORT))?;

        let mut url = required_string(validated, Schema::MONGODB_CONNECTION_URL)?.to_string();
        if env.is_test() {
            url.push_str(TEST_DATABASE_SUFFIX);
        }

        let jwt = JwtConfig {
            access_expiration_minutes: required_number(
                validated,
                Schema::JWT_ACCESS_EXPIRATION_MINUTES,
            )?,
            refresh_expiration_days: required_number(validated, Schema::JWT_REFRESH_EXPIRATION_DAYS)?,
        };

        let email = EmailConfig {
            smtp: SmtpConfig {
                host: optional_string(validated, Schema::SMTP_HOST),
                port: port_number(validated, Schema::SMTP_PORT)?,
                auth: SmtpAuth {
                    user: optional_string(validated, Schema::EMAIL_USERNAME),
                    pass: optional_string(validated, Schema::EMAIL_PASSWORD),
                },
            },
            from: optional_string(validated, Schema::EMAIL_FROM),
        };

        Ok(Self {
            env,
            port,
            database: DatabaseConfig { url },
            jwt,
            email,
        })
    }
}

fn required_string<'a>(
    validated: &'a ValidatedEnv,
    key: &'static str,
) -> Result<&'a str, ConfigValidationError> {
    validated
        .string(key)
        .ok_or_else(|| ConfigValidationError::required(key))
}

fn optional_string(validated: &ValidatedEnv, key: &str) -> Option<String> {
    validated.string(key).map(str::to_string)
}

fn required_number(validated: &ValidatedEnv, key: &'static str) -> Result<f64, ConfigValidationError> {
    validated
        .number(key)
        .ok_or_else(|| ConfigValidationError::required(key))
}

fn port_number(validated: &ValidatedEnv, key: &'static str) -> Result<Option<u16>, ConfigValidationError> {
    validated
        .integer(key)
        .map(|n| {
            u16::try_from(n).map_err(|_| ConfigValidationError::type_mismatch(key, "a valid port"))
        })
        .transpose()
}
