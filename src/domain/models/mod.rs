pub mod config;
pub mod environment;
pub mod schema;

pub use config::{
    AppConfig, DatabaseConfig, EmailConfig, EmailTransport, Environment, JwtConfig, SmtpAuth,
    SmtpConfig, TEST_DATABASE_SUFFIX,
};
pub use environment::RawEnvironment;
pub use schema::{FieldKind, FieldSpec, FieldValue, Schema, ValidatedEnv, MAX_PORT};
