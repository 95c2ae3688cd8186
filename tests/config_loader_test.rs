//! Integration tests for loading configuration from the process environment
//! and the override file.

mod common;

use appconf::{ConfigLoader, Environment, ValidationReason};
use common::{minimal_env, raw, unset_schema_vars, write_env_file};

/// Run `f` with the schema variables cleared and `vars` set.
fn with_env<R>(vars: &[(&'static str, &'static str)], f: impl FnOnce() -> R) -> R {
    let mut kvs = unset_schema_vars();
    kvs.push(("DOTENV_DISABLED", None));
    for &(key, value) in vars {
        kvs.retain(|(k, _)| *k != key);
        kvs.push((key, Some(value)));
    }
    temp_env::with_vars(kvs, f)
}

#[test]
fn test_defaults_for_development() {
    let config = ConfigLoader::new()
        .load_from(&minimal_env("development"))
        .unwrap();

    assert_eq!(config.env, Environment::Development);
    assert_eq!(config.port, 3000);
    assert_eq!(config.database.url, "mongodb://localhost/db");
    assert_eq!(config.jwt.access_expiration_minutes, 30.0);
    assert_eq!(config.jwt.refresh_expiration_days, 30.0);
    assert_eq!(config.email.smtp.host, None);
    assert_eq!(config.email.smtp.port, None);
    assert_eq!(config.email.smtp.auth.user, None);
    assert_eq!(config.email.smtp.auth.pass, None);
    assert_eq!(config.email.from, None);
}

#[test]
fn test_test_environment_suffix() {
    let loader = ConfigLoader::new();

    let test = loader.load_from(&minimal_env("test")).unwrap();
    assert_eq!(test.database.url, "mongodb://localhost/db-test");

    let production = loader.load_from(&minimal_env("production")).unwrap();
    assert_eq!(production.database.url, "mongodb://localhost/db");
}

#[test]
fn test_explicit_values_override_defaults() {
    let config = ConfigLoader::new()
        .load_from(&raw(&[
            ("NODE_ENV", "production"),
            ("PORT", "8080"),
            ("MONGODB_CONNECTION_URL", "mongodb://db/prod"),
            ("JWT_ACCESS_EXPIRATION_MINUTES", "15"),
            ("JWT_REFRESH_EXPIRATION_DAYS", "7"),
        ]))
        .unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.jwt.access_expiration_minutes, 15.0);
    assert_eq!(config.jwt.refresh_expiration_days, 7.0);
}

#[test]
fn test_empty_optional_string_is_fatal() {
    let mut env = minimal_env("production");
    env.insert("EMAIL_FROM", "");

    let err = ConfigLoader::new().load_from(&env).unwrap_err();
    assert_eq!(err.field(), "EMAIL_FROM");
    assert_eq!(err.reason(), ValidationReason::Empty);
}

#[test]
fn test_smtp_port_type_mismatch() {
    let mut env = minimal_env("production");
    env.insert("SMTP_PORT", "smtp");

    let err = ConfigLoader::new().load_from(&env).unwrap_err();
    assert_eq!(err.field(), "SMTP_PORT");
    assert_eq!(err.reason(), ValidationReason::TypeMismatch);
}

#[test]
fn test_load_reads_process_environment() {
    with_env(
        &[
            ("NODE_ENV", "test"),
            ("MONGODB_CONNECTION_URL", "mongodb://localhost/app"),
            ("PORT", "4000"),
        ],
        || {
            let config = ConfigLoader::new().without_env_file().load().unwrap();
            assert_eq!(config.env, Environment::Test);
            assert_eq!(config.port, 4000);
            assert_eq!(config.database.url, "mongodb://localhost/app-test");
        },
    );
}

#[test]
fn test_load_fails_without_node_env() {
    with_env(&[("MONGODB_CONNECTION_URL", "mongodb://localhost/app")], || {
        let err = ConfigLoader::new().without_env_file().load().unwrap_err();
        assert_eq!(err.field(), "NODE_ENV");
        assert_eq!(err.reason(), ValidationReason::Required);
    });
}

#[test]
fn test_override_file_fills_gaps() {
    let (_dir, path) = write_env_file(
        "NODE_ENV=development\n\
         MONGODB_CONNECTION_URL=mongodb://localhost/fromfile\n\
         SMTP_HOST=mail.local\n",
    );

    with_env(&[("NODE_ENV", "production")], || {
        let config = ConfigLoader::new().with_env_file(&path).load().unwrap();

        // The live environment wins over the file.
        assert_eq!(config.env, Environment::Production);
        assert_eq!(config.database.url, "mongodb://localhost/fromfile");
        assert_eq!(config.email.smtp.host.as_deref(), Some("mail.local"));
    });
}

#[test]
fn test_override_file_does_not_modify_process_env() {
    let (_dir, path) = write_env_file("NODE_ENV=development\nMONGODB_CONNECTION_URL=mongodb://x/y\n");

    with_env(&[], || {
        ConfigLoader::new().with_env_file(&path).load().unwrap();
        assert!(std::env::var("NODE_ENV").is_err());
        assert!(std::env::var("MONGODB_CONNECTION_URL").is_err());
    });
}

#[test]
fn test_missing_override_file_is_ignored() {
    let dir = tempfile::tempdir().unwrap();

    with_env(
        &[
            ("NODE_ENV", "development"),
            ("MONGODB_CONNECTION_URL", "mongodb://localhost/db"),
        ],
        || {
            let config = ConfigLoader::new()
                .with_env_file(dir.path().join(".env"))
                .load()
                .unwrap();
            assert_eq!(config.port, 3000);
        },
    );
}

#[test]
fn test_dotenv_disabled_skips_file() {
    let (_dir, path) = write_env_file("NODE_ENV=development\nMONGODB_CONNECTION_URL=mongodb://x/y\n");

    with_env(&[("DOTENV_DISABLED", "1")], || {
        let err = ConfigLoader::new().with_env_file(&path).load().unwrap_err();
        assert_eq!(err.field(), "NODE_ENV");
    });
}

#[test]
fn test_malformed_override_lines_are_skipped() {
    let (_dir, path) = write_env_file(
        "NODE_ENV=development\n\
         export-me please\n\
         MONGODB_CONNECTION_URL=mongodb://localhost/fromfile\n",
    );

    with_env(&[], || {
        let config = ConfigLoader::new().with_env_file(&path).load().unwrap();
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.database.url, "mongodb://localhost/fromfile");
    });
}

#[test]
fn test_override_file_values_are_literal() {
    let (_dir, path) = write_env_file(
        "NODE_ENV=production\n\
         MONGODB_CONNECTION_URL=mongodb://app:p$ss@db/prod\n\
         SMTP_HOST=mail.local\n\
         EMAIL_PASSWORD=pa$word1\n",
    );

    with_env(&[], || {
        let config = ConfigLoader::new().with_env_file(&path).load().unwrap();
        assert_eq!(config.email.smtp.auth.pass.as_deref(), Some("pa$word1"));
        assert_eq!(config.database.url, "mongodb://app:p$ss@db/prod");
    });
}

#[test]
fn test_empty_node_env_is_invalid_enum_value() {
    let mut env = minimal_env("production");
    env.insert("NODE_ENV", "");

    let err = ConfigLoader::new().load_from(&env).unwrap_err();
    assert_eq!(err.field(), "NODE_ENV");
    assert_eq!(err.reason(), ValidationReason::InvalidEnumValue);
}

#[test]
fn test_fractional_access_expiration_loads() {
    let mut env = minimal_env("production");
    env.insert("JWT_ACCESS_EXPIRATION_MINUTES", "0.5");

    let config = ConfigLoader::new().load_from(&env).unwrap();
    assert_eq!(config.jwt.access_expiration_minutes, 0.5);
    assert_eq!(config.jwt.access_ttl(), std::time::Duration::from_secs(30));
}
