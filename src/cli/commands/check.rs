//! Implementation of the `appconf check` command.

use anyhow::Result;
use clap::Args;
use console::style;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{AppConfig, Environment};
use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Print nothing on success
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct CheckOutput {
    pub valid: bool,
    pub env: Environment,
    pub port: u16,
    pub email_enabled: bool,
}

impl CheckOutput {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            valid: true,
            env: config.env,
            port: config.port,
            email_enabled: config.email.is_enabled(),
        }
    }
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let email = if self.email_enabled { "enabled" } else { "disabled" };
        format!(
            "{} configuration valid (env: {}, port: {}, email: {email})",
            style("✓").green(),
            self.env,
            self.port
        )
    }
}

pub fn execute(args: &CheckArgs, loader: &ConfigLoader, json_mode: bool) -> Result<()> {
    let config = loader.load()?;
    if !args.quiet {
        output(&CheckOutput::from_config(&config), json_mode);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RawEnvironment;

    #[test]
    fn test_check_output_summarizes_config() {
        let raw: RawEnvironment = [
            ("NODE_ENV", "test"),
            ("MONGODB_CONNECTION_URL", "mongodb://localhost/db"),
            ("SMTP_HOST", "localhost"),
        ]
        .into_iter()
        .collect();
        let config = ConfigLoader::new().load_from(&raw).unwrap();

        let out = CheckOutput::from_config(&config);
        assert!(out.valid);
        assert!(out.email_enabled);

        let json = out.to_json();
        assert_eq!(json["env"], "test");
        assert_eq!(json["port"], 3000);
        assert!(out.to_human().contains("env: test, port: 3000, email: enabled"));
    }
}
