//! Implementation of the `appconf show` command.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{or_unset, output, CommandOutput};
use crate::domain::models::AppConfig;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::SecretScrubber;

#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Also list variables the schema ignored
    #[arg(long)]
    pub ignored: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct ShowOutput {
    pub config: AppConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<Vec<String>>,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let c = &self.config;
        let smtp = &c.email.smtp;
        let mut lines = vec![
            format!("env:      {}", c.env),
            format!("port:     {}", c.port),
            "database:".to_string(),
            format!("  url:    {}", c.database.url),
            "jwt:".to_string(),
            format!("  access_expiration_minutes: {}", c.jwt.access_expiration_minutes),
            format!("  refresh_expiration_days:   {}", c.jwt.refresh_expiration_days),
            "email:".to_string(),
            format!("  smtp.host:      {}", or_unset(smtp.host.as_deref())),
            format!("  smtp.port:      {}", or_unset(smtp.port.as_ref())),
            format!("  smtp.auth.user: {}", or_unset(smtp.auth.user.as_deref())),
            format!("  smtp.auth.pass: {}", or_unset(smtp.auth.pass.as_deref())),
            format!("  from:           {}", or_unset(c.email.from.as_deref())),
        ];
        if let Some(ignored) = &self.ignored {
            lines.push(format!("ignored:  {} variable(s)", ignored.len()));
            lines.extend(ignored.iter().map(|key| format!("  - {key}")));
        }
        lines.join("\n")
    }
}

pub fn execute(args: &ShowArgs, loader: &ConfigLoader, json_mode: bool) -> Result<()> {
    let raw = loader.raw_environment();
    let config = loader.load_from(&raw)?;
    let scrubber = SecretScrubber::new().context("Failed to build secret scrubber")?;

    let ignored = args.ignored.then(|| {
        raw.iter()
            .filter(|(key, _)| loader.schema().get(key).is_none())
            .map(|(key, _)| key.to_string())
            .collect()
    });

    output(
        &ShowOutput {
            config: scrubber.redact_config(&config),
            ignored,
        },
        json_mode,
    );
    Ok(())
}
