//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{check::CheckArgs, schema::SchemaArgs, show::ShowArgs};
use crate::infrastructure::config::ConfigLoader;

#[derive(Parser, Debug)]
#[command(name = "appconf")]
#[command(about = "Validate and inspect environment-driven application configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Override file to read instead of ./.env
    #[arg(long, global = true, value_name = "PATH", env = "APPCONF_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Ignore any override file and use the process environment only
    #[arg(long, global = true, conflicts_with = "env_file")]
    pub no_env_file: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the environment and exit non-zero on failure
    Check(CheckArgs),

    /// Print the resolved configuration with secrets redacted
    Show(ShowArgs),

    /// List the variables the loader recognizes
    Schema(SchemaArgs),
}

impl Cli {
    /// Build the loader described by the global flags.
    pub fn loader(&self) -> ConfigLoader {
        let loader = ConfigLoader::new();
        if self.no_env_file {
            loader.without_env_file()
        } else if let Some(path) = &self.env_file {
            loader.with_env_file(path)
        } else {
            loader
        }
    }
}
