//! Command-line interface for inspecting and validating configuration.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use console::style;

use crate::domain::errors::ConfigValidationError;

/// Run the parsed command.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let loader = cli.loader();
    match &cli.command {
        Commands::Check(args) => commands::check::execute(args, &loader, cli.json),
        Commands::Show(args) => commands::show::execute(args, &loader, cli.json),
        Commands::Schema(args) => commands::schema::execute(args, &loader, cli.json),
    }
}

/// Report a fatal error and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let validation = err.downcast_ref::<ConfigValidationError>();
        let body = serde_json::json!({
            "valid": false,
            "error": format!("{err:#}"),
            "field": validation.map(|v| v.field()),
            "reason": validation.map(|v| v.reason()),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", style("error:").red().bold());
    }
    std::process::exit(1)
}
