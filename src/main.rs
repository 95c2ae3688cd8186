//! appconf CLI entry point.

use clap::Parser;

use appconf::cli::Cli;
use appconf::infrastructure::logging::{logger, LogConfig};

fn main() {
    let cli = Cli::parse();

    let logging = LogConfig::from_env().and_then(|config| logger::init(&config));
    if let Err(err) = logging {
        appconf::cli::handle_error(&err, cli.json);
    }

    if let Err(err) = appconf::cli::run(&cli) {
        appconf::cli::handle_error(&err, cli.json);
    }
}
