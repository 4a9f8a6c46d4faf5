//! `hetzner-dns` command-line entry point
//!
//! Results go to stdout, logs and errors to stderr. Exit status is 0 on
//! success and 1 on any error.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use hetzner_dns_core::CoreError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match commands::run(cli).await {
        Ok(output) => output.render().map_err(anyhow::Error::from),
        Err(e) => Err(e),
    };

    match result {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let expected = e
                .downcast_ref::<CoreError>()
                .is_some_and(CoreError::is_expected);
            if expected {
                tracing::debug!("{e:#}");
            } else {
                tracing::error!("{e:#}");
            }
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}
