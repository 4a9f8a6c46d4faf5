//! Command execution

mod record;
mod zone;

use std::sync::Arc;

use anyhow::Context;
use hetzner_dns_core::ServiceContext;
use hetzner_dns_provider::HetznerDnsClient;

use crate::cli::{Cli, Commands};
use crate::output::Output;

/// Builds the API client from the global options and runs the subcommand.
pub async fn run(cli: Cli) -> anyhow::Result<Output> {
    let token = cli
        .token
        .filter(|t| !t.trim().is_empty())
        .context("No API token: pass --token or set HETZNER_DNS_TOKEN")?;

    let client = HetznerDnsClient::builder(token)
        .base_url(cli.api_url)
        .max_retries(cli.max_retries)
        .build()?;
    let ctx = Arc::new(ServiceContext::new(Arc::new(client)));

    match cli.command {
        Commands::Zone(cmd) => zone::run(ctx, cmd).await,
        Commands::Record(cmd) => record::run(ctx, cmd).await,
    }
}
