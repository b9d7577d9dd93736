mod cli;

use anyhow::{Context, Result};
use borrowdesk::config::Config;
use borrowdesk::context::AppContext;
use borrowdesk::logging::init_tracing;
use clap::Parser;

use crate::cli::Cli;

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
        config.validate().context("Invalid --api-url")?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let ctx = AppContext::from_config(&config).context("Failed to start API client")?;
    cli::run(&ctx, cli.command).await
}
