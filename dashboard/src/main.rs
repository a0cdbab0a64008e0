mod analytics;
mod args;
mod client;
mod configs;
mod error;
mod models;
mod plot;
mod runner;
mod utils;

use crate::args::DashboardArgs;
use crate::client::http::HttpStatsClient;
use crate::configs::config_provider::{ConfigProvider, FileConfigProvider};
use crate::configs::validators::Validatable;
use crate::error::DashboardError;
use crate::runner::DashboardRunner;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    let args = DashboardArgs::parse();
    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(&args.log_level)))
        .init();

    let config_provider = FileConfigProvider::new(args.config.clone());
    let mut config = config_provider.load_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if args.print_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let client = HttpStatsClient::create(&config.source)?;
    info!("Starting the dashboard, stats endpoint: {}", client.stats_url());
    let mut runner = DashboardRunner::new(&config, Arc::new(client));
    runner.run().await?;
    info!("Dashboard has finished.");
    Ok(())
}
