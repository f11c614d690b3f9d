//! HTTP API for the device price dashboard.
//!
//! # Usage
//!
//! ```bash
//! device-dashboard
//! device-dashboard --data computer_prices_all.csv --port 5001
//! DEVICE_DASHBOARD_HOST=0.0.0.0 device-dashboard
//! ```

use anyhow::Result;
use clap::Parser;
use device_dashboard::config::Cli;
use device_dashboard::dataset;
use device_dashboard::server;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    tracing::info!(data = %cli.data.display(), "Loading device dataset");
    let table = match dataset::load(&cli.data) {
        Ok(table) => Some(table),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load dataset");
            tracing::warn!("Serving without data; data endpoints will report it as unavailable");
            None
        }
    };

    server::run_server(table, cli.server_config()).await
}
