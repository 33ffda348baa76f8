//! dbtwatch CLI
//!
//! CI step that watches the most recent run of a dbt Cloud job until it
//! completes and publishes the outcome to the pipeline.
//!
//! The process exits 0 once any terminal status is published, Error and
//! Cancelled included: the watch succeeded even when the run did not. Only
//! watch failures (missing configuration, unrecoverable API errors,
//! unrecognized status codes) exit non-zero.

mod config;
mod output;
mod watcher;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dbtwatch_client::CloudClient;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::watcher::RunWatcher;

/// Per-request ceiling for calls against the cloud API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(name = "dbtwatch")]
#[command(about = "Watch a dbt Cloud job run until it completes", long_about = None)]
struct Cli {
    /// API token used as the bearer credential
    #[arg(long, env = "INPUT_DBT_CLOUD_TOKEN", hide_env_values = true)]
    dbt_cloud_token: String,

    /// Account the watched job belongs to
    #[arg(long, env = "INPUT_DBT_CLOUD_ACCOUNT_ID")]
    dbt_cloud_account_id: u64,

    /// Job whose most recent run is watched
    #[arg(long, env = "INPUT_DBT_CLOUD_JOB_ID")]
    dbt_cloud_job_id: u64,

    /// Seconds to wait between status checks
    #[arg(long, env = "INPUT_INTERVAL")]
    interval: u64,

    /// Cloud host, for both the API and the viewer links
    #[arg(
        long,
        env = "INPUT_DBT_CLOUD_HOST",
        default_value = "https://cloud.getdbt.com"
    )]
    dbt_cloud_host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dbtwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        host: cli.dbt_cloud_host,
        token: cli.dbt_cloud_token,
        account_id: cli.dbt_cloud_account_id,
        job_id: cli.dbt_cloud_job_id,
        poll_interval: Duration::from_secs(cli.interval),
    };
    config.validate()?;

    info!(
        "Watching job {} on account {} (interval: {:?})",
        config.job_id, config.account_id, config.poll_interval
    );

    let http_client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;
    let client = CloudClient::with_client(
        config.host.clone(),
        config.account_id,
        &config.token,
        http_client,
    );

    let watcher = RunWatcher::new(config.clone(), Arc::new(client));
    let outcome = watcher.run().await?;

    output::publish("run_status", &outcome.status.to_string())?;
    output::publish("run_url", &outcome.run_url)?;

    Ok(())
}
