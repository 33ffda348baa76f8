//! Run watcher
//!
//! Watches the most recent run of a job until it reaches a terminal status.
//! The session is an explicit state machine: locate the run, wait out the
//! start-up grace period, then check status at a fixed interval. Each check
//! performs exactly one API read; a failed transition fails the whole
//! session.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use colored::*;
use dbtwatch_client::CloudClient;
use dbtwatch_core::domain::run::{RunHandle, RunStatus};
use dbtwatch_core::dto::run::RunDetail;
use tokio::time::{self, Duration};
use tracing::{debug, warn};

use crate::config::Config;

/// Delay before the first status check, absorbing run start-up latency.
const INITIAL_GRACE: Duration = Duration::from_secs(10);

/// Retry policy for transient API failures within a session.
const MAX_FETCH_ATTEMPTS: u32 = 5;
const INITIAL_BACKOFF_MS: u64 = 500;
const MAX_BACKOFF_MS: u64 = 8_000;

/// Read-only view of the cloud API used by the watcher.
///
/// Trait-based to enable testing with scripted status sequences.
#[async_trait]
pub trait RunStatusSource: Send + Sync {
    /// Returns a handle to the most recently created run of the job.
    async fn locate_run(&self, job_id: u64) -> dbtwatch_client::Result<RunHandle>;

    /// Fetches the current state of a run.
    async fn fetch_run(&self, run_id: u64) -> dbtwatch_client::Result<RunDetail>;
}

#[async_trait]
impl RunStatusSource for CloudClient {
    async fn locate_run(&self, job_id: u64) -> dbtwatch_client::Result<RunHandle> {
        self.most_recent_run(job_id).await
    }

    async fn fetch_run(&self, run_id: u64) -> dbtwatch_client::Result<RunDetail> {
        self.get_run(run_id).await
    }
}

/// Final result of a watch session.
#[derive(Debug, Clone)]
pub struct WatchOutcome {
    /// Terminal status the watched run reached.
    pub status: RunStatus,
    /// Human-viewable link to the run.
    pub run_url: String,
}

/// Watch session states.
///
/// A failed transition is the session's failure state: it surfaces as the
/// `Err` arm of [`RunWatcher::run`] instead of a variant here.
enum WatchState {
    /// Looking up the most recent run of the job.
    Locating,
    /// Run located, waiting out the start-up grace period.
    InitialWait { handle: RunHandle },
    /// Checking run status at the configured interval.
    Polling { handle: RunHandle },
    /// The run reached a terminal status.
    Terminal { handle: RunHandle, status: RunStatus },
}

/// Watches a single job run until it reaches a terminal status.
pub struct RunWatcher {
    config: Config,
    source: Arc<dyn RunStatusSource>,
}

impl RunWatcher {
    /// Creates a new watcher over the given API source
    pub fn new(config: Config, source: Arc<dyn RunStatusSource>) -> Self {
        Self { config, source }
    }

    /// Runs the watch session to completion.
    ///
    /// The loop is unbounded: only a terminal run status ends it. Transient
    /// API failures are retried with backoff; anything else aborts the
    /// session.
    pub async fn run(&self) -> Result<WatchOutcome> {
        let started = Utc::now();
        let mut state = WatchState::Locating;

        loop {
            state = match state {
                WatchState::Locating => self.locate().await?,
                WatchState::InitialWait { handle } => {
                    debug!("Waiting {:?} before the first status check", INITIAL_GRACE);
                    time::sleep(INITIAL_GRACE).await;
                    WatchState::Polling { handle }
                }
                WatchState::Polling { handle } => self.check_status(handle).await?,
                WatchState::Terminal { handle, status } => {
                    let elapsed = Utc::now().signed_duration_since(started).num_seconds();
                    let run_url = self.run_url(&handle);

                    println!();
                    println!(
                        "{} Run {} finished with status {} after {}s",
                        "▸".cyan(),
                        handle.run_id.to_string().bold(),
                        colorize_status(status),
                        elapsed
                    );
                    println!("  {}", run_url.dimmed());

                    return Ok(WatchOutcome { status, run_url });
                }
            };
        }
    }

    /// Locating: resolve the job's most recent run into a handle.
    async fn locate(&self) -> Result<WatchState> {
        let source = Arc::clone(&self.source);
        let job_id = self.config.job_id;

        let handle = with_retry("Run lookup", async || source.locate_run(job_id).await)
            .await
            .context("Failed to locate the most recent run")?;

        println!(
            "{} Watching run {} of job {}",
            "▸".cyan(),
            handle.run_id.to_string().bold(),
            job_id.to_string().dimmed()
        );
        println!("  {}", self.run_url(&handle).dimmed());

        Ok(WatchState::InitialWait { handle })
    }

    /// Polling: one status check, then either terminate or wait out the
    /// configured interval.
    async fn check_status(&self, handle: RunHandle) -> Result<WatchState> {
        let source = Arc::clone(&self.source);
        let run_id = handle.run_id;

        let detail = with_retry("Status fetch", async || source.fetch_run(run_id).await)
            .await
            .context("Failed to fetch run status")?;

        let status = RunStatus::from_code(detail.status)
            .context("Remote reported a status the watcher does not recognize")?;

        println!(
            "{} Status: {} {}",
            Utc::now().format("%H:%M:%S").to_string().dimmed(),
            colorize_status(status),
            self.run_url(&handle).dimmed()
        );

        if status.is_terminal() {
            Ok(WatchState::Terminal { handle, status })
        } else {
            time::sleep(self.config.poll_interval).await;
            Ok(WatchState::Polling { handle })
        }
    }

    fn run_url(&self, handle: &RunHandle) -> String {
        handle.viewer_url(&self.config.host, self.config.account_id)
    }
}

/// Retries an API call on transient failures with exponential backoff.
///
/// Permanent errors and an exhausted attempt budget surface to the caller.
async fn with_retry<T>(
    what: &str,
    mut op: impl AsyncFnMut() -> dbtwatch_client::Result<T>,
) -> dbtwatch_client::Result<T> {
    let mut attempt = 0;
    let mut delay_ms = INITIAL_BACKOFF_MS;

    loop {
        attempt += 1;

        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < MAX_FETCH_ATTEMPTS => {
                warn!(
                    "{} failed (attempt {}/{}): {}",
                    what, attempt, MAX_FETCH_ATTEMPTS, e
                );
                warn!("Retrying in {} ms...", delay_ms);

                time::sleep(Duration::from_millis(delay_ms)).await;

                delay_ms = (delay_ms * 2).min(MAX_BACKOFF_MS);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Colorize a run status for display
fn colorize_status(status: RunStatus) -> colored::ColoredString {
    let name = status.to_string();
    match status {
        RunStatus::Queued => name.yellow(),
        RunStatus::Starting => name.cyan(),
        RunStatus::Running => name.cyan(),
        RunStatus::Success => name.green(),
        RunStatus::Error => name.red(),
        RunStatus::Cancelled => name.dimmed(),
    }
}
