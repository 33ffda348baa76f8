//! Run-related API endpoints

use tracing::debug;

use crate::CloudClient;
use crate::error::{ClientError, Result};
use dbtwatch_core::domain::run::RunHandle;
use dbtwatch_core::dto::run::{RunDetail, RunDetailResponse, RunListResponse, RunSummary};

impl CloudClient {
    /// List the runs of a job, in the API's creation order
    ///
    /// # Arguments
    /// * `job_id` - The job definition whose runs to list
    ///
    /// # Returns
    /// The ordered run entries, oldest first
    pub async fn list_runs_for_job(&self, job_id: u64) -> Result<Vec<RunSummary>> {
        let url = format!("{}/runs/?job_definition_id={}", self.base_url(), job_id);
        debug!("GET {}", url);
        let response = self.get(&url).send().await?;

        let body: RunListResponse = self.handle_response(response).await?;
        Ok(body.data)
    }

    /// Locate the most recently created run of a job
    ///
    /// Takes the last entry of the creation-ordered run list as most recent.
    ///
    /// # Arguments
    /// * `job_id` - The job definition to look up
    ///
    /// # Returns
    /// A handle naming the run and its parent project, or
    /// [`ClientError::NotFound`] if the job has no runs at all
    pub async fn most_recent_run(&self, job_id: u64) -> Result<RunHandle> {
        let runs = self.list_runs_for_job(job_id).await?;

        latest_handle(&runs)
            .ok_or_else(|| ClientError::NotFound(format!("no runs found for job {}", job_id)))
    }

    /// Get a run by ID
    ///
    /// # Arguments
    /// * `run_id` - The run to fetch
    ///
    /// # Returns
    /// The run details, with the status still in its raw integer encoding
    pub async fn get_run(&self, run_id: u64) -> Result<RunDetail> {
        let url = format!("{}/runs/{}", self.base_url(), run_id);
        debug!("GET {}", url);
        let response = self.get(&url).send().await?;

        let body: RunDetailResponse = self.handle_response(response).await?;
        Ok(body.data)
    }
}

/// Pick the most recent entry of a creation-ordered run list
fn latest_handle(runs: &[RunSummary]) -> Option<RunHandle> {
    runs.last().map(|run| RunHandle {
        run_id: run.id,
        project_id: run.project_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: u64, project_id: u64, status: i64) -> RunSummary {
        RunSummary {
            id,
            project_id,
            status,
        }
    }

    #[test]
    fn test_latest_handle_takes_last_entry() {
        let runs = vec![
            summary(101, 7, 10),
            summary(102, 7, 20),
            summary(103, 7, 3),
        ];

        assert_eq!(
            latest_handle(&runs),
            Some(RunHandle {
                run_id: 103,
                project_id: 7,
            })
        );
    }

    #[test]
    fn test_latest_handle_ignores_order_of_earlier_entries() {
        let runs = vec![
            summary(102, 7, 20),
            summary(101, 7, 10),
            summary(103, 7, 3),
        ];

        assert_eq!(latest_handle(&runs).map(|h| h.run_id), Some(103));
    }

    #[test]
    fn test_latest_handle_empty_list() {
        assert_eq!(latest_handle(&[]), None);
    }
}
