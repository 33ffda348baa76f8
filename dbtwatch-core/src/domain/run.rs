//! Run domain types

use thiserror::Error;

/// Status of a run in dbt Cloud.
///
/// The API encodes statuses as integers; [`RunStatus::from_code`] is the only
/// way to obtain a value from the wire, so an unrecognized code is always an
/// explicit error rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// Run accepted but not yet scheduled onto a worker.
    Queued,
    /// Worker assigned, environment being prepared.
    Starting,
    /// Run actively executing.
    Running,
    /// Run completed successfully.
    Success,
    /// Run failed.
    Error,
    /// Run was cancelled.
    Cancelled,
}

/// Raised when the API reports a status code outside the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unrecognized run status code {0}")]
pub struct UnknownStatusCode(pub i64);

impl RunStatus {
    /// Decodes the API's integer status code.
    ///
    /// Returns [`UnknownStatusCode`] for anything outside the six codes the
    /// API documents.
    pub fn from_code(code: i64) -> Result<Self, UnknownStatusCode> {
        match code {
            1 => Ok(Self::Queued),
            2 => Ok(Self::Starting),
            3 => Ok(Self::Running),
            10 => Ok(Self::Success),
            20 => Ok(Self::Error),
            30 => Ok(Self::Cancelled),
            other => Err(UnknownStatusCode(other)),
        }
    }

    /// Returns true if no further state change can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error | Self::Cancelled)
    }

    /// Human-readable state name, as published to the pipeline.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Queued => "Queued",
            Self::Starting => "Starting",
            Self::Running => "Running",
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Identifies one run within its parent project.
///
/// Created once per watch session from the run-list lookup and immutable
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunHandle {
    pub run_id: u64,
    pub project_id: u64,
}

impl RunHandle {
    /// Builds the human-viewable link for this run.
    ///
    /// Pure string composition; no network access.
    pub fn viewer_url(&self, host: &str, account_id: u64) -> String {
        format!(
            "{}/accounts/{}/projects/{}/runs/{}/",
            host.trim_end_matches('/'),
            account_id,
            self.project_id,
            self.run_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_known_codes_decode() {
        let cases = [
            (1, RunStatus::Queued),
            (2, RunStatus::Starting),
            (3, RunStatus::Running),
            (10, RunStatus::Success),
            (20, RunStatus::Error),
            (30, RunStatus::Cancelled),
        ];

        for (code, expected) in cases {
            assert_eq!(RunStatus::from_code(code), Ok(expected));
        }
    }

    #[test]
    fn test_unknown_codes_fail_decode() {
        for code in [0, 4, 11, 21, 31, -1, 100] {
            assert_eq!(RunStatus::from_code(code), Err(UnknownStatusCode(code)));
        }
    }

    #[test]
    fn test_unknown_code_error_names_the_code() {
        let err = RunStatus::from_code(42).unwrap_err();
        assert_eq!(err.to_string(), "unrecognized run status code 42");
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(RunStatus::Success.is_terminal());
        assert!(RunStatus::Error.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());

        assert!(!RunStatus::Queued.is_terminal());
        assert!(!RunStatus::Starting.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(RunStatus::Queued.to_string(), "Queued");
        assert_eq!(RunStatus::Starting.to_string(), "Starting");
        assert_eq!(RunStatus::Running.to_string(), "Running");
        assert_eq!(RunStatus::Success.to_string(), "Success");
        assert_eq!(RunStatus::Error.to_string(), "Error");
        assert_eq!(RunStatus::Cancelled.to_string(), "Cancelled");
    }

    #[test]
    fn test_viewer_url() {
        let handle = RunHandle {
            run_id: 99,
            project_id: 7,
        };

        assert_eq!(
            handle.viewer_url("https://cloud.getdbt.com", 42),
            "https://cloud.getdbt.com/accounts/42/projects/7/runs/99/"
        );
    }

    #[test]
    fn test_viewer_url_trims_trailing_slash() {
        let handle = RunHandle {
            run_id: 99,
            project_id: 7,
        };

        assert_eq!(
            handle.viewer_url("https://cloud.getdbt.com/", 42),
            "https://cloud.getdbt.com/accounts/42/projects/7/runs/99/"
        );
    }
}
