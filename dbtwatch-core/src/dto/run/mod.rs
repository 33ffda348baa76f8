//! Run DTOs for the dbt Cloud API

use serde::{Deserialize, Serialize};

/// One entry of the run-list endpoint, creation-ordered.
///
/// `status` is the raw integer code; decoding is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: u64,
    pub project_id: u64,
    pub status: i64,
}

/// Payload of the run-detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDetail {
    pub id: u64,
    pub status: i64,
}

/// Envelope of `GET runs/?job_definition_id=...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunListResponse {
    pub data: Vec<RunSummary>,
}

/// Envelope of `GET runs/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDetailResponse {
    pub data: RunDetail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_list_envelope() {
        // Trimmed-down capture of a real list response; extra fields must
        // not break parsing.
        let body = r#"{
            "status": {"code": 200, "is_success": true},
            "data": [
                {"id": 101, "project_id": 7, "status": 10, "trigger_id": 1},
                {"id": 102, "project_id": 7, "status": 20, "trigger_id": 2},
                {"id": 103, "project_id": 7, "status": 3, "trigger_id": 3}
            ]
        }"#;

        let parsed: RunListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 3);

        let last = parsed.data.last().unwrap();
        assert_eq!(last.id, 103);
        assert_eq!(last.project_id, 7);
        assert_eq!(last.status, 3);
    }

    #[test]
    fn test_parse_empty_run_list() {
        let parsed: RunListResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_parse_run_detail_envelope() {
        let body = r#"{
            "status": {"code": 200},
            "data": {"id": 99, "project_id": 7, "status": 1, "duration": "00:00:12"}
        }"#;

        let parsed: RunDetailResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.id, 99);
        assert_eq!(parsed.data.status, 1);
    }
}
