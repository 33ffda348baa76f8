//! Data Transfer Objects for the dbt Cloud API
//!
//! Wire representations of the API payloads the watcher reads. The API wraps
//! every response body in a `{"data": ...}` envelope and carries many more
//! fields than the watcher needs; serde skips the rest.

pub mod run;
