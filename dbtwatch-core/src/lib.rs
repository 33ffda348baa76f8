//! dbtwatch Core
//!
//! Core types for the dbt Cloud run watcher.
//!
//! This crate contains:
//! - Domain types: run statuses and run handles
//! - DTOs: wire representations of dbt Cloud API payloads

pub mod domain;
pub mod dto;
