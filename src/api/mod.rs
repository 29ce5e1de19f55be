// src/api/mod.rs

//! Typed access to the platform's v3 task endpoints.
//!
//! Requests are issued through the host's `curl` passthrough; this module
//! only builds arguments and decodes JSON.

pub mod client;
pub mod models;

pub use client::{App, StatusReport, TaskApi};
pub use models::{PaginatedTasks, Pagination, RunTaskRequest, TaskResource, TaskStatus};
