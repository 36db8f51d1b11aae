//! Reportflow domain engine.
//!
//! Pure domain rules (validation, authorization, the report state machine,
//! search scoping, summary folding) plus the async workflows that sequence
//! them against the collaborator traits in [`store`]. No I/O lives here;
//! `reportflow-db` and `reportflow-api` provide the implementations.

pub mod authorization;
pub mod comment;
pub mod config;
pub mod error;
pub mod project;
pub mod report;
pub mod roles;
pub mod search;
pub mod store;
pub mod summary;
pub mod types;
pub mod user;
pub mod validation;
pub mod workflow;

#[cfg(test)]
mod memory;

pub use error::{CoreError, CoreResult, ErrorKind};
pub use workflow::{DailyReportWorkflow, UserWorkflow};
