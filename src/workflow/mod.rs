//! Workflow module
//!
//! This module contains components for orchestrating a sorting run.

mod context;
mod engine;

pub use context::{RunLedger, SubmissionWarning};
pub use engine::{ProcessingOptions, RunOutcome, process_submissions, run};
