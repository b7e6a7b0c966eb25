//! File discovery module
//!
//! This module contains components for listing the submissions of a batch
//! and walking the extracted contents of one submission.

mod scanner;
mod submission;
mod walker;

pub use scanner::{EntryKind, SubmissionEntry, scan_submissions};
pub use submission::{Submission, parse_username};
pub use walker::{SubmissionWalker, WalkEntry, WalkKind};
