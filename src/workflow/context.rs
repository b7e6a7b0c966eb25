//! Run ledger
//!
//! This module defines the record a run accumulates while it works through
//! the submissions. It is created empty, appended to by the engine and read
//! once by the report.

use std::fmt;
use std::path::PathBuf;

use crate::file_ops::MoveFailure;

/// Something about a submission the grader should look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionWarning {
    /// The outer archive held something that is not a student archive
    NonArchiveEntry { name: String },
    /// A student folder received no gradable files
    EmptyDestination { path: PathBuf },
    /// No username could be read from the archive name
    UnrecognisedName { name: String },
    /// The archive could not be unpacked for a reason other than corruption
    ExtractionFailed { name: String, cause: String },
    /// The extracted files could not be walked
    SortingFailed { name: String, cause: String },
}

impl fmt::Display for SubmissionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionWarning::NonArchiveEntry { name } => {
                write!(f, "Non-archive submission found: {name}")
            }
            SubmissionWarning::EmptyDestination { path } => {
                write!(f, "Empty student directory: {}", path.display())
            }
            SubmissionWarning::UnrecognisedName { name } => {
                write!(
                    f,
                    "Cannot read a username from {name}; its files were left in place"
                )
            }
            SubmissionWarning::ExtractionFailed { name, cause } => {
                write!(f, "Failed to extract {name}: {cause}")
            }
            SubmissionWarning::SortingFailed { name, cause } => {
                write!(f, "Failed to sort the files of {name}: {cause}")
            }
        }
    }
}

/// Everything recorded during one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunLedger {
    /// Names of the archives that could not be read
    pub corrupted: Vec<String>,
    /// Names of the archives whose files were sorted
    pub successful: Vec<String>,
    pub move_errors: Vec<MoveFailure>,
    pub warnings: Vec<SubmissionWarning>,
    /// Number of student archives found
    pub submissions: usize,
    /// Number of files moved into the grading area
    pub files_moved: usize,
}

impl RunLedger {
    pub fn new() -> Self {
        RunLedger::default()
    }

    pub fn increment_submissions(&mut self) {
        self.submissions += 1;
    }

    pub fn add_files_moved(&mut self, count: usize) {
        self.files_moved += count;
    }

    pub fn record_corrupted(&mut self, name: &str) {
        self.corrupted.push(name.to_string());
    }

    pub fn record_success(&mut self, name: &str) {
        self.successful.push(name.to_string());
    }

    pub fn record_warning(&mut self, warning: SubmissionWarning) {
        self.warnings.push(warning);
    }
}
