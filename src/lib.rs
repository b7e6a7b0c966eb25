//! Sorts a batch of student submissions for grading.
//!
//! A run takes the single archive downloaded from the grading platform,
//! unpacks every student archive inside it and moves the files worth grading
//! into `ReadyToGrade`. Everything else is kept under `Leftover`, and a
//! report of the run is written next to the archive.

pub mod archive;
pub mod cli;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod errors;
pub mod file_ops;
pub mod logging;
pub mod processor;
pub mod report;
pub mod utils;
pub mod workflow;

pub mod prelude {
    pub use crate::cli::{
        check_for_stdout_stream, get_config_path, get_log_file, get_matches, get_root,
        get_verbosity,
    };
    pub use crate::config::{Config, DestinationMode, Settings, load_or_default};
    pub use crate::errors::{
        archive_count_error, collision_error, corrupt_archive_error, file_operation_error,
        generic_error, invalid_filename_error, preexisting_directory_error,
        unrecognised_archive_name_error,
    };
    pub use crate::errors::{Error, Result};
    pub use crate::logging::{LogLevel, format_message, init_logger};
    pub use crate::workflow::{ProcessingOptions, RunLedger, process_submissions, run};
}
