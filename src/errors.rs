use glob::PatternError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use zip::result::ZipError;

/// Custom error type for the submission sorter
#[derive(Debug)]
pub enum Error {
    /// Error related to file operations
    FileOperation {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// Error related to glob pattern matching
    GlobPattern {
        source: PatternError,
        pattern: String,
    },
    /// Error related to configuration parsing
    ConfigParsing {
        source: Box<dyn StdError + Send + Sync>,
        detail: String,
    },
    /// A configuration value is not acceptable
    InvalidConfig { detail: String },
    /// Error when a filename is not valid Unicode
    InvalidFilename { path: PathBuf },
    /// An output directory is left over from a previous run
    PreexistingDirectory { path: PathBuf },
    /// The working root does not hold exactly one archive
    ArchiveCount { root: PathBuf, found: usize },
    /// An archive cannot be opened or read back
    CorruptArchive { source: ZipError, path: PathBuf },
    /// The username cannot be read from an archive name
    UnrecognisedArchiveName { name: String },
    /// A file of the same name already sits at the destination
    Collision { path: PathBuf, existing: PathBuf },
    /// Generic error with a message
    Generic { message: String },
}

impl Error {
    /// Whether the error stems from a damaged archive rather than from the local filesystem
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::CorruptArchive { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileOperation {
                path,
                operation,
                source,
            } => {
                write!(f, "Failed to {} {}: {}", operation, path.display(), source)
            }
            Error::GlobPattern { pattern, .. } => {
                write!(f, "Invalid glob pattern: {pattern}")
            }
            Error::ConfigParsing { detail, .. } => {
                write!(f, "Configuration parsing error: {detail}")
            }
            Error::InvalidConfig { detail } => {
                write!(f, "Invalid configuration: {detail}")
            }
            Error::InvalidFilename { path } => {
                write!(f, "Filename is not valid unicode: {}", path.display())
            }
            Error::PreexistingDirectory { path } => {
                write!(
                    f,
                    "Directory already exists: {}\nMove the archive to a clean directory and try again",
                    path.display()
                )
            }
            Error::ArchiveCount { root, found: 0 } => {
                write!(f, "Could not find any .zip files in {}", root.display())
            }
            Error::ArchiveCount { root, found } => {
                write!(
                    f,
                    "Too many .zip files in {} (found {found}, expected exactly one)",
                    root.display()
                )
            }
            Error::CorruptArchive { path, source } => {
                write!(f, "Corrupted archive {}: {}", path.display(), source)
            }
            Error::UnrecognisedArchiveName { name } => {
                write!(f, "Cannot read a username from archive name '{name}'")
            }
            Error::Collision { path, existing } => {
                write!(
                    f,
                    "Cannot move {}: {} already exists",
                    path.display(),
                    existing.display()
                )
            }
            Error::Generic { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::FileOperation { source, .. } => Some(source),
            Error::GlobPattern { source, .. } => Some(source),
            Error::ConfigParsing { source, .. } => Some(source.as_ref()),
            Error::CorruptArchive { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Custom Result type for the submission sorter
///
/// # Examples
/// ```
/// use submission_sort::prelude::{Result, generic_error};
///
/// fn example_function() -> Result<String> {
///     // Return success
///     Ok("success".to_string())
///
///     // Or return an error
///     // Err(generic_error("Something went wrong"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create a file operation error
pub fn file_operation_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    Error::FileOperation {
        source: err,
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create a glob pattern error
pub fn glob_pattern_error(err: PatternError, pattern: &str) -> Error {
    Error::GlobPattern {
        source: err,
        pattern: pattern.to_string(),
    }
}

/// Helper function to create a config parsing error
pub fn config_parsing_error<E: StdError + Send + Sync + 'static>(err: E, detail: &str) -> Error {
    Error::ConfigParsing {
        source: Box::new(err),
        detail: detail.to_string(),
    }
}

/// Helper function to create an invalid configuration error
pub fn invalid_config_error(detail: &str) -> Error {
    Error::InvalidConfig {
        detail: detail.to_string(),
    }
}

/// Helper function to create an invalid filename error
pub fn invalid_filename_error(path: PathBuf) -> Error {
    Error::InvalidFilename { path }
}

/// Helper function to create a pre-existing directory error
pub fn preexisting_directory_error(path: PathBuf) -> Error {
    Error::PreexistingDirectory { path }
}

/// Helper function to create an archive count error
pub fn archive_count_error(root: PathBuf, found: usize) -> Error {
    Error::ArchiveCount { root, found }
}

/// Helper function to create a corrupt archive error
pub fn corrupt_archive_error(err: ZipError, path: PathBuf) -> Error {
    Error::CorruptArchive { source: err, path }
}

/// Helper function to create an unrecognised archive name error
pub fn unrecognised_archive_name_error(name: &str) -> Error {
    Error::UnrecognisedArchiveName {
        name: name.to_string(),
    }
}

/// Helper function to create a move collision error
pub fn collision_error(path: PathBuf, existing: PathBuf) -> Error {
    Error::Collision { path, existing }
}

/// Helper function to create a generic error
pub fn generic_error(message: &str) -> Error {
    Error::Generic {
        message: message.to_string(),
    }
}
