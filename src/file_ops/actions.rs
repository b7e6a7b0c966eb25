//! File operation functionality
//!
//! This module contains the move that carries an accepted file into the
//! grading area, and the record kept when that move fails.

use std::fmt;
use std::path::{Path, PathBuf};

use fs_extra::file::{CopyOptions, move_file};
use log::debug;

use crate::errors::{Error, Result, collision_error, file_operation_error, invalid_filename_error};

/// Why a file could not be moved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveFailureCause {
    /// A file with the same name already sits at the destination
    Collision,
    /// The filesystem refused the move
    Io(String),
}

impl fmt::Display for MoveFailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveFailureCause::Collision => write!(f, "a file with this name already exists"),
            MoveFailureCause::Io(message) => write!(f, "{message}"),
        }
    }
}

/// A move that could not be completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveFailure {
    /// The file that stayed where it was
    pub source: PathBuf,
    /// The directory it should have gone to
    pub destination: PathBuf,
    pub cause: MoveFailureCause,
}

impl MoveFailure {
    pub fn from_error(source: &Path, destination: &Path, error: &Error) -> Self {
        let cause = match error {
            Error::Collision { .. } => MoveFailureCause::Collision,
            other => MoveFailureCause::Io(other.to_string()),
        };
        MoveFailure {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            cause,
        }
    }
}

/// Moves a file into a directory, keeping its name
///
/// An existing file of the same name is never overwritten: the first file to
/// arrive wins and the later one stays at its source.
///
/// # Arguments
/// * `source` - The file to move
/// * `destination_dir` - The directory to move it into
///
/// # Returns
/// * `Result<PathBuf>` - The new location of the file
///
/// # Errors
/// * `Collision` if the destination already holds a file of that name
/// * `FileOperation` if the move itself fails
pub fn relocate_file(source: &Path, destination_dir: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| invalid_filename_error(source.to_path_buf()))?;
    let target = destination_dir.join(file_name);

    if target.symlink_metadata().is_ok() {
        return Err(collision_error(source.to_path_buf(), target));
    }

    debug!("Moving file: {} -> {}", source.display(), target.display());
    let options = CopyOptions::new();
    move_file(source, &target, &options).map_err(|e| {
        file_operation_error(std::io::Error::other(e), source.to_path_buf(), "move")
    })?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir, read_to_string, write};
    use tempfile::tempdir;

    #[test]
    fn test_relocate_file_moves() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("main.py");
        let destination = dir.path().join("out");
        write(&source, "print('hi')").unwrap();
        create_dir(&destination).unwrap();

        let target = relocate_file(&source, &destination).unwrap();

        assert_eq!(target, destination.join("main.py"));
        assert!(!source.exists());
        assert_eq!(read_to_string(target).unwrap(), "print('hi')");
    }

    #[test]
    fn test_relocate_file_first_wins() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("main.py");
        let destination = dir.path().join("out");
        create_dir(&destination).unwrap();
        write(destination.join("main.py"), "first").unwrap();
        write(&source, "second").unwrap();

        let error = relocate_file(&source, &destination).unwrap_err();

        assert!(matches!(error, Error::Collision { .. }));
        assert!(source.exists());
        assert_eq!(
            read_to_string(destination.join("main.py")).unwrap(),
            "first"
        );

        let failure = MoveFailure::from_error(&source, &destination, &error);
        assert_eq!(failure.cause, MoveFailureCause::Collision);
        assert_eq!(failure.source, source);
        assert_eq!(failure.destination, destination);
    }

    #[test]
    fn test_relocate_missing_destination() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("main.py");
        write(&source, "x").unwrap();

        let error = relocate_file(&source, &dir.path().join("missing")).unwrap_err();

        let failure = MoveFailure::from_error(&source, &dir.path().join("missing"), &error);
        assert!(matches!(failure.cause, MoveFailureCause::Io(_)));
        assert!(source.exists());
    }
}
