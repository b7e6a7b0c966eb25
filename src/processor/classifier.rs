//! Recursive classification of extracted files
//!
//! Files with an accepted extension are moved out of the extracted tree into
//! the destination. Everything else stays where it is, so whatever is left
//! under `Leftover/StudentFiles` is exactly what was not graded.

use std::path::Path;

use log::{debug, warn};

use crate::config::Settings;
use crate::discovery::{SubmissionWalker, WalkKind};
use crate::errors::Result;
use crate::file_ops::{MoveFailure, relocate_file};
use crate::utils::is_hidden_name;

/// Whether a file with this name belongs in the grading area
pub fn is_gradable(name: &str, settings: &Settings) -> bool {
    !is_hidden_name(name) && settings.accepted.matches(name)
}

/// Moves every gradable file below `source` into `destination`
///
/// Ignored directories are not entered and symbolic links are not followed.
/// A failed move never stops the walk: it is appended to `move_errors` and
/// the file stays at its source.
///
/// # Arguments
/// * `source` - The extracted submission
/// * `destination` - The directory receiving the files, which must exist
/// * `settings` - Accepted extensions and ignored directory names
/// * `move_errors` - Log the failed moves are appended to
///
/// # Returns
/// * `Result<usize>` - The number of files moved
///
/// # Errors
/// Returns an error only if `source` itself cannot be listed
pub fn classify_and_move(
    source: &Path,
    destination: &Path,
    settings: &Settings,
    move_errors: &mut Vec<MoveFailure>,
) -> Result<usize> {
    let mut moved: usize = 0;

    for entry in SubmissionWalker::new(source, &settings.ignored)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        match entry.kind {
            WalkKind::File if is_gradable(&entry.name, settings) => {
                match relocate_file(&entry.path, destination) {
                    Ok(_) => moved += 1,
                    Err(e) => {
                        warn!("{e}");
                        move_errors.push(MoveFailure::from_error(&entry.path, destination, &e));
                    }
                }
            }
            WalkKind::Pruned => debug!("Skipping ignored folder: {}", entry.path.display()),
            _ => {}
        }
    }

    debug!(
        "Moved {} file(s) from {} to {}",
        moved,
        source.display(),
        destination.display()
    );

    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_ops::MoveFailureCause;
    use std::fs::{create_dir, create_dir_all, read_to_string, write};
    use tempfile::tempdir;

    #[test]
    fn test_is_gradable() {
        let settings = Settings::default();

        assert!(is_gradable("main.py", &settings));
        assert!(is_gradable("DATA.CSV", &settings));
        assert!(!is_gradable(".hidden.py", &settings));
        assert!(!is_gradable("tool.exe", &settings));
        assert!(!is_gradable("py", &settings));
    }

    #[test]
    fn test_moves_accepted_files_only() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("alice_12345");
        let destination = dir.path().join("out");
        create_dir_all(source.join("project/bin")).unwrap();
        create_dir(&destination).unwrap();
        write(source.join("project/main.py"), "print(1)").unwrap();
        write(source.join("project/report.docx"), "doc").unwrap();
        write(source.join("project/.secret.py"), "hidden").unwrap();
        write(source.join("project/bin/tool.py"), "ignored").unwrap();

        let mut errors = Vec::new();
        let moved =
            classify_and_move(&source, &destination, &Settings::default(), &mut errors).unwrap();

        assert_eq!(moved, 1);
        assert!(errors.is_empty());
        assert!(destination.join("main.py").is_file());
        assert!(!source.join("project/main.py").exists());
        assert!(source.join("project/report.docx").exists());
        assert!(source.join("project/.secret.py").exists());
        assert!(source.join("project/bin/tool.py").exists());
        assert!(!destination.join("tool.py").exists());
    }

    #[test]
    fn test_collision_keeps_first_in_walk_order() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("submission");
        let destination = dir.path().join("out");
        create_dir_all(source.join("nested")).unwrap();
        create_dir(&destination).unwrap();
        write(source.join("main.py"), "top").unwrap();
        write(source.join("nested/main.py"), "nested").unwrap();

        let mut errors = Vec::new();
        let moved =
            classify_and_move(&source, &destination, &Settings::default(), &mut errors).unwrap();

        assert_eq!(moved, 1);
        assert_eq!(read_to_string(destination.join("main.py")).unwrap(), "top");
        assert!(source.join("nested/main.py").exists());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].source, source.join("nested/main.py"));
        assert_eq!(errors[0].cause, MoveFailureCause::Collision);
    }

    #[test]
    fn test_missing_source_is_error() {
        let dir = tempdir().unwrap();
        let mut errors = Vec::new();

        let result = classify_and_move(
            &dir.path().join("missing"),
            dir.path(),
            &Settings::default(),
            &mut errors,
        );

        assert!(result.is_err());
    }
}
