//! Output directory provisioning
//!
//! The tool never merges into the output of an earlier run: every directory
//! of the layout must be created fresh.

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use log::debug;

use crate::constants::{LEFTOVER_DIR, READY_TO_GRADE_DIR, STUDENT_FILES_DIR, STUDENT_ZIPS_DIR};
use crate::errors::{Result, file_operation_error, preexisting_directory_error};

/// The fixed set of directories a run works in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Gradable files, optionally in per-student folders
    pub ready_to_grade: PathBuf,
    /// Parent of everything that is not gradable
    pub leftover: PathBuf,
    /// Extracted submissions
    pub student_files: PathBuf,
    /// Contents of the outer archive
    pub student_zips: PathBuf,
}

impl OutputLayout {
    /// Builds the layout under the given working root
    pub fn new(root: &Path) -> Self {
        let leftover = root.join(LEFTOVER_DIR);
        OutputLayout {
            ready_to_grade: root.join(READY_TO_GRADE_DIR),
            student_files: leftover.join(STUDENT_FILES_DIR),
            student_zips: leftover.join(STUDENT_ZIPS_DIR),
            leftover,
        }
    }

    /// The directories in creation order, parents first
    pub fn directories(&self) -> Vec<&Path> {
        vec![
            self.ready_to_grade.as_path(),
            self.leftover.as_path(),
            self.student_files.as_path(),
            self.student_zips.as_path(),
        ]
    }

    /// Creates every directory of the layout
    ///
    /// # Errors
    /// Fails on the first directory that already exists
    pub fn provision(&self) -> Result<()> {
        provision_directories(&self.directories())
    }
}

/// Creates each target directory in order
///
/// Stops at the first target that already exists; the targets after it are
/// left untouched.
///
/// # Arguments
/// * `targets` - The directories to create, parents before children
///
/// # Errors
/// * `PreexistingDirectory` if a target already exists
/// * `FileOperation` if a directory cannot be created
pub fn provision_directories(targets: &[&Path]) -> Result<()> {
    for target in targets {
        if target.exists() {
            return Err(preexisting_directory_error(target.to_path_buf()));
        }
        create_dir_all(target)
            .map_err(|e| file_operation_error(e, target.to_path_buf(), "create directory"))?;
        debug!("Created directory: {}", target.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::fs::create_dir;
    use tempfile::tempdir;

    #[test]
    fn test_layout_paths() {
        let layout = OutputLayout::new(Path::new("/grading"));

        assert_eq!(layout.ready_to_grade, PathBuf::from("/grading/ReadyToGrade"));
        assert_eq!(layout.leftover, PathBuf::from("/grading/Leftover"));
        assert_eq!(
            layout.student_files,
            PathBuf::from("/grading/Leftover/StudentFiles")
        );
        assert_eq!(
            layout.student_zips,
            PathBuf::from("/grading/Leftover/StudentZips")
        );
        assert_eq!(layout.directories().len(), 4);
    }

    #[test]
    fn test_provision_creates_layout() {
        let dir = tempdir().unwrap();
        let layout = OutputLayout::new(dir.path());

        layout.provision().unwrap();

        for path in layout.directories() {
            assert!(path.is_dir(), "{} should exist", path.display());
        }
    }

    #[test]
    fn test_provision_refuses_existing_directory() {
        let dir = tempdir().unwrap();
        let layout = OutputLayout::new(dir.path());
        create_dir(&layout.ready_to_grade).unwrap();

        let result = layout.provision();

        match result {
            Err(Error::PreexistingDirectory { path }) => {
                assert_eq!(path, layout.ready_to_grade)
            }
            other => panic!("expected PreexistingDirectory, got {other:?}"),
        }
        assert!(!layout.leftover.exists());
        assert!(!layout.student_files.exists());
    }

    #[test]
    fn test_provision_stops_midway() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        let third = dir.path().join("third");
        create_dir(&second).unwrap();

        let result = provision_directories(&[first.as_path(), second.as_path(), third.as_path()]);

        assert!(result.is_err());
        assert!(first.is_dir());
        assert!(!third.exists());
    }
}
