//! Directory scanning functionality
//!
//! This module lists the entries unpacked from the outer archive.

use std::fs::read_dir;
use std::path::{Path, PathBuf};

use log::debug;

use crate::constants::{ARCHIVE_SUFFIX, TEXT_SUFFIX};
use crate::errors::{Result, file_operation_error};
use crate::utils::has_suffix_ignore_case;

/// What an entry of the outer archive turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A student's archive
    Archive,
    /// A receipt written by the grading platform
    PlainText,
    /// Anything else, including directories
    Other,
}

/// Information about an entry found in the outer archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionEntry {
    /// The path to the entry
    pub path: PathBuf,
    /// The file name of the entry
    pub name: String,
    pub kind: EntryKind,
}

impl SubmissionEntry {
    /// Classifies a path by its type and suffix
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let kind = if !path.is_file() {
            EntryKind::Other
        } else if has_suffix_ignore_case(&name, ARCHIVE_SUFFIX) {
            EntryKind::Archive
        } else if has_suffix_ignore_case(&name, TEXT_SUFFIX) {
            EntryKind::PlainText
        } else {
            EntryKind::Other
        };

        SubmissionEntry { path, name, kind }
    }
}

/// Lists the top level of a directory, sorted by name
///
/// # Arguments
/// * `directory` - The directory holding the contents of the outer archive
///
/// # Returns
/// * `Result<Vec<SubmissionEntry>>` - The classified entries
///
/// # Errors
/// Returns an error if the directory cannot be read
pub fn scan_submissions(directory: &Path) -> Result<Vec<SubmissionEntry>> {
    debug!("Scanning directory: {}", directory.display());

    let mut entries: Vec<SubmissionEntry> = read_dir(directory)
        .map_err(|e| file_operation_error(e, directory.to_path_buf(), "read"))?
        .filter_map(std::result::Result::ok)
        .map(|entry| SubmissionEntry::new(entry.path()))
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    debug!("Found {} entries in directory", entries.len());

    Ok(entries)
}
