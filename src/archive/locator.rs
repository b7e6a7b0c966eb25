//! Outer archive discovery

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern, glob_with};
use log::debug;

use crate::constants::ARCHIVE_SUFFIX;
use crate::errors::{
    Error, Result, archive_count_error, file_operation_error, glob_pattern_error,
    invalid_filename_error,
};

/// Finds the single archive downloaded into the working root
///
/// Only the top level of `root` is searched and the suffix match ignores case.
///
/// # Arguments
/// * `root` - The working root
///
/// # Returns
/// * `Result<PathBuf>` - The path of the outer archive
///
/// # Errors
/// * `ArchiveCount` if there is not exactly one archive
/// * `InvalidFilename` if `root` is not valid unicode
pub fn locate_outer_archive(root: &Path) -> Result<PathBuf> {
    let root_str = root
        .to_str()
        .ok_or_else(|| invalid_filename_error(root.to_path_buf()))?;
    let pattern = format!("{}/*{}", Pattern::escape(root_str), ARCHIVE_SUFFIX);

    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let archives: Vec<PathBuf> = glob_with(&pattern, options)
        .map_err(|e| glob_pattern_error(e, &pattern))?
        .map(|res| {
            res.map_err(|e| {
                file_operation_error(std::io::Error::from(e), root.to_path_buf(), "read")
            })
        })
        .collect::<std::result::Result<Vec<PathBuf>, Error>>()?
        .into_iter()
        .filter(|path| path.is_file())
        .collect();

    debug!(
        "Found {} archive(s) in {}",
        archives.len(),
        root.display()
    );

    match archives.as_slice() {
        [archive] => Ok(archive.clone()),
        _ => Err(archive_count_error(root.to_path_buf(), archives.len())),
    }
}
