use std::path::{Component, Path, PathBuf};

use crate::constants::{ARCHIVE_SUFFIX, USERNAME_SEPARATOR};
use crate::errors::{Result, unrecognised_archive_name_error};
use crate::utils::has_suffix_ignore_case;

/// One student's archive found in the outer archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub archive: PathBuf,
    pub name: String,
}

impl Submission {
    pub fn new(archive: PathBuf, name: String) -> Self {
        Submission { archive, name }
    }

    /// The archive name without its `.zip` suffix
    pub fn stem(&self) -> &str {
        strip_archive_suffix(&self.name)
    }

    /// The username embedded in the archive name
    ///
    /// # Errors
    /// `UnrecognisedArchiveName` if no username can be read
    pub fn username(&self) -> Result<&str> {
        parse_username(&self.name)
    }

    /// Directory the archive is unpacked into
    ///
    /// # Errors
    /// `UnrecognisedArchiveName` if the stem is not a single plain folder
    /// name, such as an empty stem or `..`
    pub fn extraction_dir(&self, student_files: &Path) -> Result<PathBuf> {
        let stem = self.stem();
        let mut components = Path::new(stem).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(student_files.join(stem)),
            _ => Err(unrecognised_archive_name_error(&self.name)),
        }
    }
}

fn strip_archive_suffix(name: &str) -> &str {
    if has_suffix_ignore_case(name, ARCHIVE_SUFFIX) {
        &name[..name.len() - ARCHIVE_SUFFIX.len()]
    } else {
        name
    }
}

/// Reads the username out of a submission archive name
///
/// Platform downloads are named `<assignment>_<username>_attempt_<date>.zip`,
/// where the username is the second segment. Hand-made archives named
/// `<username>_<id>.zip` carry it in the first.
///
/// # Arguments
/// * `archive_name` - File name of the archive, with or without the suffix
///
/// # Returns
/// * `Result<&str>` - The username token
///
/// # Errors
/// `UnrecognisedArchiveName` for names with fewer than two segments, or a
/// username segment that is empty or a relative path component
pub fn parse_username(archive_name: &str) -> Result<&str> {
    let stem = strip_archive_suffix(archive_name);
    let segments: Vec<&str> = stem.split(USERNAME_SEPARATOR).collect();

    let token = match segments.len() {
        0 | 1 => None,
        2 => segments.first().copied(),
        _ => segments.get(1).copied(),
    };

    token
        .filter(|token| !token.is_empty() && *token != "." && *token != "..")
        .ok_or_else(|| unrecognised_archive_name_error(archive_name))
}
