//! Depth-first traversal of an extracted submission
//!
//! The walker keeps an explicit stack of directory listings instead of
//! recursing. Each listing is read once, sorted by name and then drained, so
//! the walk order is stable and files moved out during the walk do not
//! disturb it.

use std::fs::read_dir;
use std::path::{Path, PathBuf};
use std::vec;

use log::{debug, trace};

use crate::config::IgnoreNames;
use crate::errors::{Result, file_operation_error};

/// What the walker found at a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkKind {
    /// A regular file
    File,
    /// A directory that the walk descends into
    Directory,
    /// A directory named in the ignore list; its contents are never visited
    Pruned,
    /// Symbolic links and special files, which are never followed
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: WalkKind,
}

/// Lazy depth-first iterator over a directory tree
///
/// Entries come out in pre-order: a directory is yielded right before its
/// children. The iterator is finite and cannot be restarted.
pub struct SubmissionWalker<'a> {
    stack: Vec<vec::IntoIter<PathBuf>>,
    ignored: &'a IgnoreNames,
}

impl<'a> SubmissionWalker<'a> {
    /// Starts a walk below `root`
    ///
    /// # Errors
    /// Returns an error if `root` cannot be listed
    pub fn new(root: &Path, ignored: &'a IgnoreNames) -> Result<Self> {
        debug!("Walking {}", root.display());
        Ok(SubmissionWalker {
            stack: vec![snapshot(root)?],
            ignored,
        })
    }

    fn classify(&self, path: PathBuf) -> Result<WalkEntry> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_type = path
            .symlink_metadata()
            .map_err(|e| file_operation_error(e, path.clone(), "inspect"))?
            .file_type();

        let kind = if file_type.is_file() {
            WalkKind::File
        } else if file_type.is_dir() && self.ignored.contains(&name) {
            WalkKind::Pruned
        } else if file_type.is_dir() {
            WalkKind::Directory
        } else {
            WalkKind::Other
        };

        Ok(WalkEntry { path, name, kind })
    }
}

impl Iterator for SubmissionWalker<'_> {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let listing = self.stack.last_mut()?;
            let Some(path) = listing.next() else {
                self.stack.pop();
                continue;
            };

            let entry = match self.classify(path) {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e)),
            };
            trace!("Visiting {} ({:?})", entry.path.display(), entry.kind);

            if entry.kind == WalkKind::Directory {
                match snapshot(&entry.path) {
                    Ok(children) => self.stack.push(children),
                    Err(e) => return Some(Err(e)),
                }
            }

            return Some(Ok(entry));
        }
    }
}

/// Reads a directory listing sorted by file name
fn snapshot(directory: &Path) -> Result<vec::IntoIter<PathBuf>> {
    let mut paths: Vec<PathBuf> = read_dir(directory)
        .map_err(|e| file_operation_error(e, directory.to_path_buf(), "read"))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .collect();
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths.into_iter())
}
