//! Zip extraction
//!
//! Failures are split by where they happen: anything raised while reading
//! the archive is reported as `CorruptArchive`, anything raised while writing
//! the output is a `FileOperation` error.

use std::fs::{File, create_dir_all};
use std::io::{BufReader, Read, Write};
use std::path::Path;

use log::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::errors::{Result, corrupt_archive_error, file_operation_error};

/// Extracts every entry of a zip archive below `destination`
///
/// Entries whose names would escape `destination` (absolute paths or `..`
/// components) are skipped.
///
/// # Arguments
/// * `archive_path` - The archive to unpack
/// * `destination` - The directory to unpack into, created if missing
///
/// # Returns
/// * `Result<usize>` - The number of files written
///
/// # Errors
/// * `CorruptArchive` if the archive cannot be parsed or an entry fails its checksum
/// * `FileOperation` if the archive cannot be opened or the output cannot be written
pub fn extract_archive(archive_path: &Path, destination: &Path) -> Result<usize> {
    let file = File::open(archive_path)
        .map_err(|e| file_operation_error(e, archive_path.to_path_buf(), "open"))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|e| corrupt_archive_error(e, archive_path.to_path_buf()))?;

    create_dir_all(destination)
        .map_err(|e| file_operation_error(e, destination.to_path_buf(), "create directory"))?;

    let mut count: usize = 0;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| corrupt_archive_error(e, archive_path.to_path_buf()))?;

        let entry_path = match entry.enclosed_name() {
            Some(p) => p,
            None => {
                warn!(
                    "Skipping unsafe entry '{}' in {}",
                    entry.name(),
                    archive_path.display()
                );
                continue;
            }
        };

        let output_path = destination.join(entry_path);

        if entry.is_dir() {
            create_dir_all(&output_path)
                .map_err(|e| file_operation_error(e, output_path.clone(), "create directory"))?;
            continue;
        }

        if let Some(parent) = output_path.parent() {
            create_dir_all(parent)
                .map_err(|e| file_operation_error(e, parent.to_path_buf(), "create directory"))?;
        }
        // Read errors mean a damaged archive, write errors a local problem
        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .map_err(|e| corrupt_archive_error(ZipError::Io(e), archive_path.to_path_buf()))?;

        let mut outfile = File::create(&output_path)
            .map_err(|e| file_operation_error(e, output_path.clone(), "create"))?;
        outfile
            .write_all(&contents)
            .map_err(|e| file_operation_error(e, output_path.clone(), "write"))?;
        count += 1;
    }

    debug!(
        "Extracted {} files from {} into {}",
        count,
        archive_path.display(),
        destination.display()
    );

    Ok(count)
}
