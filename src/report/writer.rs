use std::fs::write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;

use crate::constants::{REPORT_FILE_TIME_FORMAT, REPORT_PREFIX, TEXT_SUFFIX};
use crate::errors::{Result, file_operation_error};

/// Where the report of a run started at `timestamp` is written
pub fn report_path(root: &Path, timestamp: &DateTime<Local>) -> PathBuf {
    root.join(format!(
        "{REPORT_PREFIX}{}{TEXT_SUFFIX}",
        timestamp.format(REPORT_FILE_TIME_FORMAT)
    ))
}

/// Writes the rendered report into the working root
///
/// # Returns
/// * `Result<PathBuf>` - The path of the report file
///
/// # Errors
/// Returns an error if the file cannot be written
pub fn write_report(root: &Path, timestamp: &DateTime<Local>, text: &str) -> Result<PathBuf> {
    let path = report_path(root, timestamp);
    write(&path, text).map_err(|e| file_operation_error(e, path.clone(), "write"))?;
    info!("Report written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs::read_to_string;
    use tempfile::tempdir;

    #[test]
    fn test_report_path() {
        let timestamp = Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();

        assert_eq!(
            report_path(Path::new("/grading"), &timestamp),
            PathBuf::from("/grading/logfile_2024-03-01_09-05-07.txt")
        );
    }

    #[test]
    fn test_write_report() {
        let dir = tempdir().unwrap();
        let timestamp = Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();

        let path = write_report(dir.path(), &timestamp, "report body").unwrap();

        assert_eq!(read_to_string(path).unwrap(), "report body");
    }

    #[test]
    fn test_write_report_missing_root() {
        let dir = tempdir().unwrap();
        let timestamp = Local::now();

        assert!(write_report(&dir.path().join("missing"), &timestamp, "x").is_err());
    }
}
