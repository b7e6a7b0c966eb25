use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local};
use sysinfo::System;

use crate::config::{DestinationMode, Settings};
use crate::constants::REPORT_TIME_FORMAT;
use crate::workflow::RunLedger;

const RULE: &str = "==========================================";
const THIN_RULE: &str = "------------------------------------------";
const NONE_FOUND: &str = "  None found";
const UNKNOWN: &str = "unknown";

/// Facts about the run that are not part of the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct RunInfo {
    pub timestamp: DateTime<Local>,
    pub host: String,
    pub platform: String,
    pub version: String,
    pub mode: DestinationMode,
    pub accepted: Vec<String>,
    pub ignored: Vec<String>,
    pub elapsed: Duration,
}

impl RunInfo {
    /// Collects the run information from the current machine
    pub fn gather(settings: &Settings, elapsed: Duration) -> Self {
        RunInfo {
            timestamp: Local::now(),
            host: System::host_name().unwrap_or_else(|| UNKNOWN.to_string()),
            platform: System::long_os_version().unwrap_or_else(|| UNKNOWN.to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            mode: settings.mode,
            accepted: settings.accepted.iter().map(str::to_string).collect(),
            ignored: settings.ignored.iter().map(str::to_string).collect(),
            elapsed,
        }
    }
}

/// The text report of one run
pub struct Report<'a> {
    pub ledger: &'a RunLedger,
    pub info: &'a RunInfo,
}

impl<'a> Report<'a> {
    pub fn new(ledger: &'a RunLedger, info: &'a RunInfo) -> Self {
        Report { ledger, info }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.info;
        let ledger = self.ledger;

        writeln!(f, "{RULE}")?;
        writeln!(f, "SUBMISSION SORT REPORT")?;
        writeln!(f, "{RULE}")?;

        writeln!(f, "SYSTEM INFORMATION")?;
        writeln!(
            f,
            "  Date:              {}",
            info.timestamp.format(REPORT_TIME_FORMAT)
        )?;
        writeln!(f, "  Host:              {}", info.host)?;
        writeln!(f, "  Platform:          {}", info.platform)?;
        writeln!(f, "  Version:           {}", info.version)?;

        writeln!(f, "CONFIGURATION")?;
        writeln!(f, "  Deliverable type:  {}", info.mode)?;
        writeln!(f, "  Accepted formats:  {}", info.accepted.join(", "))?;
        writeln!(f, "  Ignored folders:   {}", info.ignored.join(", "))?;

        writeln!(f, "RUNTIME INFORMATION")?;
        writeln!(
            f,
            "  Elapsed:           {:.2} seconds",
            info.elapsed.as_secs_f64()
        )?;
        writeln!(f, "  Submissions:       {}", ledger.submissions)?;
        writeln!(f, "  Files moved:       {}", ledger.files_moved)?;
        writeln!(f, "{THIN_RULE}")?;

        section(f, "SUBMISSION WARNINGS", &ledger.warnings)?;
        section(f, "CORRUPTED ARCHIVES", &ledger.corrupted)?;

        writeln!(f, "MOVE ERRORS")?;
        if ledger.move_errors.is_empty() {
            writeln!(f, "{NONE_FOUND}")?;
        }
        for failure in &ledger.move_errors {
            writeln!(
                f,
                "  - {} -> {}: {}",
                failure.source.display(),
                failure.destination.display(),
                failure.cause
            )?;
        }

        section(f, "SUCCESSFULLY PROCESSED", &ledger.successful)?;
        write!(f, "{RULE}")
    }
}

fn section<T: fmt::Display>(f: &mut fmt::Formatter<'_>, title: &str, items: &[T]) -> fmt::Result {
    writeln!(f, "{title}")?;
    if items.is_empty() {
        writeln!(f, "{NONE_FOUND}")?;
    }
    for item in items {
        writeln!(f, "  - {item}")?;
    }
    Ok(())
}

/// Renders the report text for a ledger
pub fn render_report(ledger: &RunLedger, info: &RunInfo) -> String {
    Report::new(ledger, info).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_ops::{MoveFailure, MoveFailureCause};
    use crate::workflow::SubmissionWarning;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn sample_info() -> RunInfo {
        RunInfo {
            timestamp: Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            host: "grader".to_string(),
            platform: "Linux 6.1".to_string(),
            version: "1.2.0".to_string(),
            mode: DestinationMode::PerStudentSubdirectory,
            accepted: vec![".py".to_string(), ".txt".to_string()],
            ignored: vec!["venv".to_string()],
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_empty_ledger_says_none_found() {
        let text = render_report(&RunLedger::new(), &sample_info());

        assert_eq!(text.matches(NONE_FOUND).count(), 4);
        assert!(text.contains("  Date:              2024-03-01 09:30:00"));
        assert!(text.contains("  Deliverable type:  A (one folder per student)"));
        assert!(text.contains("  Accepted formats:  .py, .txt"));
        assert!(text.contains("  Elapsed:           1.50 seconds"));
        assert!(text.contains("  Submissions:       0"));
    }

    #[test]
    fn test_sections_list_entries() {
        let mut ledger = RunLedger::new();
        ledger.submissions = 2;
        ledger.record_corrupted("bob_67890.zip");
        ledger.record_success("alice_12345.zip");
        ledger.record_warning(SubmissionWarning::NonArchiveEntry {
            name: "notes.pdf".to_string(),
        });
        ledger.move_errors.push(MoveFailure {
            source: PathBuf::from("a/main.py"),
            destination: PathBuf::from("ReadyToGrade/alice"),
            cause: MoveFailureCause::Collision,
        });

        let text = render_report(&ledger, &sample_info());

        assert!(!text.contains(NONE_FOUND));
        assert!(text.contains("  - Non-archive submission found: notes.pdf"));
        assert!(text.contains("  - bob_67890.zip"));
        assert!(text.contains("  - alice_12345.zip"));
        assert!(text.contains(
            "  - a/main.py -> ReadyToGrade/alice: a file with this name already exists"
        ));

        let corrupted = text.find("CORRUPTED ARCHIVES").unwrap();
        let successful = text.find("SUCCESSFULLY PROCESSED").unwrap();
        assert!(corrupted < text.find("  - bob_67890.zip").unwrap());
        assert!(successful < text.find("  - alice_12345.zip").unwrap());
    }

    #[test]
    fn test_render_is_deterministic() {
        let ledger = RunLedger::new();
        let info = sample_info();

        assert_eq!(render_report(&ledger, &info), render_report(&ledger, &info));
    }

    #[test]
    fn test_timestamp_changes_one_line() {
        let ledger = RunLedger::new();
        let info = sample_info();
        let later = RunInfo {
            timestamp: Local.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap(),
            ..sample_info()
        };

        let first = render_report(&ledger, &info);
        let second = render_report(&ledger, &later);
        let differing: Vec<(&str, &str)> = first
            .lines()
            .zip(second.lines())
            .filter(|(a, b)| a != b)
            .collect();

        assert_eq!(first.lines().count(), second.lines().count());
        assert_eq!(differing.len(), 1);
        assert!(differing[0].0.starts_with("  Date:"));
    }
}
