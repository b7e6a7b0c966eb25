//! Workflow engine
//!
//! This module contains the engine that orchestrates a sorting run.

use std::collections::BTreeSet;
use std::fs::{create_dir_all, read_dir};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, error, info, warn};

use crate::archive::{extract_archive, locate_outer_archive};
use crate::config::{DestinationMode, Settings};
use crate::discovery::{EntryKind, Submission, scan_submissions};
use crate::errors::file_operation_error;
use crate::file_ops::{MoveFailure, OutputLayout};
use crate::processor::classify_and_move;
use crate::report::{RunInfo, render_report, write_report};

use super::context::{RunLedger, SubmissionWarning};

/// Options for a sorting run
#[derive(Debug, Clone)]
pub struct ProcessingOptions {
    /// The directory holding the downloaded archive
    pub root: PathBuf,
    pub settings: Settings,
}

/// Result of a sorting run, before it is reported
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub ledger: RunLedger,
    pub layout: OutputLayout,
    pub elapsed: Duration,
}

/// Sorts the submissions found under the working root
///
/// This function orchestrates the workflow steps:
/// 1. Locate the single outer archive
/// 2. Create the output layout
/// 3. Unpack the outer archive into `Leftover/StudentZips`
/// 4. Unpack every student archive and move its gradable files
/// 5. Flag student folders that stayed empty
///
/// # Arguments
/// * `options` - Working root and settings
///
/// # Returns
/// * `Result<RunOutcome>` - The ledger of the run
///
/// # Errors
/// Returns an error for the conditions that stop the run before any
/// submission is handled: a wrong archive count, existing output folders or a
/// corrupt outer archive. Problems with single submissions end up in the
/// ledger instead.
pub fn process_submissions(options: &ProcessingOptions) -> Result<RunOutcome> {
    let start = Instant::now();
    let settings = &options.settings;

    // Step 1: Locate the outer archive
    let outer = locate_outer_archive(&options.root)?;
    info!("Found archive: {}", outer.display());

    // Step 2: Create the output layout
    let layout = OutputLayout::new(&options.root);
    layout.provision()?;

    // Step 3: Unpack the outer archive
    extract_archive(&outer, &layout.student_zips)?;

    // Step 4: Handle each student archive
    let mut ledger = RunLedger::new();
    let mut destinations: BTreeSet<PathBuf> = BTreeSet::new();

    let entries = scan_submissions(&layout.student_zips)?;
    info!("Processing {} entries...", entries.len());

    for entry in entries {
        match entry.kind {
            EntryKind::Archive => {
                let submission = Submission::new(entry.path, entry.name);
                process_submission(
                    &submission,
                    &layout,
                    settings,
                    &mut ledger,
                    &mut destinations,
                );
            }
            EntryKind::PlainText => debug!("Skipping receipt: {}", entry.name),
            EntryKind::Other => {
                warn!("Non-archive submission found: {}", entry.name);
                ledger.record_warning(SubmissionWarning::NonArchiveEntry { name: entry.name });
            }
        }
    }

    // Step 5: Flag empty student folders
    if settings.mode == DestinationMode::PerStudentSubdirectory {
        flag_empty_destinations(&destinations, &mut ledger);
    }

    info!(
        "Finished processing {} submissions ({} corrupted, {} files moved)",
        ledger.submissions,
        ledger.corrupted.len(),
        ledger.files_moved
    );

    Ok(RunOutcome {
        ledger,
        layout,
        elapsed: start.elapsed(),
    })
}

/// Unpacks one student archive and moves its gradable files
///
/// Every destination folder used is added to `destinations`.
fn process_submission(
    submission: &Submission,
    layout: &OutputLayout,
    settings: &Settings,
    ledger: &mut RunLedger,
    destinations: &mut BTreeSet<PathBuf>,
) {
    debug!("Processing submission: {}", submission.name);
    ledger.increment_submissions();

    let extraction_dir = match submission.extraction_dir(&layout.student_files) {
        Ok(dir) => claim_extraction_dir(dir),
        Err(e) => {
            warn!("{e}");
            ledger.record_warning(SubmissionWarning::UnrecognisedName {
                name: submission.name.clone(),
            });
            return;
        }
    };

    if let Err(e) = extract_archive(&submission.archive, &extraction_dir) {
        if e.is_corruption() {
            error!("{e}");
            ledger.record_corrupted(&submission.name);
        } else {
            warn!("{e}");
            ledger.record_warning(SubmissionWarning::ExtractionFailed {
                name: submission.name.clone(),
                cause: e.to_string(),
            });
        }
        return;
    }

    let destination = match settings.mode {
        DestinationMode::PerStudentSubdirectory => match submission.username() {
            Ok(username) => layout.ready_to_grade.join(username),
            Err(e) => {
                warn!("{e}");
                ledger.record_warning(SubmissionWarning::UnrecognisedName {
                    name: submission.name.clone(),
                });
                return;
            }
        },
        DestinationMode::FlatCollection => layout.ready_to_grade.clone(),
    };

    if let Err(e) = create_dir_all(&destination) {
        warn!("Failed to create {}: {e}", destination.display());
        ledger.move_errors.push(MoveFailure::from_error(
            &extraction_dir,
            &destination,
            &file_operation_error(e, destination.clone(), "create directory"),
        ));
        return;
    }
    destinations.insert(destination.clone());

    if sort_extracted(&submission.name, &extraction_dir, &destination, settings, ledger) {
        ledger.record_success(&submission.name);
    }
}

/// Picks a folder name that no earlier submission of this run has used
///
/// `alice_1.zip` and `alice_1.ZIP` share a stem; the second one is unpacked
/// into `alice_1 (2)`.
fn claim_extraction_dir(base: PathBuf) -> PathBuf {
    if !base.exists() {
        return base;
    }
    let stem = base
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    (2..)
        .map(|n| base.with_file_name(format!("{stem} ({n})")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(base)
}

/// Runs the classifier over an extracted submission
///
/// Returns whether the walk completed.
fn sort_extracted(
    name: &str,
    extraction_dir: &Path,
    destination: &Path,
    settings: &Settings,
    ledger: &mut RunLedger,
) -> bool {
    match classify_and_move(extraction_dir, destination, settings, &mut ledger.move_errors) {
        Ok(moved) => {
            ledger.add_files_moved(moved);
            true
        }
        Err(e) => {
            warn!("{e}");
            ledger.record_warning(SubmissionWarning::SortingFailed {
                name: name.to_string(),
                cause: e.to_string(),
            });
            false
        }
    }
}

fn flag_empty_destinations(destinations: &BTreeSet<PathBuf>, ledger: &mut RunLedger) {
    for destination in destinations {
        if is_empty_dir(destination) {
            warn!("Empty student directory: {}", destination.display());
            ledger.record_warning(SubmissionWarning::EmptyDestination {
                path: destination.clone(),
            });
        }
    }
}

fn is_empty_dir(path: &Path) -> bool {
    read_dir(path).is_ok_and(|mut entries| entries.next().is_none())
}

/// Sorts the submissions and writes the report into the working root
///
/// # Returns
/// * `Result<PathBuf>` - The path of the written report
///
/// # Errors
/// Returns the fatal errors of [`process_submissions`], or an error if the
/// report cannot be written
pub fn run(options: &ProcessingOptions) -> Result<PathBuf> {
    let outcome = process_submissions(options)?;
    let info = RunInfo::gather(&options.settings, outcome.elapsed);
    let text = render_report(&outcome.ledger, &info);
    let path = write_report(&options.root, &info.timestamp, &text)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::write;
    use tempfile::tempdir;

    #[test]
    fn test_is_empty_dir() {
        let dir = tempdir().unwrap();
        assert!(is_empty_dir(dir.path()));

        write(dir.path().join("main.py"), "").unwrap();
        assert!(!is_empty_dir(dir.path()));
        assert!(!is_empty_dir(&dir.path().join("missing")));
    }

    #[test]
    fn test_flag_empty_destinations() {
        let dir = tempdir().unwrap();
        let alice = dir.path().join("alice");
        let carol = dir.path().join("carol");
        create_dir_all(&alice).unwrap();
        create_dir_all(&carol).unwrap();
        write(alice.join("main.py"), "").unwrap();

        let destinations: BTreeSet<PathBuf> = [alice, carol.clone()].into_iter().collect();
        let mut ledger = RunLedger::new();
        flag_empty_destinations(&destinations, &mut ledger);

        assert_eq!(
            ledger.warnings,
            vec![SubmissionWarning::EmptyDestination { path: carol }]
        );
    }

    #[test]
    fn test_claim_extraction_dir() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("alice_1");

        assert_eq!(claim_extraction_dir(base.clone()), base);

        create_dir_all(&base).unwrap();
        create_dir_all(dir.path().join("alice_1 (2)")).unwrap();
        assert_eq!(
            claim_extraction_dir(base),
            dir.path().join("alice_1 (3)")
        );
    }

    #[test]
    fn test_sort_extracted_records_unreadable_folder() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("ReadyToGrade/alice");
        create_dir_all(&destination).unwrap();
        let mut ledger = RunLedger::new();

        let sorted = sort_extracted(
            "alice_1.zip",
            &dir.path().join("missing"),
            &destination,
            &Settings::default(),
            &mut ledger,
        );

        assert!(!sorted);
        assert!(matches!(
            ledger.warnings.as_slice(),
            [SubmissionWarning::SortingFailed { name, .. }] if name == "alice_1.zip"
        ));
    }

    #[test]
    fn test_wrong_archive_count_creates_nothing() {
        let dir = tempdir().unwrap();
        let options = ProcessingOptions {
            root: dir.path().to_path_buf(),
            settings: Settings::default(),
        };

        assert!(process_submissions(&options).is_err());
        assert!(!OutputLayout::new(dir.path()).ready_to_grade.exists());
    }
}
