//! Configuration data structures
//!
//! This module contains the data structures for configuration and the
//! validated settings derived from them.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_ACCEPTED_FORMATS, DEFAULT_DELIVERABLE_TYPE, DEFAULT_IGNORE_FOLDERS,
    EXTENSION_SEPARATOR,
};
use crate::errors::invalid_config_error;

/// Configuration as read from the YAML file
///
/// Every key is optional; missing keys fall back to the built-in defaults.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `A` (one folder per student) or `L` (one shared folder)
    pub deliverable_type: String,
    /// Extensions moved into the grading area
    pub accepted_formats: Vec<String>,
    /// Folder names skipped while searching a submission
    pub ignore_folders: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            deliverable_type: DEFAULT_DELIVERABLE_TYPE.to_string(),
            accepted_formats: DEFAULT_ACCEPTED_FORMATS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignore_folders: DEFAULT_IGNORE_FOLDERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Validates the configuration
    ///
    /// The deliverable type must name a known destination mode and every
    /// accepted format must be non-empty and start with a dot.
    ///
    /// # Returns
    /// * `Result<()>` - Success or an error with a helpful message
    ///
    /// # Errors
    /// Returns an error naming the first offending value
    pub fn validate(&self) -> Result<()> {
        self.deliverable_type
            .parse::<DestinationMode>()
            .map_err(|e| invalid_config_error(&e))?;

        for (index, format) in self.accepted_formats.iter().enumerate() {
            if format.is_empty() {
                return Err(invalid_config_error(&format!(
                    "accepted format at index {index} is empty. Formats look like \".py\"."
                ))
                .into());
            }
            if !format.starts_with(EXTENSION_SEPARATOR) {
                return Err(invalid_config_error(&format!(
                    "accepted format '{format}' at index {index} must start with '{EXTENSION_SEPARATOR}'."
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validates the configuration and converts it into [`Settings`]
    ///
    /// # Errors
    /// Returns the validation error if the configuration is not well-formed
    pub fn settings(&self) -> Result<Settings> {
        self.validate()?;

        Ok(Settings {
            mode: self
                .deliverable_type
                .parse::<DestinationMode>()
                .map_err(|e| anyhow!(e))?,
            accepted: AcceptedExtensions::new(self.accepted_formats.as_slice()),
            ignored: IgnoreNames::new(self.ignore_folders.as_slice()),
        })
    }
}

/// Where relocated files land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationMode {
    /// One folder per student under the grading area (assignments)
    PerStudentSubdirectory,
    /// Every file straight into the grading area (labs)
    FlatCollection,
}

impl FromStr for DestinationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "assignment" | "per-student" => Ok(DestinationMode::PerStudentSubdirectory),
            "l" | "lab" | "flat" => Ok(DestinationMode::FlatCollection),
            _ => Err(format!(
                "Unknown deliverable type '{s}'. Use 'A' (assignment) or 'L' (lab)."
            )),
        }
    }
}

impl fmt::Display for DestinationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationMode::PerStudentSubdirectory => write!(f, "A (one folder per student)"),
            DestinationMode::FlatCollection => write!(f, "L (shared folder)"),
        }
    }
}

/// Case-insensitive allowlist of file extensions, stored with their leading dot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AcceptedExtensions(BTreeSet<String>);

impl AcceptedExtensions {
    pub fn new<S: AsRef<str>>(formats: &[S]) -> Self {
        AcceptedExtensions(
            formats
                .iter()
                .map(|format| format.as_ref().to_lowercase())
                .collect(),
        )
    }

    /// Whether the final extension of `name` is in the set
    pub fn matches(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!("{EXTENSION_SEPARATOR}{}", ext.to_lowercase()))
            .is_some_and(|ext| self.0.contains(&ext))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Directory basenames pruned from the search
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IgnoreNames(BTreeSet<String>);

impl IgnoreNames {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        IgnoreNames(names.iter().map(|name| name.as_ref().to_string()).collect())
    }

    /// Exact basename match
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Validated configuration passed to every component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mode: DestinationMode,
    pub accepted: AcceptedExtensions,
    pub ignored: IgnoreNames,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mode: DestinationMode::PerStudentSubdirectory,
            accepted: AcceptedExtensions::new(DEFAULT_ACCEPTED_FORMATS),
            ignored: IgnoreNames::new(DEFAULT_IGNORE_FOLDERS),
        }
    }
}
