//! Configuration loading functionality
//!
//! This module contains functions for loading and validating configuration.

use std::fs;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use log::{debug, info};
use serde_yaml::from_str;

use crate::errors::config_parsing_error;
use crate::utils::find_project_folder;

use super::model::Config;

/// Loads a configuration from a file
///
/// An empty file yields the default configuration.
///
/// # Arguments
/// * `file` - Path to the configuration file
///
/// # Returns
/// * `Result<Config>` - The loaded configuration or an error
///
/// # Errors
/// Returns an error if the file cannot be read or if the configuration is invalid
pub fn load_config(file: PathBuf) -> Result<Config> {
    let file_content = fs::read(&file).map_err(|e| {
        anyhow!(
            "Failed to read configuration file {}: {}",
            file.display(),
            e
        )
    })?;

    let content_str = String::from_utf8(file_content).map_err(|e| {
        anyhow!(
            "Configuration file {} contains invalid UTF-8 characters: {}",
            file.display(),
            e
        )
    })?;

    let config: Config = if content_str.trim().is_empty() {
        Config::default()
    } else {
        from_str(&content_str).map_err(|e| {
            let detail = format!(
                "{}: {}\nPlease check the YAML syntax.",
                file.display(),
                e
            );
            config_parsing_error(e, &detail)
        })?
    };

    config.validate()?;

    Ok(config)
}

/// Reads an existing configuration file or points to the standard location
///
/// When `config` does not exist it is looked up in the platform
/// configuration directory instead. The returned path may still not exist.
///
/// # Arguments
/// * `config` - Path to the configuration file
///
/// # Returns
/// * `Result<PathBuf>` - The path to the configuration file or an error
///
/// # Errors
/// Returns an error if the configuration directory cannot be created
pub fn read_or_create(config: PathBuf) -> Result<PathBuf> {
    if !&config.exists() {
        let folder = find_project_folder()?;
        Ok(folder.config_dir().join(config))
    } else {
        Ok(config)
    }
}

/// Loads the configuration file if one can be found, the defaults otherwise
///
/// # Errors
/// Returns an error if a configuration file exists but cannot be loaded
pub fn load_or_default(config: PathBuf) -> Result<Config> {
    let config_file = read_or_create(config)?;

    if config_file.is_file() {
        debug!("Loading configuration from {}", config_file.display());
        load_config(config_file)
    } else {
        info!("No configuration file found, using the built-in defaults");
        Ok(Config::default())
    }
}
