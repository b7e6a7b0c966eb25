//! Configuration module
//!
//! This module contains components for loading and validating configuration.

mod loader;
mod model;

pub use loader::{load_config, load_or_default, read_or_create};
pub use model::{AcceptedExtensions, Config, DestinationMode, IgnoreNames, Settings};
