//! Archive module
//!
//! This module contains components for finding the outer archive and
//! unpacking archives.

mod extractor;
mod locator;

pub use extractor::extract_archive;
pub use locator::locate_outer_archive;
