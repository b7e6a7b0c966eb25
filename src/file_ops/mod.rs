//! File operations module
//!
//! This module contains components for building the output layout and
//! relocating files into it.

mod actions;
mod provision;

pub use actions::{MoveFailure, MoveFailureCause, relocate_file};
pub use provision::{OutputLayout, provision_directories};
