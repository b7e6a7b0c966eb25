//! Submission processing module
//!
//! This module moves the gradable files of one extracted submission into the
//! grading area.

mod classifier;

pub use classifier::{classify_and_move, is_gradable};
