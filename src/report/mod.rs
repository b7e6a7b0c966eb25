//! Run report
//!
//! Rendering is a pure function of the ledger and the run information;
//! writing it to disk is a separate step.

mod render;
mod writer;

pub use render::{Report, RunInfo, render_report};
pub use writer::{report_path, write_report};
