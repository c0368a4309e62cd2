//! One check run, end to end
//!
//! - [`coordinator`] - Orchestrates fetch, build, diff, notify and save
//! - [`summary`] - Outcome reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::{RunCoordinator, RunOptions, RunSettings};
pub use summary::RunSummary;
