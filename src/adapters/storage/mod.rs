//! Snapshot persistence
//!
//! The previous run's snapshot is read once at the start of a run and the new
//! one is written once at the end. [`SnapshotStore`] is the seam the run
//! coordinator depends on; [`JsonFileStore`] is the file backed implementation.

pub mod file;

pub use file::JsonFileStore;

use crate::domain::{Result, ScheduleSnapshot};
use async_trait::async_trait;

/// Durable storage for the last snapshot
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the saved snapshot
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ShiftWatchError::PersistenceRead`] if a saved
    /// snapshot exists but cannot be read or parsed.
    async fn load(&self) -> Result<Option<ScheduleSnapshot>>;

    /// Replace the saved snapshot
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ShiftWatchError::PersistenceWrite`] on failure.
    async fn save(&self, snapshot: &ScheduleSnapshot) -> Result<()>;

    /// Human readable location of the store, for logs
    fn describe(&self) -> String;
}
