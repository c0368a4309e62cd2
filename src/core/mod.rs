//! Core business logic for shiftwatch.
//!
//! # Modules
//!
//! - [`schedule`] - Raw shift normalization and window bucketing
//! - [`diff`] - Snapshot comparison
//! - [`notify`] - Change message rendering
//! - [`report`] - Console rendering of a snapshot
//! - [`run`] - Orchestration of one check and its summary
//!
//! # Check Workflow
//!
//! 1. **Load**: Read the saved snapshot (missing or unreadable means empty)
//! 2. **Fetch**: Download the shifts for the window
//! 3. **Build**: Normalize shifts into visits and bucket them by day
//! 4. **Diff**: Compare against the saved snapshot
//! 5. **Notify**: Send the change message if anything changed
//! 6. **Save**: Replace the saved snapshot
//!
//! # Example
//!
//! ```rust,no_run
//! use shiftwatch::config::load_config;
//! use shiftwatch::core::run::{RunCoordinator, RunOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("shiftwatch.toml")?;
//! let coordinator = RunCoordinator::from_config(&config)?;
//!
//! let options = RunOptions {
//!     reference: chrono::Local::now().date_naive(),
//!     days: config.window.days,
//!     dry_run: false,
//! };
//! let summary = coordinator.execute(&options).await?;
//!
//! println!("Changes: {}", summary.changes_count());
//! # Ok(())
//! # }
//! ```

pub mod diff;
pub mod notify;
pub mod report;
pub mod run;
pub mod schedule;
