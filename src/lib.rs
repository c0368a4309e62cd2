// Shiftwatch - Schedule Change Notifier
// Copyright (c) 2025 Shiftwatch Contributors
// Licensed under the MIT License

//! # shiftwatch - schedule change notifier
//!
//! shiftwatch snapshots an appointment calendar for the next few days,
//! compares it with the snapshot saved by the previous run, and mails a short
//! change message when visits are added or removed. It is meant to run from
//! cron: each invocation is one sequential pass over one window.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Snapshot building, diffing, message rendering, run orchestration
//! - [`adapters`] - Scheduling API, snapshot file, SMTP
//! - [`domain`] - Visits, snapshots, identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shiftwatch::config::load_config;
//! use shiftwatch::core::run::{RunCoordinator, RunOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("shiftwatch.toml")?;
//!     let coordinator = RunCoordinator::from_config(&config)?;
//!
//!     let summary = coordinator
//!         .execute(&RunOptions {
//!             reference: chrono::Local::now().date_naive(),
//!             days: config.window.days,
//!             dry_run: true,
//!         })
//!         .await?;
//!
//!     print!("{}", summary.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Diffing
//!
//! Snapshots are compared day by day. Visits are matched on all four fields
//! (time, subject, location, service), so reordering is not a change and a
//! moved visit shows up as one removal plus one addition:
//!
//! ```rust
//! use shiftwatch::core::diff::SnapshotDiffer;
//! use shiftwatch::core::notify::NotificationFormatter;
//! use shiftwatch::domain::{DateLabel, ScheduleSnapshot, SubjectId, Visit};
//!
//! let mut previous = ScheduleSnapshot::new();
//! previous.insert(DateLabel::from("Jan 02"), vec![]);
//!
//! let mut current = ScheduleSnapshot::new();
//! current.insert(
//!     DateLabel::from("Jan 02"),
//!     vec![Visit::new("09:00", SubjectId::new("P1").unwrap(), "CityX", "Nursing")],
//! );
//!
//! let events = SnapshotDiffer::default().diff(&current, &previous);
//! assert_eq!(
//!     NotificationFormatter::new().format(&events),
//!     "Jan 02:\n (+) Nursing, CityX\n"
//! );
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::ShiftWatchError`]; the CLI maps errors to
//! exit codes (see [`cli::commands`]).

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
