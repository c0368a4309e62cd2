//! External system integrations for shiftwatch.
//!
//! - [`scheduling`] - Scheduling service API (shift download, patient lookup)
//! - [`storage`] - Persistence of the last snapshot
//! - [`mail`] - Notification delivery
//!
//! # Design Pattern
//!
//! Each adapter exposes a trait the run coordinator depends on, plus one
//! production implementation. Tests drive the coordinator with in-memory
//! implementations of the same traits.
//!
//! ```rust,no_run
//! use shiftwatch::adapters::scheduling::{ScheduleSource, SchedulingApiClient};
//! use shiftwatch::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("shiftwatch.toml")?;
//! let client = SchedulingApiClient::new(&config.scheduling)?;
//! # Ok(())
//! # }
//! ```

pub mod mail;
pub mod scheduling;
pub mod storage;
