//! Scheduling service adapter
//!
//! Raw shift download and patient location lookup.

pub mod client;
pub mod models;
pub mod traits;

pub use client::SchedulingApiClient;
pub use models::{PatientRef, RawShift, ServiceRef};
pub use traits::{LocationLookup, ScheduleSource};
