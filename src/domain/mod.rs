//! Domain models and types for shiftwatch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SubjectId`], [`DateLabel`])
//! - **Domain models** ([`Visit`], [`ScheduleSnapshot`], [`DayBucket`])
//! - **Error types** ([`ShiftWatchError`], [`RemoteError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use shiftwatch::domain::{DateLabel, ScheduleSnapshot, SubjectId, Visit};
//!
//! let mut snapshot = ScheduleSnapshot::new();
//! let visit = Visit::new("09:00", SubjectId::new("P1").unwrap(), "CityX", "Nursing");
//! snapshot.insert(DateLabel::from("Jan 02"), vec![visit]);
//!
//! assert_eq!(snapshot.total_visits(), 1);
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod snapshot;
pub mod visit;

// Re-export commonly used types for convenience
pub use errors::{RemoteError, ShiftWatchError};
pub use ids::{DateLabel, SubjectId};
pub use result::Result;
pub use snapshot::{DayBucket, ScheduleSnapshot};
pub use visit::Visit;
