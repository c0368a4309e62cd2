//! Snapshot construction
//!
//! - [`visit_builder`] - Normalizes raw shifts into visits
//! - [`snapshot_builder`] - Buckets visits into the day window

pub mod snapshot_builder;
pub mod visit_builder;

pub use snapshot_builder::{ScheduleSnapshotBuilder, MAX_WINDOW_DAYS};
pub use visit_builder::{
    parse_start, service_label, BuildOutcome, DatedVisit, RejectReason, VisitRecordBuilder,
};
