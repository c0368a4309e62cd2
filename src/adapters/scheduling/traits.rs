//! Scheduling service abstraction traits
//!
//! The run coordinator only sees these traits, so tests can drive a full run
//! with in-memory sources instead of the HTTP client.

use super::models::RawShift;
use crate::domain::{RemoteError, SubjectId};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of raw shifts for a date range
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Fetch the shifts between `start` and `end`, in upstream order
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable, answers with a
    /// non-success status, or sends a body that cannot be parsed.
    async fn fetch_shifts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> std::result::Result<Vec<RawShift>, RemoteError>;
}

/// Resolves a subject to its location label
#[async_trait]
pub trait LocationLookup: Send + Sync {
    /// Location label (city) for a subject
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails for any reason.
    async fn location_for(
        &self,
        subject_id: &SubjectId,
    ) -> std::result::Result<String, RemoteError>;
}
