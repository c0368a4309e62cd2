//! Window bucketing
//!
//! Lays accepted visits out over a fixed run of consecutive days. Every day of
//! the window gets a bucket, even an empty one, and visits outside the window
//! are dropped.

use super::visit_builder::DatedVisit;
use crate::domain::{DateLabel, DayBucket, Result, ScheduleSnapshot, ShiftWatchError};
use chrono::{Days, NaiveDate};
use std::ops::RangeInclusive;

/// Largest supported window; keeps date labels unique within a snapshot
pub const MAX_WINDOW_DAYS: u32 = 31;

/// Builds the snapshot for one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSnapshotBuilder {
    reference: NaiveDate,
    days: u32,
    query_end: NaiveDate,
}

impl ScheduleSnapshotBuilder {
    /// Window of `days` days starting at `reference`
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `1 <= days <= 31`.
    pub fn new(reference: NaiveDate, days: u32) -> Result<Self> {
        if !(1..=MAX_WINDOW_DAYS).contains(&days) {
            return Err(ShiftWatchError::Validation(format!(
                "window length must be between 1 and {MAX_WINDOW_DAYS} days, got {days}"
            )));
        }
        let query_end = reference
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or_else(|| {
                ShiftWatchError::Validation(format!("window starting {reference} overflows"))
            })?;

        Ok(Self {
            reference,
            days,
            query_end,
        })
    }

    /// First day of the window
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Window length in days
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Date range sent to the schedule source
    ///
    /// The end date is one past the last window day; the extra day is
    /// dropped again when bucketing.
    pub fn query_range(&self) -> (NaiveDate, NaiveDate) {
        (self.reference, self.query_end)
    }

    /// First through last window day, inclusive
    pub fn window_range(&self) -> RangeInclusive<NaiveDate> {
        let last = self.reference + Days::new(u64::from(self.days - 1));
        self.reference..=last
    }

    /// Calendar days of the window in order
    pub fn window_dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.reference.iter_days().take(self.days as usize)
    }

    /// Bucket visits by day, keeping arrival order within each day
    pub fn build(&self, visits: impl IntoIterator<Item = DatedVisit>) -> ScheduleSnapshot {
        let mut buckets: Vec<DayBucket> = self
            .window_dates()
            .map(|date| DayBucket::empty(DateLabel::from_date(date)))
            .collect();

        let mut dropped = 0usize;
        for dated in visits {
            match self.offset_of(dated.date) {
                Some(index) => buckets[index].visits.push(dated.visit),
                None => {
                    dropped += 1;
                    tracing::debug!(
                        date = %dated.date,
                        subject_id = %dated.visit.subject_id(),
                        "Dropping visit outside window"
                    );
                }
            }
        }

        let mut snapshot = ScheduleSnapshot::new();
        for bucket in buckets {
            snapshot.insert(bucket.label, bucket.visits);
        }

        tracing::debug!(
            reference = %self.reference,
            days = self.days,
            visits = snapshot.total_visits(),
            dropped,
            "Built schedule snapshot"
        );
        snapshot
    }

    fn offset_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.reference).num_days();
        (0..i64::from(self.days))
            .contains(&offset)
            .then_some(offset as usize)
    }
}
