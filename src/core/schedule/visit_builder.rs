//! Raw shift normalization
//!
//! Turns one [`RawShift`] into a dated [`Visit`], or rejects it. Unassigned,
//! cancelled and out-of-window shifts are rejected before any lookup is made.

use crate::adapters::scheduling::{LocationLookup, RawShift};
use crate::config::{LookupConfig, LookupFailurePolicy};
use crate::domain::{DateLabel, Result, ShiftWatchError, SubjectId, Visit};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Time-of-day format used in visits
pub const TIME_FORMAT: &str = "%H:%M";

/// Naive timestamp layouts accepted for a shift start
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A visit together with the calendar day it falls on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedVisit {
    /// Wall-clock date of the shift start
    pub date: NaiveDate,
    /// Normalized visit
    pub visit: Visit,
}

impl DatedVisit {
    /// Label of the day bucket this visit belongs to
    pub fn label(&self) -> DateLabel {
        DateLabel::from_date(self.date)
    }
}

/// Why a shift did not become a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No patient attached
    Unassigned,
    /// Cancelled upstream
    Cancelled,
    /// Starts on a day outside the window
    OutsideWindow,
}

/// Result of normalizing one shift
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Shift became a visit
    Accepted(DatedVisit),
    /// Shift was skipped
    Rejected(RejectReason),
}

/// Builds visits from raw shifts
///
/// Locations are looked up once per subject and cached for the lifetime of
/// the builder, which is one run.
pub struct VisitRecordBuilder<'a> {
    lookup: &'a dyn LocationLookup,
    policy: LookupFailurePolicy,
    fallback_location: String,
    window: Option<RangeInclusive<NaiveDate>>,
    cache: HashMap<SubjectId, String>,
    lookups: usize,
    fallbacks: usize,
}

impl<'a> VisitRecordBuilder<'a> {
    /// Create a builder backed by `lookup`
    pub fn new(lookup: &'a dyn LocationLookup, config: &LookupConfig) -> Self {
        Self {
            lookup,
            policy: config.on_failure,
            fallback_location: config.fallback_location.clone(),
            window: None,
            cache: HashMap::new(),
            lookups: 0,
            fallbacks: 0,
        }
    }

    /// Reject shifts starting outside `window` without looking them up
    pub fn with_window(mut self, window: RangeInclusive<NaiveDate>) -> Self {
        self.window = Some(window);
        self
    }

    /// Normalize one raw shift
    ///
    /// # Errors
    ///
    /// Returns [`ShiftWatchError::InvalidRecord`] if an accepted shift has no
    /// start timestamp or it does not parse, or [`ShiftWatchError::Lookup`]
    /// if the location lookup fails under the `abort` policy.
    pub async fn build(&mut self, raw: &RawShift) -> Result<BuildOutcome> {
        let Some(subject_id) = raw.subject_id() else {
            return Ok(BuildOutcome::Rejected(RejectReason::Unassigned));
        };
        if raw.is_cancelled() {
            tracing::debug!(subject_id = %subject_id, start = ?raw.start(), "Skipping cancelled shift");
            return Ok(BuildOutcome::Rejected(RejectReason::Cancelled));
        }

        let start = raw.start().ok_or_else(|| {
            ShiftWatchError::InvalidRecord(format!("shift for subject {subject_id} has no start"))
        })?;
        let start = parse_start(start)?;
        if let Some(window) = &self.window {
            if !window.contains(&start.date()) {
                tracing::debug!(subject_id = %subject_id, date = %start.date(), "Skipping shift outside window");
                return Ok(BuildOutcome::Rejected(RejectReason::OutsideWindow));
            }
        }

        let location = self.location_for(subject_id).await?;

        let visit = Visit::new(
            start.format(TIME_FORMAT).to_string(),
            subject_id.clone(),
            location,
            service_label(raw.service_name()),
        );

        Ok(BuildOutcome::Accepted(DatedVisit {
            date: start.date(),
            visit,
        }))
    }

    /// Number of remote lookups made so far
    pub fn lookups_performed(&self) -> usize {
        self.lookups
    }

    /// Number of subjects that fell back to the sentinel location
    pub fn fallbacks_used(&self) -> usize {
        self.fallbacks
    }

    async fn location_for(&mut self, subject_id: &SubjectId) -> Result<String> {
        if let Some(location) = self.cache.get(subject_id) {
            return Ok(location.clone());
        }

        self.lookups += 1;
        let location = match self.lookup.location_for(subject_id).await {
            Ok(location) => location,
            Err(source) => match self.policy {
                LookupFailurePolicy::Abort => {
                    return Err(ShiftWatchError::Lookup {
                        subject_id: subject_id.to_string(),
                        source,
                    })
                }
                LookupFailurePolicy::Fallback => {
                    tracing::warn!(
                        subject_id = %subject_id,
                        error = %source,
                        fallback = %self.fallback_location,
                        "Location lookup failed, using fallback"
                    );
                    self.fallbacks += 1;
                    self.fallback_location.clone()
                }
            },
        };

        self.cache.insert(subject_id.clone(), location.clone());
        Ok(location)
    }
}

/// Parse a shift start timestamp into its wall-clock value
///
/// Offsets are discarded rather than converted: `2024-01-02T09:00:00-05:00`
/// is 09:00 on Jan 02.
///
/// # Errors
///
/// Returns [`ShiftWatchError::InvalidRecord`] for any unsupported layout.
pub fn parse_start(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt.naive_local());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(ShiftWatchError::InvalidRecord(format!(
        "unrecognized start timestamp '{value}'"
    )))
}

/// Short service label from a `"<code>-<description>"` descriptor
///
/// Uses the last segment with `Visit` removed; when that is empty, the
/// segment before it.
pub fn service_label(descriptor: &str) -> String {
    descriptor
        .split('-')
        .rev()
        .take(2)
        .map(clean_segment)
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
}

fn clean_segment(segment: &str) -> String {
    segment.trim().replace("Visit", "").trim().to_string()
}
