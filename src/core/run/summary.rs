//! Run summary and reporting

use crate::core::diff::{ChangeEvent, ChangeKind};
use crate::domain::ScheduleSnapshot;
use chrono::NaiveDate;
use std::time::Duration;

/// Outcome of one check run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// First day of the window
    pub reference: NaiveDate,

    /// Window length in days
    pub days: u32,

    /// Raw shifts returned by the schedule source
    pub shifts_fetched: usize,

    /// Shifts that became visits (inside or outside the window)
    pub visits_accepted: usize,

    /// Shifts skipped as cancelled or unassigned
    pub shifts_rejected: usize,

    /// Remote location lookups made
    pub lookups_performed: usize,

    /// Subjects that fell back to the sentinel location
    pub lookup_fallbacks: usize,

    /// No previous snapshot existed
    pub first_run: bool,

    /// The snapshot built by this run
    pub snapshot: ScheduleSnapshot,

    /// Changes against the previous snapshot
    pub events: Vec<ChangeEvent>,

    /// Notification body; empty when nothing changed
    pub message: String,

    /// Notification was delivered
    pub notified: bool,

    /// Delivery error, if sending failed
    pub delivery_error: Option<String>,

    /// New snapshot was written
    pub persisted: bool,

    /// Run made no external side effects
    pub dry_run: bool,

    /// Duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Create an empty summary for a window
    pub fn new(reference: NaiveDate, days: u32, dry_run: bool) -> Self {
        Self {
            reference,
            days,
            shifts_fetched: 0,
            visits_accepted: 0,
            shifts_rejected: 0,
            lookups_performed: 0,
            lookup_fallbacks: 0,
            first_run: false,
            snapshot: ScheduleSnapshot::new(),
            events: Vec::new(),
            message: String::new(),
            notified: false,
            delivery_error: None,
            persisted: false,
            dry_run,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Number of change events
    pub fn changes_count(&self) -> usize {
        self.events.len()
    }

    /// Number of added visits
    pub fn added_count(&self) -> usize {
        self.count_of(ChangeKind::Added)
    }

    /// Number of removed visits
    pub fn removed_count(&self) -> usize {
        self.count_of(ChangeKind::Removed)
    }

    /// True unless a notification was due and could not be delivered
    pub fn is_successful(&self) -> bool {
        self.delivery_error.is_none()
    }

    fn count_of(&self, kind: ChangeKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            reference = %self.reference,
            days = self.days,
            shifts = self.shifts_fetched,
            visits = self.visits_accepted,
            rejected = self.shifts_rejected,
            lookups = self.lookups_performed,
            changes = self.changes_count(),
            notified = self.notified,
            persisted = self.persisted,
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            "Schedule check completed"
        );

        if self.lookup_fallbacks > 0 {
            tracing::warn!(
                fallbacks = self.lookup_fallbacks,
                "Some locations could not be resolved"
            );
        }
        if let Some(error) = &self.delivery_error {
            tracing::warn!(error = %error, "Schedule check completed without notifying");
        }
    }
}
