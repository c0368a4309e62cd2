//! Run coordinator - orchestrates one check
//!
//! Fetches the window, builds the snapshot, diffs it against the saved one,
//! notifies on changes and saves the new snapshot. Fetch, lookup and record
//! errors abort the run before anything is saved.

use crate::adapters::mail::{LogNotifier, Notifier, SmtpNotifier};
use crate::adapters::scheduling::{LocationLookup, ScheduleSource, SchedulingApiClient};
use crate::adapters::storage::{JsonFileStore, SnapshotStore};
use crate::config::{DiffStrategy, LookupConfig, ShiftWatchConfig};
use crate::core::diff::SnapshotDiffer;
use crate::core::notify::NotificationFormatter;
use crate::core::run::summary::RunSummary;
use crate::core::schedule::{BuildOutcome, ScheduleSnapshotBuilder, VisitRecordBuilder};
use crate::domain::{Result, ScheduleSnapshot, ShiftWatchError};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;

/// Per-run parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// First day of the window
    pub reference: NaiveDate,
    /// Window length in days
    pub days: u32,
    /// Skip sending and saving
    pub dry_run: bool,
}

/// Behavior settings taken from configuration
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Diff strategy
    pub strategy: DiffStrategy,
    /// Notify when there is no saved snapshot yet
    pub notify_on_first_run: bool,
    /// Lookup failure handling
    pub lookup: LookupConfig,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            strategy: DiffStrategy::default(),
            notify_on_first_run: true,
            lookup: LookupConfig::default(),
        }
    }
}

impl RunSettings {
    /// Settings from a loaded configuration
    pub fn from_config(config: &ShiftWatchConfig) -> Self {
        Self {
            strategy: config.diff.strategy,
            notify_on_first_run: config.diff.notify_on_first_run,
            lookup: config.lookup.clone(),
        }
    }
}

/// Run coordinator
pub struct RunCoordinator {
    source: Arc<dyn ScheduleSource>,
    lookup: Arc<dyn LocationLookup>,
    store: Arc<dyn SnapshotStore>,
    notifier: Arc<dyn Notifier>,
    settings: RunSettings,
}

impl RunCoordinator {
    /// Create a coordinator from its collaborators
    pub fn new(
        source: Arc<dyn ScheduleSource>,
        lookup: Arc<dyn LocationLookup>,
        store: Arc<dyn SnapshotStore>,
        notifier: Arc<dyn Notifier>,
        settings: RunSettings,
    ) -> Self {
        Self {
            source,
            lookup,
            store,
            notifier,
            settings,
        }
    }

    /// Create a coordinator wired to the production adapters
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client or SMTP transport
    /// cannot be built.
    pub fn from_config(config: &ShiftWatchConfig) -> Result<Self> {
        let client = Arc::new(SchedulingApiClient::new(&config.scheduling)?);
        let store = Arc::new(JsonFileStore::new(&config.storage.path));

        let notifier: Arc<dyn Notifier> = if config.mail.enabled {
            Arc::new(SmtpNotifier::new(&config.mail)?)
        } else {
            Arc::new(LogNotifier)
        };

        Ok(Self::new(
            client.clone(),
            client,
            store,
            notifier,
            RunSettings::from_config(config),
        ))
    }

    /// Execute one check
    ///
    /// A delivery failure is recorded in the summary and does not stop the
    /// new snapshot from being saved.
    ///
    /// # Errors
    ///
    /// Returns an error on fetch, lookup (under the abort policy) or record
    /// failures, and when the new snapshot cannot be saved.
    pub async fn execute(&self, options: &RunOptions) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new(options.reference, options.days, options.dry_run);

        crate::log_run_start!(options.reference, options.days, options.dry_run);

        let window = ScheduleSnapshotBuilder::new(options.reference, options.days)?;
        let previous = self.load_previous(&mut summary).await;

        let (query_start, query_end) = window.query_range();
        let shifts = self
            .source
            .fetch_shifts(query_start, query_end)
            .await
            .map_err(ShiftWatchError::Fetch)?;
        summary.shifts_fetched = shifts.len();

        let mut visit_builder = VisitRecordBuilder::new(self.lookup.as_ref(), &self.settings.lookup)
            .with_window(window.window_range());
        let mut accepted = Vec::with_capacity(shifts.len());
        for shift in &shifts {
            match visit_builder.build(shift).await? {
                BuildOutcome::Accepted(dated) => accepted.push(dated),
                BuildOutcome::Rejected(_) => summary.shifts_rejected += 1,
            }
        }
        summary.visits_accepted = accepted.len();
        summary.lookups_performed = visit_builder.lookups_performed();
        summary.lookup_fallbacks = visit_builder.fallbacks_used();

        let snapshot = window.build(accepted);

        if summary.first_run && !self.settings.notify_on_first_run {
            tracing::info!("No saved schedule; seeding baseline without notifying");
        } else {
            summary.events = SnapshotDiffer::new(self.settings.strategy).diff(&snapshot, &previous);
        }
        summary.message = NotificationFormatter::new().format(&summary.events);

        if summary.changes_count() > 0 {
            crate::log_changes_found!(
                summary.changes_count(),
                summary.added_count(),
                summary.removed_count()
            );
            self.notify(&mut summary).await;
        } else {
            tracing::info!("No changes in the schedule");
        }

        if options.dry_run {
            tracing::info!("Dry run: not saving schedule");
        } else {
            self.store.save(&snapshot).await?;
            summary.persisted = true;
            tracing::info!(path = %self.store.describe(), "Saved schedule");
        }

        summary.snapshot = snapshot;
        Ok(summary.with_duration(start_time.elapsed()))
    }

    /// Load the baseline; unreadable snapshots degrade to an empty one
    async fn load_previous(&self, summary: &mut RunSummary) -> ScheduleSnapshot {
        match self.store.load().await {
            Ok(Some(previous)) => previous,
            Ok(None) => {
                summary.first_run = true;
                ScheduleSnapshot::new()
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.store.describe(),
                    "Saved schedule is unreadable, comparing against an empty schedule"
                );
                ScheduleSnapshot::new()
            }
        }
    }

    async fn notify(&self, summary: &mut RunSummary) {
        if summary.dry_run {
            tracing::info!(channel = self.notifier.channel(), "Dry run: not sending notification");
            return;
        }

        match self.notifier.send(&summary.message).await {
            Ok(()) => summary.notified = true,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to send change notification");
                summary.delivery_error = Some(e.to_string());
            }
        }
    }
}
