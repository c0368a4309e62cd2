//! Integration tests for dry-run mode
//!
//! A dry run computes the snapshot and the change message but neither sends
//! the message nor replaces the saved snapshot file.

use async_trait::async_trait;
use chrono::NaiveDate;
use shiftwatch::adapters::mail::Notifier;
use shiftwatch::adapters::scheduling::{LocationLookup, RawShift, ScheduleSource};
use shiftwatch::adapters::storage::{JsonFileStore, SnapshotStore};
use shiftwatch::core::run::{RunCoordinator, RunOptions, RunSettings};
use shiftwatch::domain::{RemoteError, Result, ShiftWatchError, SubjectId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

struct OneShift;

#[async_trait]
impl ScheduleSource for OneShift {
    async fn fetch_shifts(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> std::result::Result<Vec<RawShift>, RemoteError> {
        Ok(vec![RawShift::new(
            Some(SubjectId::new("P1").unwrap()),
            false,
            "2024-01-02T09:00:00",
            "RN-Nursing Visit",
        )])
    }
}

struct Springfield;

#[async_trait]
impl LocationLookup for Springfield {
    async fn location_for(
        &self,
        _subject_id: &SubjectId,
    ) -> std::result::Result<String, RemoteError> {
        Ok("Springfield".to_string())
    }
}

#[derive(Default)]
struct CountingNotifier {
    sends: AtomicUsize,
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn send(&self, _body: &str) -> Result<()> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        Err(ShiftWatchError::Delivery("must not be called".to_string()))
    }

    fn channel(&self) -> &'static str {
        "counting"
    }
}

fn coordinator(store: Arc<JsonFileStore>, notifier: Arc<CountingNotifier>) -> RunCoordinator {
    RunCoordinator::new(
        Arc::new(OneShift),
        Arc::new(Springfield),
        store,
        notifier,
        RunSettings::default(),
    )
}

fn options(dry_run: bool) -> RunOptions {
    RunOptions {
        reference: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        days: 5,
        dry_run,
    }
}

#[tokio::test]
async fn test_dry_run_does_not_write_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved-schedule.json");
    let store = Arc::new(JsonFileStore::new(&path));
    let notifier = Arc::new(CountingNotifier::default());

    let summary = coordinator(store, notifier.clone())
        .execute(&options(true))
        .await
        .unwrap();

    assert!(summary.dry_run);
    assert!(!summary.persisted);
    assert!(!summary.notified);
    assert!(summary.is_successful());
    assert_eq!(summary.message, "Jan 02:\n (+) Nursing, Springfield\n");
    assert_eq!(notifier.sends.load(Ordering::SeqCst), 0);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_dry_run_keeps_existing_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved-schedule.json");
    std::fs::write(&path, "{\n    \"Jan 01\": []\n}").unwrap();

    let store = Arc::new(JsonFileStore::new(&path));
    let summary = coordinator(store.clone(), Arc::new(CountingNotifier::default()))
        .execute(&options(true))
        .await
        .unwrap();

    assert_eq!(summary.changes_count(), 1);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{\n    \"Jan 01\": []\n}"
    );
    assert_eq!(store.load().await.unwrap().unwrap().len(), 1);
}

#[tokio::test]
async fn test_real_run_writes_snapshot_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved-schedule.json");
    let store = Arc::new(JsonFileStore::new(&path));

    let summary = coordinator(store.clone(), Arc::new(CountingNotifier::default()))
        .execute(&options(false))
        .await
        .unwrap();

    // The counting notifier refuses delivery; the snapshot is saved anyway
    assert!(!summary.is_successful());
    assert!(summary.persisted);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("{\n    \"Jan 01\": [],"));
    assert!(contents.contains("\"Springfield\""));

    // Second run sees no changes
    let summary = coordinator(store, Arc::new(CountingNotifier::default()))
        .execute(&options(false))
        .await
        .unwrap();
    assert_eq!(summary.changes_count(), 0);
    assert!(summary.is_successful());
}
