//! Behavioural properties of snapshot comparison

use shiftwatch::config::DiffStrategy;
use shiftwatch::core::diff::{ChangeKind, SnapshotDiffer};
use shiftwatch::core::notify::NotificationFormatter;
use shiftwatch::domain::{DateLabel, ScheduleSnapshot, SubjectId, Visit};
use test_case::test_case;

fn visit(time: &str, subject: &str) -> Visit {
    Visit::new(time, SubjectId::new(subject).unwrap(), "CityX", "Nursing")
}

fn snapshot(days: &[(&str, Vec<Visit>)]) -> ScheduleSnapshot {
    let mut snapshot = ScheduleSnapshot::new();
    for (label, visits) in days {
        snapshot.insert(DateLabel::from(*label), visits.clone());
    }
    snapshot
}

fn busy_week() -> ScheduleSnapshot {
    snapshot(&[
        ("Jan 01", vec![visit("08:00", "P1"), visit("13:00", "P2")]),
        ("Jan 02", vec![]),
        ("Jan 03", vec![visit("09:30", "P3")]),
        ("Jan 04", vec![visit("09:30", "P3"), visit("09:30", "P3")]),
        ("Jan 05", vec![visit("17:00", "P4")]),
    ])
}

#[test_case(DiffStrategy::Identity ; "identity")]
#[test_case(DiffStrategy::CountOnly ; "count only")]
fn test_snapshot_against_itself_has_no_changes(strategy: DiffStrategy) {
    let week = busy_week();
    assert!(SnapshotDiffer::new(strategy).diff(&week, &week).is_empty());
}

#[test]
fn test_swapping_arguments_swaps_change_kinds() {
    let before = busy_week();
    let after = snapshot(&[
        ("Jan 01", vec![visit("08:00", "P1")]),
        ("Jan 02", vec![visit("10:00", "P9")]),
        ("Jan 03", vec![visit("09:30", "P3")]),
        ("Jan 04", vec![visit("09:30", "P3")]),
        ("Jan 05", vec![visit("17:00", "P4"), visit("18:00", "P5")]),
    ]);

    let differ = SnapshotDiffer::default();
    let forward = differ.diff(&after, &before);
    let backward = differ.diff(&before, &after);

    assert_eq!(forward.len(), backward.len());
    for event in &forward {
        let opposite = match event.kind {
            ChangeKind::Added => ChangeKind::Removed,
            ChangeKind::Removed => ChangeKind::Added,
        };
        assert!(backward
            .iter()
            .any(|e| e.label == event.label && e.visit == event.visit && e.kind == opposite));
    }
}

#[test]
fn test_reordering_within_a_day_is_not_a_change() {
    let before = busy_week();
    let after = snapshot(&[
        ("Jan 01", vec![visit("13:00", "P2"), visit("08:00", "P1")]),
        ("Jan 02", vec![]),
        ("Jan 03", vec![visit("09:30", "P3")]),
        ("Jan 04", vec![visit("09:30", "P3"), visit("09:30", "P3")]),
        ("Jan 05", vec![visit("17:00", "P4")]),
    ]);

    assert!(SnapshotDiffer::default().diff(&after, &before).is_empty());
}

#[test_case(0, 3 ; "three new")]
#[test_case(1, 2 ; "two more")]
#[test_case(3, 0 ; "unchanged")]
fn test_duplicate_visits_are_counted(before_count: usize, expected_added: usize) {
    let before = snapshot(&[("Jan 04", vec![visit("09:30", "P3"); before_count])]);
    let after = snapshot(&[("Jan 04", vec![visit("09:30", "P3"); 3])]);

    let events = SnapshotDiffer::default().diff(&after, &before);
    assert_eq!(events.len(), expected_added);
    assert!(events.iter().all(|e| e.kind == ChangeKind::Added));
}

#[test]
fn test_changes_follow_window_order() {
    let before = snapshot(&[("Jan 01", vec![]), ("Jan 02", vec![]), ("Jan 03", vec![])]);
    let after = snapshot(&[
        ("Jan 01", vec![visit("08:00", "P1")]),
        ("Jan 02", vec![]),
        ("Jan 03", vec![visit("08:00", "P3")]),
    ]);

    let events = SnapshotDiffer::default().diff(&after, &before);
    let labels: Vec<&str> = events.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Jan 01", "Jan 03"]);

    assert_eq!(
        NotificationFormatter::new().format(&events),
        "Jan 01:\n (+) Nursing, CityX\n\nJan 03:\n (+) Nursing, CityX\n"
    );
}

#[test]
fn test_moved_visit_is_removal_plus_addition() {
    let before = snapshot(&[("Jan 01", vec![visit("08:00", "P1")])]);
    let after = snapshot(&[("Jan 01", vec![visit("09:00", "P1")])]);

    let events = SnapshotDiffer::default().diff(&after, &before);
    let kinds: Vec<ChangeKind> = events.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ChangeKind::Added, ChangeKind::Removed]);
    assert_eq!(
        NotificationFormatter::new().format(&events),
        "Jan 01:\n (+) Nursing, CityX\n (-) Nursing, CityX\n"
    );
}
