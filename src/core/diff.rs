//! Snapshot comparison
//!
//! Walks the new snapshot's days in window order and reports visits that
//! appeared or disappeared relative to the previous snapshot. Days that only
//! exist in the previous snapshot have scrolled out of the window and are
//! ignored.

use crate::config::DiffStrategy;
use crate::domain::{DateLabel, ScheduleSnapshot, Visit};
use std::fmt;

/// Direction of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Visit is new since the previous snapshot
    Added,
    /// Visit is gone since the previous snapshot
    Removed,
}

impl ChangeKind {
    /// Marker used in notifications
    pub fn marker(self) -> &'static str {
        match self {
            Self::Added => "(+)",
            Self::Removed => "(-)",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
        }
    }
}

/// One added or removed visit on a given day
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    /// Day of the change
    pub label: DateLabel,
    /// Added or removed
    pub kind: ChangeKind,
    /// The visit concerned
    pub visit: Visit,
}

impl ChangeEvent {
    fn new(label: &DateLabel, kind: ChangeKind, visit: &Visit) -> Self {
        Self {
            label: label.clone(),
            kind,
            visit: visit.clone(),
        }
    }
}

/// Computes change events between two snapshots
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotDiffer {
    strategy: DiffStrategy,
}

impl SnapshotDiffer {
    /// Create a differ using `strategy`
    pub fn new(strategy: DiffStrategy) -> Self {
        Self { strategy }
    }

    /// Strategy in use
    pub fn strategy(&self) -> DiffStrategy {
        self.strategy
    }

    /// Change events from `previous` to `current`, grouped by day
    ///
    /// Within a day, added events come first in current order, then removed
    /// events in previous order.
    pub fn diff(&self, current: &ScheduleSnapshot, previous: &ScheduleSnapshot) -> Vec<ChangeEvent> {
        let mut events = Vec::new();

        for day in current.days() {
            match previous.get(&day.label) {
                None => events.extend(
                    day.visits
                        .iter()
                        .map(|visit| ChangeEvent::new(&day.label, ChangeKind::Added, visit)),
                ),
                Some(before) => match self.strategy {
                    DiffStrategy::Identity => {
                        diff_by_identity(&day.label, &day.visits, before, &mut events)
                    }
                    DiffStrategy::CountOnly => {
                        diff_by_count(&day.label, &day.visits, before, &mut events)
                    }
                },
            }
        }

        events
    }
}

/// One-to-one multiset matching on all visit fields
fn diff_by_identity(
    label: &DateLabel,
    current: &[Visit],
    previous: &[Visit],
    events: &mut Vec<ChangeEvent>,
) {
    let mut matched = vec![false; previous.len()];

    for visit in current {
        let hit = previous
            .iter()
            .enumerate()
            .position(|(i, old)| !matched[i] && old == visit);
        match hit {
            Some(i) => matched[i] = true,
            None => events.push(ChangeEvent::new(label, ChangeKind::Added, visit)),
        }
    }

    events.extend(
        previous
            .iter()
            .zip(&matched)
            .filter(|(_, seen)| !**seen)
            .map(|(visit, _)| ChangeEvent::new(label, ChangeKind::Removed, visit)),
    );
}

/// Legacy comparison: only bucket sizes matter
fn diff_by_count(
    label: &DateLabel,
    current: &[Visit],
    previous: &[Visit],
    events: &mut Vec<ChangeEvent>,
) {
    if current.len() > previous.len() {
        events.extend(
            current[previous.len()..]
                .iter()
                .map(|visit| ChangeEvent::new(label, ChangeKind::Added, visit)),
        );
    } else if previous.len() > current.len() {
        events.extend(
            previous[current.len()..]
                .iter()
                .map(|visit| ChangeEvent::new(label, ChangeKind::Removed, visit)),
        );
    }
}
