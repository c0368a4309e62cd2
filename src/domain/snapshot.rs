//! Schedule snapshot model
//!
//! A [`ScheduleSnapshot`] is an ordered mapping from [`DateLabel`] to the
//! visits of that day. Order is the window order and survives a round trip
//! through JSON, because notification and console output both depend on it.
//! Labels are unique; inserting an existing label replaces its bucket in place.

use super::ids::DateLabel;
use super::visit::Visit;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Visits scheduled on one calendar day, in upstream arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    /// Day this bucket belongs to
    pub label: DateLabel,

    /// Visits in arrival order (not time sorted)
    pub visits: Vec<Visit>,
}

impl DayBucket {
    /// Creates an empty bucket for a day
    pub fn empty(label: DateLabel) -> Self {
        Self {
            label,
            visits: Vec::new(),
        }
    }
}

/// Date keyed calendar of day buckets for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSnapshot {
    days: Vec<DayBucket>,
}

impl ScheduleSnapshot {
    /// Creates a snapshot with no days
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the bucket for `label`
    ///
    /// A new label is appended at the end; an existing one keeps its position.
    pub fn insert(&mut self, label: DateLabel, visits: Vec<Visit>) {
        match self.days.iter_mut().find(|day| day.label == label) {
            Some(day) => day.visits = visits,
            None => self.days.push(DayBucket { label, visits }),
        }
    }

    /// Visits for a day, or `None` if the day is not part of this snapshot
    pub fn get(&self, label: &DateLabel) -> Option<&[Visit]> {
        self.days
            .iter()
            .find(|day| &day.label == label)
            .map(|day| day.visits.as_slice())
    }

    /// Mutable access to a day's visits
    pub fn get_mut(&mut self, label: &DateLabel) -> Option<&mut Vec<Visit>> {
        self.days
            .iter_mut()
            .find(|day| &day.label == label)
            .map(|day| &mut day.visits)
    }

    /// Whether the snapshot has a bucket for `label`
    pub fn contains(&self, label: &DateLabel) -> bool {
        self.get(label).is_some()
    }

    /// Day buckets in order
    pub fn days(&self) -> &[DayBucket] {
        &self.days
    }

    /// Day labels in order
    pub fn labels(&self) -> impl Iterator<Item = &DateLabel> {
        self.days.iter().map(|day| &day.label)
    }

    /// Number of days
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True if there are no days at all
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total number of visits across all days
    pub fn total_visits(&self) -> usize {
        self.days.iter().map(|day| day.visits.len()).sum()
    }
}

impl Serialize for ScheduleSnapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for day in &self.days {
            map.serialize_entry(day.label.as_str(), &day.visits)?;
        }
        map.end()
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = ScheduleSnapshot;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of date labels to lists of visits")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut snapshot = ScheduleSnapshot::new();
        while let Some((label, visits)) = access.next_entry::<String, Vec<Visit>>()? {
            snapshot.insert(DateLabel::new(label), visits);
        }
        Ok(snapshot)
    }
}

impl<'de> Deserialize<'de> for ScheduleSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}
