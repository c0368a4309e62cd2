//! Notification message rendering
//!
//! ```
//! use shiftwatch::core::diff::{ChangeEvent, ChangeKind};
//! use shiftwatch::core::notify::NotificationFormatter;
//! use shiftwatch::domain::{DateLabel, SubjectId, Visit};
//!
//! let event = ChangeEvent {
//!     label: DateLabel::from("Jan 02"),
//!     kind: ChangeKind::Added,
//!     visit: Visit::new("09:00", SubjectId::new("P1").unwrap(), "CityX", "Nursing"),
//! };
//! let body = NotificationFormatter::new().format(&[event]);
//! assert_eq!(body, "Jan 02:\n (+) Nursing, CityX\n");
//! ```

use crate::core::diff::ChangeEvent;
use std::fmt::Write as _;

/// Renders change events into a plain-text message body
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationFormatter;

impl NotificationFormatter {
    /// Create a formatter
    pub fn new() -> Self {
        Self
    }

    /// Message body for `events`; empty when there are none
    ///
    /// Consecutive events on the same day share one heading and headings are
    /// separated by a blank line.
    pub fn format(&self, events: &[ChangeEvent]) -> String {
        let mut body = String::new();

        for (i, event) in events.iter().enumerate() {
            let new_group = i == 0 || events[i - 1].label != event.label;
            if new_group {
                if i > 0 {
                    body.push('\n');
                }
                let _ = writeln!(body, "{}:", event.label);
            }
            let _ = writeln!(
                body,
                " {} {}, {}",
                event.kind.marker(),
                event.visit.service(),
                event.visit.location()
            );
        }

        body
    }
}
