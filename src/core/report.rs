//! Console rendering of a snapshot

use crate::domain::ScheduleSnapshot;
use std::fmt::Write as _;

/// Placeholder line for a day without visits
pub const NO_VISITS: &str = "  No Visits Scheduled";

/// Renders a snapshot as a day-by-day table
///
/// Each day is its label followed by one line per visit (or
/// [`NO_VISITS`]) and a blank line.
pub fn render_snapshot(snapshot: &ScheduleSnapshot) -> String {
    let mut out = String::new();

    for day in snapshot.days() {
        let _ = writeln!(out, "{}", day.label);
        if day.visits.is_empty() {
            let _ = writeln!(out, "{NO_VISITS}");
        }
        for visit in &day.visits {
            let _ = writeln!(
                out,
                "  {}  {:6} {:15} {}",
                visit.time(),
                visit.subject_id().as_str(),
                visit.location(),
                visit.service()
            );
        }
        out.push('\n');
    }

    out
}
