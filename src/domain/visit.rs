//! Visit domain model
//!
//! A [`Visit`] is the canonical record of one non-cancelled appointment. All
//! four fields take part in equality, which is what the differ matches on.
//! On disk a visit is a four element array `[time, subject, location, service]`.

use super::ids::SubjectId;
use serde::{Deserialize, Serialize};

/// One scheduled, non-cancelled visit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "VisitRecord", into = "VisitRecord")]
pub struct Visit {
    time: String,
    subject_id: SubjectId,
    location: String,
    service: String,
}

/// Positional wire form of a visit
#[derive(Serialize, Deserialize)]
struct VisitRecord(String, SubjectId, String, String);

impl From<VisitRecord> for Visit {
    fn from(record: VisitRecord) -> Self {
        let VisitRecord(time, subject_id, location, service) = record;
        Self {
            time,
            subject_id,
            location,
            service,
        }
    }
}

impl From<Visit> for VisitRecord {
    fn from(visit: Visit) -> Self {
        VisitRecord(visit.time, visit.subject_id, visit.location, visit.service)
    }
}

impl Visit {
    /// Creates a visit from already normalized fields
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftwatch::domain::{SubjectId, Visit};
    ///
    /// let visit = Visit::new("09:00", SubjectId::new("P1").unwrap(), "CityX", "Nursing");
    /// assert_eq!(visit.service(), "Nursing");
    /// ```
    pub fn new(
        time: impl Into<String>,
        subject_id: SubjectId,
        location: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            subject_id,
            location: location.into(),
            service: service.into(),
        }
    }

    /// Start time of day, `HH:MM`
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Subject the visit is for
    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    /// Location label (the subject's city)
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Cleaned service label
    pub fn service(&self) -> &str {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(time: &str, subject: &str) -> Visit {
        Visit::new(time, SubjectId::new(subject).unwrap(), "CityX", "Nursing")
    }

    #[test]
    fn test_visit_serializes_as_array() {
        let json = serde_json::to_string(&visit("09:00", "P1")).unwrap();
        assert_eq!(json, r#"["09:00","P1","CityX","Nursing"]"#);
    }

    #[test]
    fn test_visit_reads_numeric_subject() {
        let parsed: Visit = serde_json::from_str(r#"["09:00", 40112, "CityX", "Nursing"]"#).unwrap();
        assert_eq!(parsed.subject_id().as_str(), "40112");
        assert_eq!(parsed.time(), "09:00");
        assert_eq!(parsed.location(), "CityX");
    }

    #[test]
    fn test_visit_rejects_short_record() {
        assert!(serde_json::from_str::<Visit>(r#"["09:00", "P1", "CityX"]"#).is_err());
    }

    #[test]
    fn test_visit_equality_uses_every_field() {
        assert_eq!(visit("09:00", "P1"), visit("09:00", "P1"));
        assert_ne!(visit("09:00", "P1"), visit("09:30", "P1"));
        assert_ne!(visit("09:00", "P1"), visit("09:00", "P2"));
    }
}
