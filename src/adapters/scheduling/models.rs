//! Wire models for the scheduling API
//!
//! These mirror the JSON returned by the shifts and patient endpoints. Fields
//! the service sometimes sends as `null` or omits are optional here and
//! normalized by the visit builder.

use crate::domain::SubjectId;
use serde::{Deserialize, Serialize};

/// One item of the `getshifts` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawShift {
    /// Patient the shift is for; `null` for unassigned or admin shifts
    #[serde(default)]
    pub patient: Option<PatientRef>,

    /// Cancellation flag
    #[serde(default)]
    pub is_cancelled: Option<bool>,

    /// ISO-8601 start timestamp; only required once the shift is accepted
    #[serde(default)]
    pub start: Option<String>,

    /// Service descriptor
    #[serde(default)]
    pub service: Option<ServiceRef>,
}

impl RawShift {
    /// Builds a raw shift by hand, mostly useful for fixtures
    pub fn new(
        patient: Option<SubjectId>,
        is_cancelled: bool,
        start: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            patient: patient.map(|id| PatientRef { id }),
            is_cancelled: Some(is_cancelled),
            start: Some(start.into()),
            service: Some(ServiceRef {
                name: service_name.into(),
            }),
        }
    }

    /// Subject id, if the shift has a patient
    pub fn subject_id(&self) -> Option<&SubjectId> {
        self.patient.as_ref().map(|p| &p.id)
    }

    /// Whether the shift was cancelled; a missing flag means not cancelled
    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled.unwrap_or(false)
    }

    /// Raw start timestamp, if the service sent one
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Raw service descriptor, empty when absent
    pub fn service_name(&self) -> &str {
        self.service.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }
}

/// Nested patient reference of a shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRef {
    /// Patient id
    pub id: SubjectId,
}

/// Nested service reference of a shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRef {
    /// Descriptor such as `"RN-Wound Care Visit"`
    #[serde(default)]
    pub name: String,
}

/// Response of the patient endpoint; only the city is used
#[derive(Debug, Clone, Deserialize)]
pub struct PatientRecord {
    /// City the patient lives in
    pub city: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_shift_from_api_json() {
        let json = r#"{
            "id": 99,
            "patient": {"id": 40112, "name": "ignored"},
            "is_cancelled": false,
            "start": "2024-01-02T09:00:00",
            "end": "2024-01-02T10:00:00",
            "service": {"id": 3, "name": "RN-Foo Visit"}
        }"#;

        let shift: RawShift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.subject_id().unwrap().as_str(), "40112");
        assert!(!shift.is_cancelled());
        assert_eq!(shift.service_name(), "RN-Foo Visit");
    }

    #[test]
    fn test_raw_shift_with_null_patient() {
        let json = r#"{"patient": null, "is_cancelled": null, "start": "2024-01-02T09:00:00"}"#;

        let shift: RawShift = serde_json::from_str(json).unwrap();
        assert!(shift.subject_id().is_none());
        assert!(!shift.is_cancelled());
        assert_eq!(shift.service_name(), "");
    }

    #[test]
    fn test_rejected_items_may_lack_start() {
        let json = r#"[
            {"patient": {"id": 7}, "is_cancelled": false, "start": "2024-01-02T09:00:00"},
            {"patient": null, "is_cancelled": true, "start": null, "service": null},
            {"patient": null}
        ]"#;

        let shifts: Vec<RawShift> = serde_json::from_str(json).unwrap();
        assert_eq!(shifts.len(), 3);
        assert_eq!(shifts[0].start(), Some("2024-01-02T09:00:00"));
        assert_eq!(shifts[1].start(), None);
        assert_eq!(shifts[2].start(), None);
    }

    #[test]
    fn test_patient_record_ignores_other_fields() {
        let record: PatientRecord =
            serde_json::from_str(r#"{"id": 1, "city": "Springfield", "first_name": "A"}"#).unwrap();
        assert_eq!(record.city.as_deref(), Some("Springfield"));
    }
}
