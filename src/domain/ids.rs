//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that flow through a run, so a subject
//! id can never be confused with a date label.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subject (patient) identifier newtype wrapper
///
/// The scheduling service returns numeric ids, while snapshots written by
/// earlier versions may store them either as JSON numbers or strings. Both
/// forms deserialize to the same value; serialization always emits a string.
///
/// # Examples
///
/// ```
/// use shiftwatch::domain::ids::SubjectId;
/// use std::str::FromStr;
///
/// let subject = SubjectId::from_str("40112").unwrap();
/// assert_eq!(subject.as_str(), "40112");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SubjectId(String);

impl SubjectId {
    /// Creates a new SubjectId from a string
    ///
    /// Returns `Err` if the id is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Subject ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the subject ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubjectId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSubjectId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl<'de> Deserialize<'de> for SubjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match RawSubjectId::deserialize(deserializer)? {
            RawSubjectId::Text(s) => s,
            RawSubjectId::Unsigned(n) => n.to_string(),
            RawSubjectId::Signed(n) => n.to_string(),
        };
        SubjectId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Calendar day label in the `"Mon DD"` form used as snapshot key
///
/// # Examples
///
/// ```
/// use shiftwatch::domain::ids::DateLabel;
/// use chrono::NaiveDate;
///
/// let label = DateLabel::from_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
/// assert_eq!(label.as_str(), "Jan 02");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateLabel(String);

impl DateLabel {
    /// strftime pattern for date labels
    pub const FORMAT: &'static str = "%b %d";

    /// Formats a calendar date as a label
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(Self::FORMAT).to_string())
    }

    /// Wraps an already formatted label, e.g. one read from a saved snapshot
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DateLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DateLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}
