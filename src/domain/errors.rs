//! Domain error types
//!
//! This module defines the error hierarchy for shiftwatch. Every collaborator
//! failure is surfaced as a typed value so the run coordinator can decide
//! between aborting and continuing. Third-party error types are never exposed.

use thiserror::Error;

/// Main shiftwatch error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum ShiftWatchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The remote schedule query failed
    #[error("Failed to download schedule: {0}")]
    Fetch(#[source] RemoteError),

    /// The location lookup for a single subject failed
    #[error("Failed to look up location for subject {subject_id}: {source}")]
    Lookup {
        /// Subject whose lookup failed
        subject_id: String,
        /// Underlying remote failure
        #[source]
        source: RemoteError,
    },

    /// An upstream record could not be normalized
    #[error("Invalid schedule record: {0}")]
    InvalidRecord(String),

    /// The previous snapshot exists but could not be read
    #[error("Failed to read saved schedule: {0}")]
    PersistenceRead(String),

    /// The new snapshot could not be written
    #[error("Failed to save schedule: {0}")]
    PersistenceWrite(String),

    /// The change notification could not be delivered
    #[error("Failed to deliver notification: {0}")]
    Delivery(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ShiftWatchError {
    /// Whether this error came from one of the remote scheduling endpoints
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Lookup { .. })
    }
}

/// Errors talking to the remote scheduling service
///
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Failed to reach the server
    #[error("Failed to connect: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Response body could not be parsed
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl RemoteError {
    /// Builds the matching variant for a non-success HTTP status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if (400..500).contains(&status) {
            Self::ClientError { status, message }
        } else {
            Self::ServerError { status, message }
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ShiftWatchError {
    fn from(err: std::io::Error) -> Self {
        ShiftWatchError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ShiftWatchError {
    fn from(err: serde_json::Error) -> Self {
        ShiftWatchError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ShiftWatchError {
    fn from(err: toml::de::Error) -> Self {
        ShiftWatchError::Configuration(format!("TOML parse error: {err}"))
    }
}
