//! JSON file snapshot store
//!
//! The file is a JSON object keyed by date label with 4-space indentation,
//! the same layout older versions of the tool wrote. Saves go through a
//! sibling temp file and a rename so a crash never leaves half a snapshot.

use super::SnapshotStore;
use crate::domain::{Result, ScheduleSnapshot, ShiftWatchError};
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Snapshot store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for `path`; nothing is touched until load or save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Serializes a snapshot with 4-space indentation
pub fn to_pretty_json(snapshot: &ScheduleSnapshot) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    snapshot.serialize(&mut serializer)?;
    Ok(buf)
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Result<Option<ScheduleSnapshot>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No saved schedule found");
                return Ok(None);
            }
            Err(e) => {
                return Err(ShiftWatchError::PersistenceRead(format!(
                    "{}: {e}",
                    self.path.display()
                )))
            }
        };

        let snapshot: ScheduleSnapshot = serde_json::from_str(&contents).map_err(|e| {
            ShiftWatchError::PersistenceRead(format!("{}: {e}", self.path.display()))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            days = snapshot.len(),
            visits = snapshot.total_visits(),
            "Loaded saved schedule"
        );
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &ScheduleSnapshot) -> Result<()> {
        let write_err =
            |e: std::io::Error| ShiftWatchError::PersistenceWrite(format!("{}: {e}", self.path.display()));

        let bytes = to_pretty_json(snapshot)
            .map_err(|e| ShiftWatchError::PersistenceWrite(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, &bytes).await.map_err(write_err)?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(write_err)?;

        tracing::debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            "Saved schedule"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
