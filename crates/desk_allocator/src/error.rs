use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AllocatorError>;

#[derive(Debug, Error)]
pub enum AllocatorError {
    #[error("Snapshot integrity error for area {area_id}: {message}")]
    SnapshotIntegrity { area_id: String, message: String },

    #[error("Failed to read snapshot file {path}")]
    ReadSnapshot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse snapshot file {path}")]
    ParseSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl AllocatorError {
    pub(crate) fn integrity(area_id: &str, message: impl Into<String>) -> Self {
        AllocatorError::SnapshotIntegrity {
            area_id: area_id.to_string(),
            message: message.into(),
        }
    }
}
