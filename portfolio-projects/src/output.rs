//! Offline output.

use crate::projects::AggregationResult;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while writing the projects file.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the parent directory or write the file.
    #[error("Failed to write '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the document.
    #[error("Failed to serialize projects: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes `result` as pretty-printed JSON, replacing any existing file.
///
/// # Errors
///
/// Returns [`OutputError`] if serialization or the write fails.
pub fn write_projects(path: &Path, result: &AggregationResult) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(result)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| OutputError::IoError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    std::fs::write(path, json).map_err(|e| OutputError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    info!(path = %path.display(), count = result.count(), "Projects file written");
    Ok(())
}
