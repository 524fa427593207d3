//! Append-only NDJSON interaction log.
//!
//! One [`InteractionRecord`] per line, UTF-8, no header, no rotation. Each
//! record is written with a single `write` on a file opened in append mode,
//! through `tokio::fs` so the runtime thread never blocks on disk.

use crate::TelemetryError;
use crate::record::InteractionRecord;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

pub struct InteractionLog {
    path: PathBuf,
    warned: AtomicBool,
}

impl InteractionLog {
    /// Open the log at `path`, creating its parent directory and the file.
    ///
    /// Fails if the location cannot be created or written, so a broken log
    /// path surfaces at startup rather than on the first message.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TelemetryError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TelemetryError::LogUnavailable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| TelemetryError::LogUnavailable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!(path = %path.display(), "Interaction log ready");
        Ok(Self {
            path,
            warned: AtomicBool::new(false),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as one line.
    pub async fn append(&self, record: &InteractionRecord) -> Result<(), TelemetryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Append, dropping the record on failure. Only the first failure is
    /// reported as a warning; later ones go to debug.
    pub async fn record(&self, record: &InteractionRecord) {
        if let Err(e) = self.append(record).await {
            if !self.warned.swap(true, Ordering::Relaxed) {
                warn!(path = %self.path.display(), error = %e, "Failed to write interaction log; records will be dropped");
            } else {
                debug!(error = %e, "Interaction record dropped");
            }
        }
    }
}

/// Read every well-formed record in the log. Blank and malformed lines are
/// skipped; a missing file reads as empty.
pub fn read_records(path: &Path) -> Result<Vec<InteractionRecord>, TelemetryError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut skipped = 0usize;
    let records: Vec<InteractionRecord> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str(line) {
            Ok(record) => Some(record),
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, "Skipped malformed interaction log lines");
    }
    Ok(records)
}
