//! Snapshot persistence.
//!
//! The snapshot lives in a single JSON document. The engine's canonical
//! layout is the bare login-to-record mapping; the demo data generator
//! wraps the same mapping in `{ "_metadata": ..., "contributors": ... }`,
//! so the loader unwraps that shape too. Saves always produce the bare
//! form.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::contributor::Snapshot;

/// Errors from snapshot reads and writes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but could not be read.
    #[error("Failed to read snapshot {}: {message}", path.display())]
    Read {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying cause, flattened to text.
        message: String,
    },

    /// The file was read but is not a valid snapshot document.
    #[error("Failed to parse snapshot {}: {message}", path.display())]
    Parse {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying cause, flattened to text.
        message: String,
    },

    /// The snapshot could not be written back.
    #[error("Failed to write snapshot {}: {message}", path.display())]
    Write {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying cause, flattened to text.
        message: String,
    },
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Loads and saves the contributor snapshot at a fixed path.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

/// Enveloped layout written by the demo data generator.
#[derive(Deserialize)]
struct EnvelopedSnapshot {
    contributors: Snapshot,
}

impl SnapshotStore {
    /// A store over the snapshot file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot path this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing file is an empty snapshot, not an
    /// error; first runs start from nothing.
    ///
    /// Read and parse failures are returned so the caller can report
    /// them before proceeding as if no prior snapshot existed.
    pub fn load(&self) -> Result<Snapshot> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no snapshot yet, starting empty");
                return Ok(Snapshot::new());
            }
            Err(err) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    message: err.to_string(),
                });
            }
        };
        parse_snapshot(&text).map_err(|err| StoreError::Parse {
            path: self.path.clone(),
            message: err.to_string(),
        })
    }

    /// Overwrite the snapshot file with the full mapping, pretty-printed
    /// for diffable commits.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let body = serde_json::to_vec_pretty(snapshot).map_err(|err| StoreError::Write {
            path: self.path.clone(),
            message: err.to_string(),
        })?;
        std::fs::write(&self.path, body).map_err(|err| StoreError::Write {
            path: self.path.clone(),
            message: err.to_string(),
        })?;
        tracing::debug!(
            path = %self.path.display(),
            contributors = snapshot.len(),
            "snapshot written"
        );
        Ok(())
    }
}

/// Try the bare mapping first, then the enveloped shape. When both fail
/// the bare error is reported since that is the canonical layout.
fn parse_snapshot(text: &str) -> serde_json::Result<Snapshot> {
    match serde_json::from_str::<Snapshot>(text) {
        Ok(snapshot) => Ok(snapshot),
        Err(bare_err) => match serde_json::from_str::<EnvelopedSnapshot>(text) {
            Ok(envelope) => Ok(envelope.contributors),
            Err(_) => Err(bare_err),
        },
    }
}
