//! Contributor synchronization.
//!
//! [`sync_contributors`] drives the whole pipeline for a target identity
//! set: cache freshness checks, directory fetches, fallback to the last
//! known record, and the single terminal snapshot write.

mod engine;
mod progress;
mod types;

pub use engine::sync_contributors;
pub use progress::{ProgressCallback, SyncProgress, emit};
pub use types::{
    FRESHNESS_WINDOW_HOURS, IDENTITY_PAUSE_MS, SUMMARY_REPO_LIMIT, SyncOptions, SyncReport,
};
