//! Progress reporting for sync runs.
//!
//! The engine stays silent on stdout; callers install a callback and
//! render events however suits them, whether progress bars or log lines.

/// Events emitted while a sync run advances.
///
/// Non-exhaustive so new events can appear without breaking downstream
/// matches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyncProgress {
    /// The prior snapshot was loaded, or the run started empty.
    SnapshotLoaded {
        /// Records found in the prior snapshot.
        contributors: usize,
    },
    /// The identity loop is starting.
    SyncingContributors {
        /// Identities in the target set.
        count: usize,
    },
    /// A cached record was fresh enough to keep without fetching.
    CacheFresh {
        login: String,
        /// Whole hours since the record was last synced.
        age_hours: i64,
    },
    /// A directory fetch is starting for this login.
    Refreshing { login: String },
    /// The login was refreshed from the directory.
    Refreshed { login: String },
    /// The fetch failed; the prior record was carried forward.
    CarriedForward { login: String, error: String },
    /// The fetch failed and no prior record exists.
    Unresolved { login: String, error: String },
    /// The new snapshot was written.
    SnapshotSaved {
        /// Records in the written snapshot.
        contributors: usize,
    },
    /// The run finished; counts mirror [`super::SyncReport`].
    SyncComplete {
        refreshed: usize,
        from_cache: usize,
        carried_forward: usize,
        unresolved: usize,
    },
    /// A non-fatal condition worth surfacing to the operator.
    Warning { message: String },
}

/// Callback used to deliver progress events.
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Send `event` to the callback, if one is installed.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: SyncProgress) {
    if let Some(callback) = on_progress {
        callback(event);
    }
}
