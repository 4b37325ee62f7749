//! Sync options, report, and tuning constants.

/// Hours a cached record stays fresh enough to skip its refetch.
pub const FRESHNESS_WINDOW_HOURS: i64 = 24;

/// Pause separating consecutive identities, in milliseconds.
pub const IDENTITY_PAUSE_MS: u64 = 500;

/// Repositories consulted when composing aggregate counters.
pub const SUMMARY_REPO_LIMIT: usize = 10;

/// Knobs for one sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Refetch every identity even when its cached record is fresh.
    pub force: bool,
    /// Compute the new snapshot but skip the terminal write.
    pub dry_run: bool,
}

/// Per-outcome counts for a completed run.
///
/// Every identity in the target set lands in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Refreshed from the directory.
    pub refreshed: usize,
    /// Copied unchanged from a fresh cache entry.
    pub from_cache: usize,
    /// Carried forward after a failed fetch.
    pub carried_forward: usize,
    /// Neither fetched nor previously known; absent from the snapshot.
    pub unresolved: usize,
}

impl SyncReport {
    /// Identities processed in total.
    #[must_use]
    pub fn total(&self) -> usize {
        self.refreshed + self.from_cache + self.carried_forward + self.unresolved
    }

    /// Identities present in the produced snapshot.
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.refreshed + self.from_cache + self.carried_forward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_a_plain_run() {
        let options = SyncOptions::default();
        assert!(!options.force);
        assert!(!options.dry_run);
    }

    #[test]
    fn report_arithmetic_covers_all_buckets() {
        let report = SyncReport {
            refreshed: 3,
            from_cache: 2,
            carried_forward: 1,
            unresolved: 4,
        };
        assert_eq!(report.total(), 10);
        assert_eq!(report.resolved(), 6);
    }
}
