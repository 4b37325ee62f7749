//! The directory client trait.

use async_trait::async_trait;

use crate::contributor::{ContributionSummary, ContributorRecord, RepositorySummary};
use crate::sync::SUMMARY_REPO_LIMIT;

use super::errors::Result;

/// A read-only view of the user directory.
///
/// Implementations must be safe to share across tasks; the engine holds
/// one client for a whole run.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetch one contributor profile.
    ///
    /// On success the record's `last_synced_at` carries the fetch time.
    async fn fetch_profile(&self, login: &str) -> Result<ContributorRecord>;

    /// The most recently updated public repositories, newest first, at
    /// most `limit` of them.
    ///
    /// Repository data only enriches a profile, so any failure degrades
    /// to an empty list instead of surfacing an error.
    async fn fetch_top_repositories(&self, login: &str, limit: usize) -> Vec<RepositorySummary>;

    /// Compose profile counters with aggregates over recent repositories.
    ///
    /// Fails only when the profile fetch itself fails. A repository
    /// failure zero-fills the star and fork totals instead, so a summary
    /// is never lost to the flakier half of the pair.
    async fn fetch_contribution_summary(&self, login: &str) -> Result<ContributionSummary> {
        let profile = self.fetch_profile(login).await?;
        let repositories = self.fetch_top_repositories(login, SUMMARY_REPO_LIMIT).await;
        Ok(ContributionSummary {
            total_repos: profile.public_repos,
            total_stars: repositories.iter().map(|repo| repo.stars).sum(),
            total_forks: repositories.iter().map(|repo| repo.forks).sum(),
            followers: profile.followers,
            following: profile.following,
        })
    }
}
