//! Contributor records and the persisted snapshot shape.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The persisted state: login mapped to the last known record.
///
/// A `BTreeMap` keeps the serialized document in stable key order, so
/// consecutive runs over the same data produce identical files.
pub type Snapshot = BTreeMap<String, ContributorRecord>;

/// One contributor's last known state.
///
/// Field names double as the JSON keys the showcase page reads, so they
/// follow the directory's own vocabulary rather than inventing a second
/// one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributorRecord {
    /// Stable login handle; also the snapshot key.
    pub login: String,
    /// Display name; falls back to the login when the directory has none.
    pub name: String,
    /// Short biography text.
    #[serde(default)]
    pub bio: Option<String>,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Public profile page URL.
    pub html_url: String,
    /// Follower count.
    pub followers: u64,
    /// Accounts this contributor follows.
    pub following: u64,
    /// Public repository count.
    pub public_repos: u64,
    /// Public gist count.
    pub public_gists: u64,
    /// Company or affiliation line.
    #[serde(default)]
    pub company: Option<String>,
    /// Free-form location.
    #[serde(default)]
    pub location: Option<String>,
    /// External website link.
    #[serde(default)]
    pub blog: Option<String>,
    /// Social handle.
    #[serde(default)]
    pub twitter_username: Option<String>,
    /// When the account was created, per the directory.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated, per the directory.
    pub updated_at: DateTime<Utc>,
    /// Stars across the most recently updated repositories, when known.
    #[serde(default)]
    pub total_stars: Option<u64>,
    /// Forks across the most recently updated repositories, when known.
    #[serde(default)]
    pub total_forks: Option<u64>,
    /// When this record was last refreshed from the directory.
    pub last_synced_at: DateTime<Utc>,
}

impl ContributorRecord {
    /// Overlay composed summary counters onto this record.
    ///
    /// Summary values win over the plain profile fields, never the other
    /// way around.
    pub fn apply_summary(&mut self, summary: &ContributionSummary) {
        self.public_repos = summary.total_repos;
        self.followers = summary.followers;
        self.following = summary.following;
        self.total_stars = Some(summary.total_stars);
        self.total_forks = Some(summary.total_forks);
    }

    /// Age of this record relative to `now`.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_synced_at
    }
}

/// A repository row used only to derive aggregate counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    /// Repository name without the owner prefix.
    pub name: String,
    /// Short description, when set.
    pub description: Option<String>,
    /// Primary language, when detected.
    pub language: Option<String>,
    /// Star count.
    pub stars: u64,
    /// Fork count.
    pub forks: u64,
    /// Repository page URL.
    pub url: String,
}

/// Counters composed from a profile plus its recent repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionSummary {
    /// Public repository count from the profile.
    pub total_repos: u64,
    /// Stars summed over the consulted repositories.
    pub total_stars: u64,
    /// Forks summed over the consulted repositories.
    pub total_forks: u64,
    /// Follower count from the profile.
    pub followers: u64,
    /// Following count from the profile.
    pub following: u64,
}
