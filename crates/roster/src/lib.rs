//! Roster keeps a static page's contributor snapshot in sync with a
//! GitHub-style user directory.
//!
//! The pipeline: identities come from an explicit list or from scanning
//! the page for profile links ([`extract`]); each identity is resolved
//! against the directory ([`directory`], [`github`]) under a call budget
//! ([`rate`]); results merge with the prior snapshot so fresh cache
//! entries skip their fetch and failures fall back to the last known
//! record ([`sync`]); the merged snapshot is written back in one
//! terminal write ([`store`]).
//!
//! # Example
//!
//! ```no_run
//! use roster::github::GitHubDirectory;
//! use roster::store::SnapshotStore;
//! use roster::sync::{SyncOptions, sync_contributors};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubDirectory::new(std::env::var("GITHUB_TOKEN").ok())?;
//! let store = SnapshotStore::new("contributors.json");
//! let identities = vec!["octocat".to_string()];
//!
//! let report = sync_contributors(&client, &identities, &store, &SyncOptions::default(), None).await?;
//! println!("refreshed {} contributors", report.refreshed);
//! # Ok(())
//! # }
//! ```

pub mod contributor;
pub mod directory;
pub mod extract;
pub mod github;
pub mod http;
pub mod rate;
pub mod store;
pub mod sync;

pub use contributor::{ContributionSummary, ContributorRecord, RepositorySummary, Snapshot};
pub use directory::{DirectoryClient, DirectoryError};
pub use rate::RateBudget;
pub use store::{SnapshotStore, StoreError};
pub use sync::{SyncOptions, SyncProgress, SyncReport, sync_contributors};
