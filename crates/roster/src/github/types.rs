//! GitHub REST API wire types.
//!
//! Only the fields the snapshot carries are modeled; everything else in
//! the payload is ignored on deserialization.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Profile payload from `GET /users/{login}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub public_gists: u64,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// The API reports an unset blog as `""` rather than `null`.
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of `GET /users/{login}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub html_url: String,
}
