//! Wire-to-domain conversions.

use chrono::{DateTime, Utc};

use crate::contributor::{ContributorRecord, RepositorySummary};

use super::types::{RawProfile, RawRepo};

/// Build a domain record from a profile payload.
///
/// `synced_at` becomes the record's freshness stamp. A missing display
/// name falls back to the login, and blank-string fields collapse to
/// absent since the API uses `""` for unset.
pub(crate) fn record_from_profile(raw: RawProfile, synced_at: DateTime<Utc>) -> ContributorRecord {
    let name = match raw.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => raw.login.clone(),
    };
    ContributorRecord {
        login: raw.login,
        name,
        bio: none_if_blank(raw.bio),
        avatar_url: raw.avatar_url,
        html_url: raw.html_url,
        followers: raw.followers,
        following: raw.following,
        public_repos: raw.public_repos,
        public_gists: raw.public_gists,
        company: none_if_blank(raw.company),
        location: none_if_blank(raw.location),
        blog: none_if_blank(raw.blog),
        twitter_username: none_if_blank(raw.twitter_username),
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        total_stars: None,
        total_forks: None,
        last_synced_at: synced_at,
    }
}

pub(crate) fn summary_from_repo(raw: RawRepo) -> RepositorySummary {
    RepositorySummary {
        name: raw.name,
        description: raw.description,
        language: raw.language,
        stars: raw.stargazers_count,
        forks: raw.forks_count,
        url: raw.html_url,
    }
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
