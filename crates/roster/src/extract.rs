//! Profile link extraction from the showcase page.
//!
//! The page is treated as plain text, not parsed markup. Every
//! `https://<host>/<segment>` occurrence is a candidate identity; a
//! denylist weeds out repository action paths and the showcase's own
//! links. Malformed surrounding HTML therefore cannot break extraction.

use std::collections::HashSet;
use std::path::Path;

/// Host whose profile links identify contributors.
pub const DEFAULT_PROFILE_HOST: &str = "github.com";

/// Segments that never name a profile, compared case-insensitively
/// against each candidate.
const RESERVED_SEGMENTS: &[&str] = &["fork", "pull", "issues", "wiki", "dev-card-showcase"];

/// Collect unique profile identities linked from `document`, in first
/// occurrence order.
///
/// A candidate is the path segment directly after `https://<host>/`,
/// captured over the directory's login alphabet (ASCII alphanumerics
/// and `-`). Candidates containing a reserved segment are dropped, so
/// links into the showcase repository itself never count as people.
#[must_use]
pub fn extract_identities(document: &str, host: &str) -> Vec<String> {
    let prefix = format!("https://{host}/");
    let mut seen = HashSet::new();
    let mut identities = Vec::new();

    for (index, _) in document.match_indices(&prefix) {
        let rest = &document[index + prefix.len()..];
        let segment: String = rest
            .chars()
            .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '-')
            .collect();
        if segment.is_empty() || is_reserved_segment(&segment) {
            continue;
        }
        if seen.insert(segment.clone()) {
            identities.push(segment);
        }
    }

    tracing::debug!(count = identities.len(), host, "extracted identities");
    identities
}

/// Like [`extract_identities`], reading the document from disk.
///
/// A missing or unreadable page yields no identities; the caller decides
/// whether an empty set is fatal.
#[must_use]
pub fn extract_identities_from_file(path: &Path, host: &str) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(document) => extract_identities(&document, host),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not read page");
            Vec::new()
        }
    }
}

fn is_reserved_segment(candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    RESERVED_SEGMENTS
        .iter()
        .any(|reserved| candidate.contains(reserved))
}
