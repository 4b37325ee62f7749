//! GitHub-backed directory client.
//!
//! Speaks the REST API directly over [`crate::http::HttpTransport`] with
//! a handful of raw wire types; the surface used here is small enough
//! that a full API client would be dead weight.

mod client;
mod convert;
mod types;

pub use client::{GITHUB_API_URL, GitHubDirectory, REQUEST_TIMEOUT};
pub use types::{RawProfile, RawRepo};
