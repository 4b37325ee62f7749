//! Raw REST client for the directory endpoints.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::contributor::{ContributorRecord, RepositorySummary};
use crate::directory::{DirectoryClient, DirectoryError, Result};
use crate::http::{HttpResponse, HttpTransport, ReqwestTransport};
use crate::rate::RateBudget;

use super::convert;
use super::types::{RawProfile, RawRepo};

/// Default REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Hard ceiling on any single directory request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("roster/", env!("CARGO_PKG_VERSION"));

const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Directory client backed by the GitHub REST API.
///
/// Owns the rate budget: every request first asks the budget for
/// permission and afterwards feeds it the response's rate headers, so
/// the allowance tracks whatever the API last reported.
pub struct GitHubDirectory<T: HttpTransport = ReqwestTransport> {
    transport: T,
    base_url: String,
    token: Option<String>,
    budget: Mutex<RateBudget>,
}

impl GitHubDirectory {
    /// Client against the public API with a default transport.
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(GITHUB_API_URL, token)
    }

    /// Client against a non-default API host, for mirrors and tests
    /// against local servers.
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(REQUEST_TIMEOUT)
            .map_err(|err| DirectoryError::network(err.to_string()))?;
        Ok(Self::with_transport(transport, base_url, token))
    }
}

impl<T: HttpTransport> GitHubDirectory<T> {
    /// Client over an explicit transport.
    pub fn with_transport(transport: T, base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            token,
            budget: Mutex::new(RateBudget::default()),
        }
    }

    /// Snapshot of the current budget state, for operator display.
    pub async fn budget(&self) -> RateBudget {
        self.budget.lock().await.clone()
    }

    fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Accept".to_string(), ACCEPT_HEADER.to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("token {token}")));
        }
        headers
    }

    /// Budget-gated GET. The budget lock is held across the request so
    /// calls stay strictly sequential per client.
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let mut budget = self.budget.lock().await;
        if !budget.acquire().await {
            return Err(DirectoryError::RateExhausted);
        }
        let response = self
            .transport
            .get(url, &self.request_headers())
            .await
            .map_err(|err| DirectoryError::network(err.to_string()))?;
        let (remaining, reset_at) = parse_rate_headers(&response);
        budget.observe(remaining, reset_at);
        Ok(response)
    }
}

fn parse_rate_headers(response: &HttpResponse) -> (Option<usize>, Option<DateTime<Utc>>) {
    let remaining = response
        .header(REMAINING_HEADER)
        .and_then(|value| value.parse::<usize>().ok());
    let reset_at = response
        .header(RESET_HEADER)
        .and_then(|value| value.parse::<i64>().ok())
        .and_then(|epoch| DateTime::from_timestamp(epoch, 0));
    (remaining, reset_at)
}

#[async_trait]
impl<T: HttpTransport> DirectoryClient for GitHubDirectory<T> {
    #[tracing::instrument(skip(self))]
    async fn fetch_profile(&self, login: &str) -> Result<ContributorRecord> {
        let url = format!("{}/users/{login}", self.base_url);
        let response = self.get(&url).await?;
        match response.status {
            200 => {
                let raw: RawProfile = serde_json::from_slice(&response.body)
                    .map_err(|err| DirectoryError::network(format!("invalid profile body: {err}")))?;
                Ok(convert::record_from_profile(raw, Utc::now()))
            }
            404 => Err(DirectoryError::not_found(login)),
            403 => Err(DirectoryError::forbidden(login)),
            status => Err(DirectoryError::Remote { status }),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_top_repositories(&self, login: &str, limit: usize) -> Vec<RepositorySummary> {
        let url = format!(
            "{}/users/{login}/repos?sort=updated&direction=desc&per_page={limit}",
            self.base_url
        );
        let response = match self.get(&url).await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(login, error = %err, "repository listing skipped");
                return Vec::new();
            }
        };
        if response.status != 200 {
            tracing::debug!(
                login,
                status = response.status,
                "repository listing unavailable"
            );
            return Vec::new();
        }
        match serde_json::from_slice::<Vec<RawRepo>>(&response.body) {
            Ok(rows) => rows
                .into_iter()
                .take(limit)
                .map(convert::summary_from_repo)
                .collect(),
            Err(err) => {
                tracing::debug!(login, error = %err, "repository listing unparsable");
                Vec::new()
            }
        }
    }
}
