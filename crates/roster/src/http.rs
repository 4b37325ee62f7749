//! Minimal HTTP boundary for directory calls.
//!
//! Directory clients speak through [`HttpTransport`] so tests can swap in
//! a scripted transport. Only GET is modeled; the sync engine never
//! writes to the remote side.

use async_trait::async_trait;
use thiserror::Error;

/// Header pairs as sent or received. Names compare case-insensitively.
pub type HttpHeaders = Vec<(String, String)>;

/// A response reduced to what the directory client needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric status code.
    pub status: u16,
    /// Response headers in arrival order.
    pub headers: HttpHeaders,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First header value matching `name`, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        header_get(&self.headers, name)
    }
}

/// Transport-level failures. Status codes are not errors at this layer;
/// callers see the full response and map statuses themselves.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request never produced a response.
    #[error("http transport error: {0}")]
    Transport(String),

    /// A scripted transport had nothing queued for the request.
    #[cfg(test)]
    #[error("no mock response queued for {0}")]
    NoMockResponse(String),
}

/// Boundary for all outbound directory I/O.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET and return the full response, whatever its status.
    async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, HttpError>;
}

/// First value for `name` in `headers`, compared case-insensitively.
#[must_use]
pub fn header_get<'a>(headers: &'a HttpHeaders, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

mod reqwest_transport {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{HttpError, HttpResponse, HttpTransport};

    /// Real transport backed by a shared reqwest client.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        /// Wrap an already configured client.
        #[must_use]
        pub fn new(client: reqwest::Client) -> Self {
            Self { client }
        }

        /// Build a transport whose every request is bounded by `timeout`.
        pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|err| HttpError::Transport(err.to_string()))?;
            Ok(Self { client })
        }
    }

    #[async_trait]
    impl HttpTransport for ReqwestTransport {
        async fn get(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> Result<HttpResponse, HttpError> {
            let mut request = self.client.get(url);
            for (name, value) in headers {
                request = request.header(name, value);
            }
            let response = request
                .send()
                .await
                .map_err(|err| HttpError::Transport(err.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response
                .bytes()
                .await
                .map_err(|err| HttpError::Transport(err.to_string()))?
                .to_vec();

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}

pub use reqwest_transport::ReqwestTransport;

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::HashMap;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{HttpError, HttpResponse, HttpTransport};

    /// One request as the mock saw it.
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub url: String,
        pub headers: Vec<(String, String)>,
    }

    /// Scripted transport: responses are queued per URL and handed out in
    /// FIFO order; every request is recorded for assertions.
    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<HashMap<String, VecDeque<HttpResponse>>>,
        failures: Mutex<HashMap<String, VecDeque<String>>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response for `url`.
        pub fn push_response(&self, url: &str, response: HttpResponse) {
            self.responses
                .lock()
                .unwrap()
                .entry(url.to_string())
                .or_default()
                .push_back(response);
        }

        /// Queue a transport failure for `url`.
        pub fn push_failure(&self, url: &str, message: &str) {
            self.failures
                .lock()
                .unwrap()
                .entry(url.to_string())
                .or_default()
                .push_back(message.to_string());
        }

        /// Everything requested so far, in order.
        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn get(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> Result<HttpResponse, HttpError> {
            self.requests.lock().unwrap().push(RecordedRequest {
                url: url.to_string(),
                headers: headers.to_vec(),
            });

            if let Some(queue) = self.failures.lock().unwrap().get_mut(url)
                && let Some(message) = queue.pop_front()
            {
                return Err(HttpError::Transport(message));
            }
            self.responses
                .lock()
                .unwrap()
                .get_mut(url)
                .and_then(VecDeque::pop_front)
                .ok_or_else(|| HttpError::NoMockResponse(url.to_string()))
        }
    }

    /// Shorthand for a JSON 200 with the given rate headers.
    pub fn json_response(body: &str, remaining: Option<u64>, reset_epoch: Option<i64>) -> HttpResponse {
        let mut headers = vec![(
            "content-type".to_string(),
            "application/json; charset=utf-8".to_string(),
        )];
        if let Some(remaining) = remaining {
            headers.push(("x-ratelimit-remaining".to_string(), remaining.to_string()));
        }
        if let Some(reset) = reset_epoch {
            headers.push(("x-ratelimit-reset".to_string(), reset.to_string()));
        }
        HttpResponse {
            status: 200,
            headers,
            body: body.as_bytes().to_vec(),
        }
    }

    /// Shorthand for a bodyless status response.
    pub fn status_response(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockTransport, status_response};
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("X-RateLimit-Remaining".to_string(), "4999".to_string()),
        ];
        assert_eq!(header_get(&headers, "content-type"), Some("application/json"));
        assert_eq!(header_get(&headers, "x-ratelimit-remaining"), Some("4999"));
        assert_eq!(header_get(&headers, "x-missing"), None);
    }

    #[test]
    fn header_lookup_returns_first_match() {
        let headers = vec![
            ("Vary".to_string(), "Accept".to_string()),
            ("vary".to_string(), "Authorization".to_string()),
        ];
        assert_eq!(header_get(&headers, "VARY"), Some("Accept"));
    }

    #[tokio::test]
    async fn mock_hands_out_queued_responses_in_order() {
        let transport = MockTransport::new();
        transport.push_response("https://api.test/a", status_response(200));
        transport.push_response("https://api.test/a", status_response(404));

        let first = transport.get("https://api.test/a", &[]).await.unwrap();
        let second = transport.get("https://api.test/a", &[]).await.unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(second.status, 404);
    }

    #[tokio::test]
    async fn mock_records_requests_with_headers() {
        let transport = MockTransport::new();
        transport.push_response("https://api.test/a", status_response(200));
        let sent = vec![("Accept".to_string(), "application/json".to_string())];

        transport.get("https://api.test/a", &sent).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://api.test/a");
        assert_eq!(requests[0].headers, sent);
    }

    #[tokio::test]
    async fn mock_errors_when_nothing_is_queued() {
        let transport = MockTransport::new();
        let err = transport.get("https://api.test/nope", &[]).await.unwrap_err();
        assert!(matches!(err, HttpError::NoMockResponse(_)));
    }

    #[tokio::test]
    async fn mock_failure_queue_produces_transport_errors() {
        let transport = MockTransport::new();
        transport.push_failure("https://api.test/a", "connection reset");
        let err = transport.get("https://api.test/a", &[]).await.unwrap_err();
        assert!(matches!(err, HttpError::Transport(message) if message == "connection reset"));
    }

    #[test]
    fn reqwest_transport_builds_with_timeout() {
        let transport = ReqwestTransport::with_timeout(std::time::Duration::from_secs(10));
        assert!(transport.is_ok());
    }
}
