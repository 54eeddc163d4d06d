//! HTTP fetcher
//!
//! One `reqwest::Client` configured from `HttpConfig`, wrapped behind a small
//! contract: single attempt per request, fixed timeout, no retries, no
//! backoff. Errors are classified into the closed `NetworkError` taxonomy so
//! callers can branch on kind rather than message text.

use crate::config::HttpConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a single fetch attempt
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid request URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },
}

/// Raw outcome of a successful HTTP exchange
///
/// The status is carried rather than checked: whether a non-2xx response is
/// fatal is the caller's decision. Callers that do want 2xx-or-error use
/// [`FetchedPage::into_ok`].
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status: u16,

    /// Response body text
    pub body: String,
}

impl FetchedPage {
    /// True when the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Converts a non-2xx response into `NetworkError::Status`
    pub fn into_ok(self) -> Result<FetchedPage, NetworkError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(NetworkError::Status {
                url: self.final_url,
                status: self.status,
            })
        }
    }
}

/// HTTP fetcher over a configured client
///
/// # Example
///
/// ```no_run
/// use camsweep::config::HttpConfig;
/// use camsweep::scrape::Fetcher;
///
/// let fetcher = Fetcher::new(&HttpConfig::default()).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Builds a fetcher from the HTTP configuration
    ///
    /// Header names/values that do not survive the trip into a `HeaderMap`
    /// are dropped with a warning; they were already shape-checked during
    /// config validation.
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => {
                    tracing::warn!(header = %name, "skipping unparseable configured header");
                }
            }
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Issues a GET request, single attempt
    pub async fn get(&self, url: &str) -> Result<FetchedPage, NetworkError> {
        let request = self.client.get(url);
        self.execute(url, request).await
    }

    /// Issues a GET request and requires a 2xx response
    pub async fn get_ok(&self, url: &str) -> Result<FetchedPage, NetworkError> {
        self.get(url).await?.into_ok()
    }

    /// Issues a form-encoded POST request, single attempt
    pub async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<FetchedPage, NetworkError> {
        let request = self.client.post(url).form(form);
        self.execute(url, request).await
    }

    async fn execute(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<FetchedPage, NetworkError> {
        let response = request.send().await.map_err(|e| classify(url, e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        let body = response.text().await.map_err(|e| classify(url, e))?;

        Ok(FetchedPage {
            final_url,
            status,
            body,
        })
    }
}

/// Classifies a reqwest error into the `NetworkError` taxonomy
fn classify(url: &str, error: reqwest::Error) -> NetworkError {
    if error.is_timeout() {
        NetworkError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        NetworkError::Connect {
            url: url.to_string(),
        }
    } else if error.is_builder() {
        NetworkError::InvalidUrl {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        NetworkError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
