//! Page fetching
//!
//! The crawl loop only depends on [`PageFetcher`]: give it a URL, get back
//! the page markup or a definitive [`FetchError`]. [`HttpFetcher`] is the
//! plain-HTTP implementation; a browser-driven fetcher can implement the same
//! trait, and whoever owns the browser opens and closes it around the crawl.

use crate::config::FetchConfig;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Desktop browser user agents rotated when none is configured
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:90.0) Gecko/20100101 Firefox/90.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4515.107 Safari/537.36",
];

/// Errors reported by a fetch collaborator
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },
}

/// Something that can turn a URL into page markup
///
/// Implementations must report failures through `FetchError` rather than
/// panicking. Timeouts are the implementation's responsibility.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Picks the configured user agent, or a random one from [`USER_AGENTS`]
pub fn pick_user_agent(config: &FetchConfig) -> String {
    match &config.user_agent {
        Some(agent) => agent.clone(),
        None => USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0])
            .to_string(),
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use review_ripple::config::FetchConfig;
/// use review_ripple::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(pick_user_agent(config))
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Plain HTTP fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

/// Returns true for statuses whose body is handed to the page classifier
///
/// Block and not-found pages carry the markers the classifier looks for, so
/// their bodies are returned rather than turned into errors.
fn is_classifiable(status: StatusCode) -> bool {
    status.is_success()
        || status == StatusCode::FORBIDDEN
        || status == StatusCode::NOT_FOUND
        || status == StatusCode::GONE
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(url.as_str()).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else if e.is_connect() {
                FetchError::Connect {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            } else {
                FetchError::Request {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !is_classifiable(status) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&FetchConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_configured_user_agent_wins() {
        let config = FetchConfig {
            user_agent: Some("ReviewBot/1.0".to_string()),
            ..FetchConfig::default()
        };
        assert_eq!(pick_user_agent(&config), "ReviewBot/1.0");
    }

    #[test]
    fn test_rotated_user_agent_comes_from_list() {
        let agent = pick_user_agent(&FetchConfig::default());
        assert!(USER_AGENTS.contains(&agent.as_str()));
    }

    #[test]
    fn test_classifiable_statuses() {
        assert!(is_classifiable(StatusCode::OK));
        assert!(is_classifiable(StatusCode::FORBIDDEN));
        assert!(is_classifiable(StatusCode::NOT_FOUND));
        assert!(!is_classifiable(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_classifiable(StatusCode::TOO_MANY_REQUESTS));
    }
}
