//! Review-Ripple: a patient review-feed crawler
//!
//! This crate walks the paginated review feed of a single retail site and turns
//! each page's rendered markup into structured review records, deciding page
//! over page whether to keep going.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Review-Ripple operations
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// URL validation errors
///
/// These are fatal for a crawl: nothing is fetched and no records are returned.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("URL {url} does not belong to {domain}")]
    NotTargetSite { url: String, domain: String },

    #[error("Product URL has no product id (pid): {0}")]
    MissingProductId(String),

    #[error("Could not derive a review URL from product path: {0}")]
    UnrecognizedProductPath(String),
}

/// Result type alias for Review-Ripple operations
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, ReviewCrawler};
pub use extract::{ReviewRecord, Segmenter};
pub use state::{CrawlState, StopReason};
