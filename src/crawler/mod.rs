//! Crawler module for walking a product's review feed
//!
//! This module contains the core crawling logic, including:
//! - Fetching pages through a pluggable fetcher
//! - Classifying blocked, missing and review-less pages
//! - Deciding whether and where the next page is
//! - Overall crawl coordination with polite pauses

mod classifier;
mod coordinator;
mod delay;
mod fetcher;
mod pagination;
mod progress;

pub use classifier::{classify, PageVerdict};
pub use coordinator::{CrawlReport, ReviewCrawler};
pub use delay::DelayRange;
pub use fetcher::{
    build_http_client, pick_user_agent, FetchError, HttpFetcher, PageFetcher, USER_AGENTS,
};
pub use pagination::Paginator;
pub use progress::{ProgressSink, TracingProgress};

use crate::config::Config;
use crate::ReviewError;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl over plain HTTP
///
/// This is the main entry point for scraping a review feed. It will:
/// 1. Build the HTTP client
/// 2. Validate the URL and rewrite product pages to their review feed
/// 3. Fetch, classify and segment pages until a stop condition fires
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `start_url` - Product or review feed URL
/// * `cancel` - Token that stops the crawl at the next page boundary
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl finished, possibly early; see its stop reason
/// * `Err(ReviewError)` - The URL or configuration was rejected
pub async fn crawl(
    config: &Config,
    start_url: &str,
    cancel: CancellationToken,
) -> Result<CrawlReport, ReviewError> {
    let fetcher = HttpFetcher::new(&config.fetch)?;
    let crawler = ReviewCrawler::new(fetcher, config)?.with_cancellation(cancel);

    let report = crawler
        .crawl(
            start_url,
            config.crawler.max_pages,
            config.crawler.start_page,
        )
        .await?;

    Ok(report)
}
