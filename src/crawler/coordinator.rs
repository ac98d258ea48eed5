//! Crawl coordinator - the review page loop
//!
//! One page at a time: fetch, classify, segment, accumulate, then decide
//! whether and where to continue. Pages are never fetched concurrently.

use crate::config::{Config, SiteConfig};
use crate::crawler::classifier::{classify, PageVerdict};
use crate::crawler::delay::DelayRange;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::pagination::Paginator;
use crate::crawler::progress::{ProgressSink, TracingProgress};
use crate::extract::{ReviewRecord, Segmenter};
use crate::state::{CrawlState, StopReason};
use crate::url::{is_review_url, page_param, parse_site_url, to_review_url, with_page};
use crate::{ConfigError, UrlError};
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Everything a finished crawl hands back
///
/// Records gathered before the stop are always kept, whatever the reason.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Records in page order
    pub records: Vec<ReviewRecord>,

    /// Why the crawl stopped
    pub stop_reason: StopReason,

    /// Review feed URL the crawl started from
    pub start_url: Url,

    /// Last URL the crawl fetched or tried to fetch
    pub last_url: Url,

    /// Page number of `last_url`
    pub last_page: u32,

    /// Pages fetched successfully
    pub pages_fetched: u32,

    /// Fetch error detail when `stop_reason` is `FetchError`
    pub error: Option<String>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Sequential review crawler over a [`PageFetcher`]
///
/// The crawler owns no browser or connection lifecycle; the fetcher it is
/// given must already be usable and is released by its owner.
pub struct ReviewCrawler<F: PageFetcher> {
    fetcher: F,
    site: SiteConfig,
    segmenter: Segmenter,
    paginator: Paginator,
    delay: DelayRange,
    progress: Box<dyn ProgressSink>,
    cancel: CancellationToken,
}

impl<F: PageFetcher> ReviewCrawler<F> {
    /// Creates a crawler from configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the extraction selectors do not parse.
    pub fn new(fetcher: F, config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            fetcher,
            site: config.site.clone(),
            segmenter: Segmenter::from_config(&config.extract)?,
            paginator: Paginator::new(config.crawler.pagination)
                .with_site_domain(config.site.domain.clone()),
            delay: DelayRange::from_config(&config.crawler),
            progress: Box::new(TracingProgress),
            cancel: CancellationToken::new(),
        })
    }

    /// Replaces the inter-page delay
    pub fn with_delay(mut self, delay: DelayRange) -> Self {
        self.delay = delay;
        self
    }

    /// Replaces the progress sink
    pub fn with_progress(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Box::new(sink);
        self
    }

    /// Replaces the segmenter
    pub fn with_segmenter(mut self, segmenter: Segmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Uses an externally owned cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that stops the crawl at the next page boundary
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Validates the start URL and turns it into the first review page URL
    ///
    /// 1. The URL must belong to the configured site
    /// 2. Product pages are rewritten into review feed URLs
    /// 3. A start page above 1 is written into the `page` parameter
    pub fn prepare_start_url(&self, start_url: &str, start_page: u32) -> Result<Url, UrlError> {
        let mut url = parse_site_url(start_url, &self.site.domain)?;

        if !is_review_url(&url) {
            url = to_review_url(&url, &self.site.marketplace)?;
            self.progress
                .report(&format!("Converting to review URL: {}", url));
        }

        if start_page > 1 {
            url = with_page(&url, start_page);
        }

        Ok(url)
    }

    /// Crawls the review feed starting at `start_url`
    ///
    /// `max_pages` counts pages from the first page crawled; `None` or
    /// `Some(0)` means no limit. With `start_page` at 1, a `page` parameter
    /// already present on `start_url` sets the first page number.
    ///
    /// # Stop Conditions
    ///
    /// Checked in this order on every page:
    /// 1. Cancellation (at the page boundary and during the pause)
    /// 2. Fetch failure → `FetchError`
    /// 3. Terminal page → `Blocked`, `NoReviewsOnProduct`, `PageNotFound`
    /// 4. No reviews on a page after the first → `EmptyPage`
    /// 5. Page limit → `MaxPagesReached`
    /// 6. No further page → `NoNextPage`
    ///
    /// # Errors
    ///
    /// Only URL validation fails the call; nothing is fetched in that case.
    pub async fn crawl(
        &self,
        start_url: &str,
        max_pages: Option<u32>,
        start_page: u32,
    ) -> Result<CrawlReport, UrlError> {
        let started_at = Utc::now();
        let start_page = start_page.max(1);
        let max_pages = max_pages.filter(|&max| max > 0);

        let url = match self.prepare_start_url(start_url, start_page) {
            Ok(url) => url,
            Err(e) => {
                self.progress.report(&format!("Error: {}", e));
                return Err(e);
            }
        };

        // A start URL copied from page N of the feed continues from N
        let first_page = if start_page > 1 {
            start_page
        } else {
            page_param(&url).filter(|&page| page > 0).unwrap_or(1)
        };

        tracing::info!(
            "Starting review crawl at {} (page {}, limit {:?})",
            url,
            first_page,
            max_pages
        );

        let mut state = CrawlState::new(url.clone(), first_page);
        let mut error = None;

        while !state.is_stopped() {
            if self.cancel.is_cancelled() {
                state.stop(StopReason::Cancelled);
                break;
            }

            self.progress
                .report(&format!("Scraping page {}...", state.current_page));

            let page = match self.fetcher.fetch(&state.current_url).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Fetch failed on page {}: {}", state.current_page, e);
                    error = Some(e.to_string());
                    state.stop(StopReason::FetchError);
                    break;
                }
            };
            state.pages_fetched += 1;

            if let PageVerdict::Terminal(reason) = classify(&page) {
                state.stop(reason);
                break;
            }

            self.process_page(&mut state, &page, max_pages);

            if !state.is_stopped() && !self.pause().await {
                state.stop(StopReason::Cancelled);
            }
        }

        let stop_reason = state.stop_reason.unwrap_or(StopReason::NoNextPage);
        if stop_reason.is_terminal_page() {
            tracing::warn!(
                "Page {} ended the crawl ({}): {}",
                state.current_page,
                stop_reason,
                state.current_url
            );
        }
        match &error {
            Some(detail) => self
                .progress
                .report(&format!("Stopped: {} ({})", stop_reason.describe(), detail)),
            None => self
                .progress
                .report(&format!("Stopped: {}", stop_reason.describe())),
        }

        tracing::info!(
            "Review crawl finished: {} reviews from {} pages, stop reason {}",
            state.accumulated.len(),
            state.pages_fetched,
            stop_reason
        );

        Ok(CrawlReport {
            records: state.accumulated,
            stop_reason,
            start_url: url,
            last_url: state.current_url,
            last_page: state.current_page,
            pages_fetched: state.pages_fetched,
            error,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Segments one classified page and decides whether to move on
    fn process_page(&self, state: &mut CrawlState, page: &str, max_pages: Option<u32>) {
        let records = self.segmenter.segment(page);
        let found = records.len();
        state.absorb(records);

        self.progress.report(&format!(
            "Found {} reviews on page {}. Total: {}",
            found,
            state.current_page,
            state.accumulated.len()
        ));

        if found == 0 && !state.is_first_page() {
            state.stop(StopReason::EmptyPage);
            return;
        }

        if let Some(max) = max_pages {
            if state.pages_visited() >= max {
                state.stop(StopReason::MaxPagesReached);
                return;
            }
        }

        if !self.paginator.has_next(page) {
            state.stop(StopReason::NoNextPage);
            return;
        }

        match self
            .paginator
            .next_url(&state.current_url, page, state.current_page)
        {
            Some(next) => {
                tracing::debug!("Next review page: {}", next);
                state.advance(next);
            }
            None => state.stop(StopReason::NoNextPage),
        }
    }

    /// Sleeps for a sampled delay; returns false if cancelled meanwhile
    async fn pause(&self) -> bool {
        if self.delay.is_zero() {
            return !self.cancel.is_cancelled();
        }

        let pause = self.delay.sample();
        tracing::debug!("Waiting {:?} before the next page", pause);

        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(pause) => true,
        }
    }
}
