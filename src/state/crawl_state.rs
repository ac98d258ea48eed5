/// Transient state for one crawl invocation
use crate::extract::ReviewRecord;
use crate::state::StopReason;
use url::Url;

/// Mutable state carried from page to page during a crawl
///
/// Created with the caller's starting URL and page, mutated once per page
/// iteration, and consumed when a stop condition fires.
#[derive(Debug, Clone)]
pub struct CrawlState {
    /// URL of the page about to be (or just) fetched
    pub current_url: Url,

    /// Page number of `current_url`
    pub current_page: u32,

    /// Page the crawl started on
    pub start_page: u32,

    /// Records gathered so far, in page order
    pub accumulated: Vec<ReviewRecord>,

    /// Set exactly once, when the crawl stops
    pub stop_reason: Option<StopReason>,

    /// Number of pages fetched successfully
    pub pages_fetched: u32,
}

impl CrawlState {
    /// Creates the state for a crawl starting at `url`, page `start_page`
    pub fn new(url: Url, start_page: u32) -> Self {
        Self {
            current_url: url,
            current_page: start_page,
            start_page,
            accumulated: Vec::new(),
            stop_reason: None,
            pages_fetched: 0,
        }
    }

    /// Returns true while the crawl is on its starting page
    pub fn is_first_page(&self) -> bool {
        self.current_page == self.start_page
    }

    /// Number of pages visited including the current one
    pub fn pages_visited(&self) -> u32 {
        self.current_page - self.start_page + 1
    }

    /// Appends one page's records
    pub fn absorb(&mut self, records: Vec<ReviewRecord>) {
        self.accumulated.extend(records);
    }

    /// Moves to the next page
    pub fn advance(&mut self, next_url: Url) {
        self.current_page += 1;
        self.current_url = next_url;
    }

    /// Records the stop reason; the first one wins
    pub fn stop(&mut self, reason: StopReason) {
        if self.stop_reason.is_none() {
            self.stop_reason = Some(reason);
        }
    }

    /// Returns true once a stop reason has been recorded
    pub fn is_stopped(&self) -> bool {
        self.stop_reason.is_some()
    }
}
