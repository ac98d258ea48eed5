/// Stop reason definitions for a finished crawl
///
/// Every crawl that gets past URL validation ends with exactly one of these.
use std::fmt;

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    // ===== Terminal Page Conditions =====
    /// The site served a bot-block page
    Blocked,

    /// The product has no reviews at all
    NoReviewsOnProduct,

    /// The review page does not exist
    PageNotFound,

    // ===== Natural Ends =====
    /// A page after the first yielded no review fragments
    EmptyPage,

    /// The caller's page limit was reached
    MaxPagesReached,

    /// Pagination found no further page
    NoNextPage,

    // ===== Interrupted =====
    /// The fetch collaborator reported an error
    FetchError,

    /// The caller cancelled the crawl
    Cancelled,
}

impl StopReason {
    /// Returns true for the conditions detected by page classification
    pub fn is_terminal_page(&self) -> bool {
        matches!(
            self,
            Self::Blocked | Self::NoReviewsOnProduct | Self::PageNotFound
        )
    }

    /// Returns true if the crawl ran out of pages on its own
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::EmptyPage | Self::MaxPagesReached | Self::NoNextPage)
    }

    /// Returns true if the crawl was cut short before the feed ended
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::FetchError | Self::Cancelled)
    }

    /// Short machine-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::NoReviewsOnProduct => "no_reviews_on_product",
            Self::PageNotFound => "page_not_found",
            Self::EmptyPage => "empty_page",
            Self::MaxPagesReached => "max_pages_reached",
            Self::NoNextPage => "no_next_page",
            Self::FetchError => "fetch_error",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable status line for progress output
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Blocked => "Access denied. The site is blocking automated access.",
            Self::NoReviewsOnProduct => "No reviews found for this product.",
            Self::PageNotFound => {
                "Page not found. The URL may be invalid or the product might not exist."
            }
            Self::EmptyPage => "No reviews found on this page. Possibly reached the end.",
            Self::MaxPagesReached => "Reached maximum number of pages.",
            Self::NoNextPage => "Reached the last page of reviews.",
            Self::FetchError => "Error accessing review page.",
            Self::Cancelled => "Crawl cancelled.",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
