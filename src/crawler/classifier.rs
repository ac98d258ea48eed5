//! Terminal page detection
//!
//! Every fetched page is classified before any extraction is attempted. The
//! checks are plain substring matches in priority order: blocked pages first,
//! then products without reviews, then missing pages.

use crate::state::StopReason;

/// Markers of a bot-block page
const BLOCKED_MARKERS: &[&str] = &["Access Denied", "automated access"];

/// Marker of a product that has never been reviewed
const NO_REVIEWS_MARKERS: &[&str] = &["Be the first to Review this product"];

/// Markers of a missing page
const NOT_FOUND_MARKERS: &[&str] = &[
    "Page Not Found",
    "The page you are looking for does not exist",
];

/// Outcome of classifying a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageVerdict {
    /// The page may contain reviews
    Ok,

    /// Nothing more can be extracted; stop with this reason
    Terminal(StopReason),
}

impl PageVerdict {
    /// Returns the stop reason for terminal pages
    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            Self::Ok => None,
            Self::Terminal(reason) => Some(*reason),
        }
    }
}

/// Classifies a fetched page
///
/// # Examples
///
/// ```
/// use review_ripple::crawler::{classify, PageVerdict};
/// use review_ripple::StopReason;
///
/// assert_eq!(classify("<h1>Access Denied</h1>"), PageVerdict::Terminal(StopReason::Blocked));
/// assert_eq!(classify("<div>5Wonderful</div>"), PageVerdict::Ok);
/// ```
pub fn classify(page: &str) -> PageVerdict {
    let checks: [(&[&str], StopReason); 3] = [
        (BLOCKED_MARKERS, StopReason::Blocked),
        (NO_REVIEWS_MARKERS, StopReason::NoReviewsOnProduct),
        (NOT_FOUND_MARKERS, StopReason::PageNotFound),
    ];

    for (markers, reason) in checks {
        if markers.iter().any(|marker| page.contains(marker)) {
            return PageVerdict::Terminal(reason);
        }
    }

    PageVerdict::Ok
}
