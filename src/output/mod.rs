//! Output module for exporting crawled reviews
//!
//! This module handles:
//! - Exporting review records as CSV
//! - Narrowing exports to certified-buyer reviews
//! - Summarising ratings for the terminal

mod csv_export;
pub mod stats;

pub use csv_export::{to_csv_string, write_csv, write_records, CSV_HEADER};
pub use stats::{compute_statistics, print_statistics, ReviewStatistics};

use crate::extract::ReviewRecord;
use crate::url::ProductInfo;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Keeps only certified-buyer reviews
///
/// If none of the records are verified the full set is returned instead, so an
/// export is never emptied by the filter alone. The second value tells the
/// caller whether the filter actually applied.
pub fn filter_verified(records: &[ReviewRecord]) -> (Vec<ReviewRecord>, bool) {
    let verified: Vec<ReviewRecord> = records
        .iter()
        .filter(|r| r.verified_purchase)
        .cloned()
        .collect();

    if verified.is_empty() {
        tracing::warn!("No verified reviews found, keeping all {}", records.len());
        (records.to_vec(), false)
    } else {
        (verified, true)
    }
}

/// Default export file name for a product: `reviews_<pid>.csv`
pub fn default_csv_path(product: &ProductInfo) -> String {
    match &product.pid {
        Some(pid) => format!("reviews_{}.csv", pid),
        None => "reviews.csv".to_string(),
    }
}
