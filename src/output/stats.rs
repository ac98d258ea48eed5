//! Review statistics for a finished crawl
//!
//! This module summarises extracted reviews: how ratings are distributed,
//! the average over numeric ratings, and how many reviewers are verified.

use crate::extract::ReviewRecord;
use std::collections::BTreeMap;

/// Summary of a set of review records
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewStatistics {
    /// Number of records summarised
    pub total_reviews: usize,

    /// Records carrying a certified-buyer badge
    pub verified_reviews: usize,

    /// Count of records per numeric rating
    pub rating_distribution: BTreeMap<u8, usize>,

    /// Records whose rating could not be read
    pub unknown_ratings: usize,

    /// Mean over numeric ratings only; `None` when there are none
    pub average_rating: Option<f64>,
}

/// Computes statistics over `records`
pub fn compute_statistics(records: &[ReviewRecord]) -> ReviewStatistics {
    let mut rating_distribution = BTreeMap::new();
    let mut unknown_ratings = 0;
    let mut rating_sum = 0u64;

    for record in records {
        match record.rating {
            Some(rating) => {
                *rating_distribution.entry(rating).or_insert(0) += 1;
                rating_sum += u64::from(rating);
            }
            None => unknown_ratings += 1,
        }
    }

    let rated = records.len() - unknown_ratings;
    let average_rating = if rated > 0 {
        Some(rating_sum as f64 / rated as f64)
    } else {
        None
    };

    ReviewStatistics {
        total_reviews: records.len(),
        verified_reviews: records.iter().filter(|r| r.verified_purchase).count(),
        rating_distribution,
        unknown_ratings,
        average_rating,
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &ReviewStatistics) {
    println!("=== Review Statistics ===\n");

    println!("Overview:");
    println!("  Total reviews: {}", stats.total_reviews);
    println!("  Verified purchases: {}", stats.verified_reviews);
    match stats.average_rating {
        Some(avg) => println!("  Average rating: {:.1} / 5", avg),
        None => println!("  Average rating: n/a"),
    }
    println!();

    if stats.total_reviews == 0 {
        return;
    }

    println!("Rating Distribution:");
    // Highest rating first
    for (rating, count) in stats.rating_distribution.iter().rev() {
        let percentage = (*count as f64 / stats.total_reviews as f64) * 100.0;
        println!("  {} stars: {} ({:.1}%)", rating, count, percentage);
    }
    if stats.unknown_ratings > 0 {
        println!("  Unknown: {}", stats.unknown_ratings);
    }
    println!();
}
