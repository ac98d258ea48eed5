//! Review extraction from rendered review pages
//!
//! This module turns a page of markup into review records:
//! - Locating review containers with CSS selectors
//! - Recovering rating, title, body and reviewer from flattened text
//! - Falling back to looser containers when the precise ones are absent

mod fragment;
mod lexicon;
mod record;
mod strategy;

pub use fragment::{
    is_verified, leading_rating, parse_fragment, parse_loose, reviewer_name, truncate_body,
    FragmentError, CERTIFIED_BUYER, ELLIPSIS, READ_MORE,
};
pub use lexicon::{TitleLexicon, DEFAULT_TITLES};
pub use record::{ReviewRecord, NO_TITLE, UNKNOWN, UNKNOWN_DATE};
pub use strategy::{ExtractionStrategy, LooseContainers, MarkedFragments};

use crate::config::ExtractConfig;
use crate::ConfigError;
use scraper::{Html, Selector};

/// Splits a page into review records using an ordered strategy chain
///
/// The first strategy that recognises the page wins, even if it yields no
/// records; later strategies only run when every earlier one had no opinion. Segmentation never fails: a page
/// nobody recognises yields an empty vector.
pub struct Segmenter {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Segmenter {
    /// Creates a segmenter from an explicit strategy chain
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Builds the standard two-tier chain from configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSelector`] if either selector does not parse.
    pub fn from_config(config: &ExtractConfig) -> Result<Self, ConfigError> {
        let marked = parse_selector(&config.review_selector)?;
        let loose = parse_selector(&config.container_selector)?;
        let lexicon = TitleLexicon::with_extra(&config.extra_titles);

        Ok(Self::new(vec![
            Box::new(MarkedFragments::new(marked, lexicon)),
            Box::new(LooseContainers::new(loose, config.fallback_body_chars)),
        ]))
    }

    /// Extracts review records from one page of markup
    pub fn segment(&self, page_html: &str) -> Vec<ReviewRecord> {
        let document = Html::parse_document(page_html);

        for strategy in &self.strategies {
            if let Some(records) = strategy.extract(&document) {
                tracing::debug!(
                    "Strategy {} extracted {} reviews",
                    strategy.name(),
                    records.len()
                );
                return records;
            }
        }

        tracing::debug!("No extraction strategy recognised the page");
        Vec::new()
    }
}

/// Parses a CSS selector, mapping failures to a configuration error
pub fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
