//! Extraction strategies, tried in order until one has an opinion

use crate::extract::fragment::{parse_fragment, parse_loose, CERTIFIED_BUYER};
use crate::extract::lexicon::TitleLexicon;
use crate::extract::record::ReviewRecord;
use scraper::{ElementRef, Html, Selector};

/// One way of pulling review records out of a page
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Extracts records from the document
    ///
    /// Returns `None` when the strategy has no opinion about this page, which
    /// lets the next strategy in the chain try. `Some` with an empty vector
    /// means the page was recognised but held nothing usable.
    fn extract(&self, document: &Html) -> Option<Vec<ReviewRecord>>;
}

/// High-precision strategy: one container per review
pub struct MarkedFragments {
    selector: Selector,
    lexicon: TitleLexicon,
}

impl MarkedFragments {
    pub fn new(selector: Selector, lexicon: TitleLexicon) -> Self {
        Self { selector, lexicon }
    }
}

impl ExtractionStrategy for MarkedFragments {
    fn name(&self) -> &'static str {
        "marked-fragments"
    }

    fn extract(&self, document: &Html) -> Option<Vec<ReviewRecord>> {
        let mut fragments = 0usize;
        let mut records = Vec::new();

        for element in document.select(&self.selector) {
            fragments += 1;
            let text = flatten(element);
            match parse_fragment(&text, &self.lexicon) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("Skipping review fragment {}: {}", fragments, e);
                }
            }
        }

        tracing::debug!(
            "{}: {} fragments, {} parsed",
            self.name(),
            fragments,
            records.len()
        );

        // Any matched container claims the page, even if none of them parsed
        if fragments == 0 {
            None
        } else {
            Some(records)
        }
    }
}

/// Low-precision fallback: broad containers that mention a certified buyer
pub struct LooseContainers {
    selector: Selector,
    body_chars: usize,
}

impl LooseContainers {
    pub fn new(selector: Selector, body_chars: usize) -> Self {
        Self {
            selector,
            body_chars,
        }
    }
}

impl ExtractionStrategy for LooseContainers {
    fn name(&self) -> &'static str {
        "loose-containers"
    }

    fn extract(&self, document: &Html) -> Option<Vec<ReviewRecord>> {
        let records: Vec<ReviewRecord> = document
            .select(&self.selector)
            .map(flatten)
            .filter(|text| text.contains(CERTIFIED_BUYER))
            .map(|text| parse_loose(&text, self.body_chars))
            .collect();

        tracing::debug!("{}: {} candidate reviews", self.name(), records.len());

        if records.is_empty() {
            None
        } else {
            Some(records)
        }
    }
}

/// Concatenates every text node under an element, without separators
fn flatten(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}
