//! Closed vocabulary of review titles
//!
//! The feed renders a short sentiment label right after the star digit with no
//! separator, so titles are recovered by prefix-matching a fixed lexicon.

/// Sentiment labels the review feed uses as titles
pub const DEFAULT_TITLES: &[&str] = &[
    "Wonderful",
    "Amazing",
    "Classy",
    "Perfect",
    "Fabulous",
    "Excellent",
    "Very Good",
    "Good",
    "Pretty good",
    "Mind-blowing",
    "Worth the money",
    "Terrific",
    "Just average",
    "Fair",
    "Not recommended",
];

/// An ordered title lexicon, longest entry first
///
/// Ordering by length means the first prefix hit is the longest one, so
/// "Very Good" wins over "Good" and "Pretty good" is never split.
#[derive(Debug, Clone)]
pub struct TitleLexicon {
    entries: Vec<String>,
}

impl TitleLexicon {
    /// Builds a lexicon from arbitrary labels; blanks and duplicates are dropped
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref().trim();
            if !label.is_empty() && !entries.iter().any(|e| e == label) {
                entries.push(label.to_string());
            }
        }
        // Stable sort keeps the declared order among equal lengths
        entries.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        Self { entries }
    }

    /// The built-in lexicon plus any extra labels
    pub fn with_extra(extra: &[String]) -> Self {
        Self::new(
            DEFAULT_TITLES
                .iter()
                .map(|s| s.to_string())
                .chain(extra.iter().cloned()),
        )
    }

    /// Returns the longest label that `text` starts with
    pub fn longest_prefix(&self, text: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| text.starts_with(entry.as_str()))
            .map(String::as_str)
    }

    /// Labels in match order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for TitleLexicon {
    fn default() -> Self {
        Self::with_extra(&[])
    }
}
