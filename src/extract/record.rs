//! The structured review record produced by extraction

/// Placeholder for a rating or reviewer that could not be located
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for a review without a recognised title
pub const NO_TITLE: &str = "No Title";

/// Placeholder for the review date, which the feed never exposes
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// One extracted review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    /// Leading digit of the fragment, if it had one
    pub rating: Option<u8>,

    /// Sentiment label from the title lexicon
    pub title: Option<String>,

    /// Review text with rating, title and reviewer metadata removed
    pub body: String,

    /// Reviewer display name
    pub reviewer_name: Option<String>,

    /// True when the fragment carries a certified-buyer badge
    pub verified_purchase: bool,

    /// Always `None`; kept so exports keep a stable column set
    pub date: Option<String>,

    /// Always 0; kept so exports keep a stable column set
    pub helpful_votes: u32,
}

impl ReviewRecord {
    /// Creates a record with only a body; every other field is unknown
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            rating: None,
            title: None,
            body: body.into(),
            reviewer_name: None,
            verified_purchase: false,
            date: None,
            helpful_votes: 0,
        }
    }

    /// Rating as exported: the digit, or `Unknown`
    pub fn rating_label(&self) -> String {
        self.rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Title as exported: the label, or `No Title`
    pub fn title_label(&self) -> &str {
        self.title.as_deref().unwrap_or(NO_TITLE)
    }

    /// Reviewer as exported: the name, or `Unknown`
    pub fn reviewer_label(&self) -> &str {
        self.reviewer_name.as_deref().unwrap_or(UNKNOWN)
    }

    /// Date as exported: always `Unknown Date` today
    pub fn date_label(&self) -> &str {
        self.date.as_deref().unwrap_or(UNKNOWN_DATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_fall_back_to_sentinels() {
        let record = ReviewRecord::new("text");
        assert_eq!(record.rating_label(), "Unknown");
        assert_eq!(record.title_label(), "No Title");
        assert_eq!(record.reviewer_label(), "Unknown");
        assert_eq!(record.date_label(), "Unknown Date");
        assert_eq!(record.helpful_votes, 0);
    }

    #[test]
    fn test_labels_use_values() {
        let record = ReviewRecord {
            rating: Some(4),
            title: Some("Good".to_string()),
            reviewer_name: Some("Asha Rao".to_string()),
            ..ReviewRecord::new("text")
        };
        assert_eq!(record.rating_label(), "4");
        assert_eq!(record.title_label(), "Good");
        assert_eq!(record.reviewer_label(), "Asha Rao");
    }
}
