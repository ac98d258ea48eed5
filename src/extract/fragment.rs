//! Parsing of a single review fragment's flattened text
//!
//! A fragment is the concatenated text of one review container, e.g.
//! `5Wonderful Great battery life READ MOREAsha RaoCertified Buyer, Pune`.
//! There are no field separators, so every field is recovered by position and
//! by known markers.

use crate::extract::lexicon::TitleLexicon;
use crate::extract::record::ReviewRecord;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Marker separating the review lead-in from reviewer metadata
pub const READ_MORE: &str = "READ MORE";

/// Badge text shown next to verified reviewers
pub const CERTIFIED_BUYER: &str = "Certified Buyer";

/// Appended to bodies cut down by the loose-container path
pub const ELLIPSIS: &str = "...";

static NAME_AFTER_READ_MORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"READ MORE([A-Za-z ]+)Certified").expect("valid regex"));

static NAME_NEAR_CERTIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+ +[A-Z][a-z]+)(?:Certified|\s*$)").expect("valid regex")
});

/// Reasons a fragment is skipped
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FragmentError {
    #[error("fragment is empty")]
    Empty,

    #[error("fragment has no title or body after the rating")]
    NoContent,
}

/// Parses one marked fragment into a review record
///
/// # Field Recovery
///
/// 1. Rating: the first character, if it is a decimal digit
/// 2. Boundary: the first `READ MORE`; text before it is title plus body
/// 3. Title: the longest lexicon label directly after the rating digit
/// 4. Without a boundary, the first line carries rating and title and the
///    remaining lines continue the body
/// 5. Reviewer: the name between `READ MORE` and `Certified`, else a
///    two-word capitalised name before `Certified` or at the end
/// 6. Verified: `certified buyer` appears anywhere, in any case
///
/// # Errors
///
/// Returns a [`FragmentError`] for fragments with no usable text. Callers skip
/// those and carry on with the rest of the page.
pub fn parse_fragment(raw: &str, lexicon: &TitleLexicon) -> Result<ReviewRecord, FragmentError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(FragmentError::Empty);
    }

    let rating = leading_rating(text);

    let (title, body) = match text.find(READ_MORE) {
        Some(boundary) => split_at_boundary(text, rating.is_some(), boundary, lexicon),
        None => split_by_lines(text, rating.is_some(), lexicon),
    };

    if title.is_none() && body.is_empty() {
        return Err(FragmentError::NoContent);
    }

    Ok(ReviewRecord {
        rating,
        title,
        body,
        reviewer_name: reviewer_name(text),
        verified_purchase: is_verified(text),
        date: None,
        helpful_votes: 0,
    })
}

/// Builds a low-confidence record from a loose container's text
///
/// The whole text becomes the body, cut to `body_chars` characters with an
/// ellipsis when longer. Title and reviewer stay unknown.
pub fn parse_loose(raw: &str, body_chars: usize) -> ReviewRecord {
    let text = raw.trim();
    ReviewRecord {
        rating: leading_rating(text),
        verified_purchase: true,
        ..ReviewRecord::new(truncate_body(text, body_chars))
    }
}

/// Returns the leading digit of `text` as a rating
pub fn leading_rating(text: &str) -> Option<u8> {
    text.chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .map(|d| d as u8)
}

/// Case-insensitive search for the certified-buyer badge
pub fn is_verified(text: &str) -> bool {
    text.to_lowercase()
        .contains(&CERTIFIED_BUYER.to_lowercase())
}

/// Extracts the reviewer name, if one can be located
pub fn reviewer_name(text: &str) -> Option<String> {
    let captured = NAME_AFTER_READ_MORE
        .captures(text)
        .or_else(|| NAME_NEAR_CERTIFIED.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())?;

    let name = captured.replace(CERTIFIED_BUYER, "");
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Cuts `text` to `max_chars` characters, appending an ellipsis if cut
pub fn truncate_body(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Splits the lead-in before `READ MORE` into title and body
fn split_at_boundary(
    text: &str,
    has_rating: bool,
    boundary: usize,
    lexicon: &TitleLexicon,
) -> (Option<String>, String) {
    // The rating is an ASCII digit, so skipping it is one byte
    let start = if has_rating { 1 } else { 0 };
    let lead = &text[start.min(boundary)..boundary];

    match lexicon.longest_prefix(lead) {
        Some(title) => (
            Some(title.to_string()),
            lead[title.len()..].trim().to_string(),
        ),
        None => (None, lead.trim().to_string()),
    }
}

/// Splits a fragment without `READ MORE` using its line structure
fn split_by_lines(text: &str, has_rating: bool, lexicon: &TitleLexicon) -> (Option<String>, String) {
    let after_rating = if has_rating { &text[1..] } else { text };

    let mut lines = text.lines();
    let first_line = lines.next().unwrap_or_default();
    let rest: Vec<&str> = lines.map(str::trim).filter(|l| !l.is_empty()).collect();

    if rest.is_empty() || !has_rating {
        return (None, after_rating.trim().to_string());
    }

    let head = first_line[1..].trim();
    let (title, head) = match lexicon.longest_prefix(head) {
        Some(title) => (Some(title.to_string()), head[title.len()..].trim()),
        None => (None, head),
    };

    let body = std::iter::once(head)
        .chain(rest)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (title, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ReviewRecord {
        parse_fragment(text, &TitleLexicon::default()).unwrap()
    }

    #[test]
    fn test_full_marked_fragment() {
        let record =
            parse("5Wonderful Great battery life, fast delivery.READ MOREAsha RaoCertified Buyer, Pune3 months ago");
        assert_eq!(record.rating, Some(5));
        assert_eq!(record.title.as_deref(), Some("Wonderful"));
        assert_eq!(record.body, "Great battery life, fast delivery.");
        assert_eq!(record.reviewer_name.as_deref(), Some("Asha Rao"));
        assert!(record.verified_purchase);
        assert_eq!(record.date, None);
        assert_eq!(record.helpful_votes, 0);
    }

    #[test]
    fn test_longest_title_wins() {
        let record = parse("4Very Good screen is bright READ MORE");
        assert_eq!(record.title.as_deref(), Some("Very Good"));
        assert_eq!(record.body, "screen is bright");

        let record = parse("3Pretty goodOkay for the price READ MORE");
        assert_eq!(record.title.as_deref(), Some("Pretty good"));
        assert_eq!(record.body, "Okay for the price");
    }

    #[test]
    fn test_no_title_keeps_whole_lead_as_body() {
        let record = parse("2Battery drains overnight READ MORE");
        assert_eq!(record.rating, Some(2));
        assert_eq!(record.title, None);
        assert_eq!(record.body, "Battery drains overnight");
    }

    #[test]
    fn test_non_digit_start_has_unknown_rating() {
        let record = parse("Good but heavy READ MORE");
        assert_eq!(record.rating, None);
        assert_eq!(record.title.as_deref(), Some("Good"));
        assert_eq!(record.body, "but heavy");
    }

    #[test]
    fn test_leading_whitespace_is_ignored() {
        let record = parse("   1Not recommended Broke in a week READ MORE");
        assert_eq!(record.rating, Some(1));
        assert_eq!(record.title.as_deref(), Some("Not recommended"));
    }

    #[test]
    fn test_multiline_without_boundary() {
        let record = parse("5Fabulous\nCamera is superb.\nBattery is fine.");
        assert_eq!(record.rating, Some(5));
        assert_eq!(record.title.as_deref(), Some("Fabulous"));
        assert_eq!(record.body, "Camera is superb. Battery is fine.");
    }

    #[test]
    fn test_multiline_title_then_text_on_first_line() {
        let record = parse("4Good value for money\nwould buy again");
        assert_eq!(record.title.as_deref(), Some("Good"));
        assert_eq!(record.body, "value for money would buy again");
    }

    #[test]
    fn test_multiline_without_rating_is_all_body() {
        let record = parse("Decent phone\nNothing special");
        assert_eq!(record.rating, None);
        assert_eq!(record.title, None);
        assert_eq!(record.body, "Decent phone\nNothing special");
    }

    #[test]
    fn test_single_line_without_boundary_drops_rating() {
        let record = parse("3Average speaker, loud enough");
        assert_eq!(record.rating, Some(3));
        assert_eq!(record.title, None);
        assert_eq!(record.body, "Average speaker, loud enough");
    }

    #[test]
    fn test_verified_is_case_insensitive() {
        assert!(parse("5Nice READ MORE x CERTIFIED BUYER").verified_purchase);
        assert!(parse("5Nice READ MORE x certified buyer").verified_purchase);
        assert!(!parse("5Nice READ MORE x Certified").verified_purchase);
    }

    #[test]
    fn test_reviewer_fallback_at_end_of_fragment() {
        let record = parse("5Wonderful\nLoved it\nRahul Mehta");
        assert_eq!(record.reviewer_name.as_deref(), Some("Rahul Mehta"));
    }

    #[test]
    fn test_reviewer_unknown_when_absent() {
        let record = parse("5wonderful stuff READ MORE 42");
        assert_eq!(record.reviewer_name, None);
    }

    #[test]
    fn test_reviewer_strips_badge_text() {
        assert_eq!(
            reviewer_name("READ MORE Neha Certified Buyer Certified"),
            Some("Neha".to_string())
        );
    }

    #[test]
    fn test_empty_fragment_is_an_error() {
        let lexicon = TitleLexicon::default();
        assert_eq!(parse_fragment("   ", &lexicon), Err(FragmentError::Empty));
        assert_eq!(parse_fragment("5", &lexicon), Err(FragmentError::NoContent));
    }

    #[test]
    fn test_loose_truncates_long_text() {
        let text = format!("4{}Certified Buyer", "x".repeat(484));
        assert_eq!(text.chars().count(), 500);

        let record = parse_loose(&text, 200);
        assert_eq!(record.body.chars().count(), 200 + ELLIPSIS.len());
        assert!(record.body.ends_with(ELLIPSIS));
        assert!(record.verified_purchase);
        assert_eq!(record.rating, Some(4));
        assert_eq!(record.title, None);
        assert_eq!(record.reviewer_name, None);
    }

    #[test]
    fn test_loose_keeps_short_text() {
        let record = parse_loose("Nice one Certified Buyer", 200);
        assert_eq!(record.body, "Nice one Certified Buyer");
        assert_eq!(record.rating, None);
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate_body("ééééé", 3), "ééé...");
        assert_eq!(truncate_body("abc", 3), "abc");
    }
}
