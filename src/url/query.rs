use url::Url;

/// Query parameter carrying the 1-based review page number
pub const PAGE_PARAM: &str = "page";

/// Reads the `page` query parameter, if present and numeric
pub fn page_param(url: &Url) -> Option<u32> {
    url.query_pairs()
        .find(|(k, _)| k == PAGE_PARAM)
        .and_then(|(_, v)| v.trim().parse().ok())
}

/// Returns a copy of `url` with the `page` parameter set to `page`
///
/// An existing `page` parameter is replaced where it stands, so the order of
/// the other parameters is preserved. Otherwise `page` is appended.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use review_ripple::url::with_page;
///
/// let url = Url::parse("https://www.flipkart.com/reviews?page=2&x=1").unwrap();
/// assert_eq!(with_page(&url, 3).as_str(), "https://www.flipkart.com/reviews?page=3&x=1");
/// ```
pub fn with_page(url: &Url, page: u32) -> Url {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;

    for (key, value) in url.query_pairs() {
        if key == PAGE_PARAM {
            // Collapse duplicates into the first occurrence
            if !replaced {
                pairs.push((key.into_owned(), page.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((key.into_owned(), value.into_owned()));
        }
    }

    if !replaced {
        pairs.push((PAGE_PARAM.to_string(), page.to_string()));
    }

    let mut next = url.clone();
    next.query_pairs_mut().clear().extend_pairs(pairs);
    next
}
