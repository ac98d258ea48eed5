//! The review site's URL grammar
//!
//! Product pages look like `/{slug}/p/{itm…}?pid=…&lid=…`; review feeds look
//! like `/{slug}/product-reviews/{itm…}?pid=…&lid=…&marketplace=…&page=N`.

use crate::{UrlError, UrlResult};
use url::Url;

/// Path segment marking a review feed
const REVIEWS_SEGMENT: &str = "product-reviews";

/// Path segment marking a product page
const PRODUCT_SEGMENT: &str = "p";

/// Prefix of item id path segments
const ITEM_PREFIX: &str = "itm";

/// Identifiers recoverable from a product or review URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductInfo {
    /// Product id (`pid` query parameter)
    pub pid: Option<String>,

    /// Listing id (`lid` query parameter)
    pub lid: Option<String>,

    /// Human-readable product name from the slug before `product-reviews`
    pub name: Option<String>,

    /// Item id path segment (`itm…`)
    pub item_id: Option<String>,
}

/// Extracts product identifiers from a product or review URL
pub fn extract_product_info(url: &Url) -> ProductInfo {
    let segments: Vec<&str> = path_segments(url);

    let name = segments
        .iter()
        .position(|s| *s == REVIEWS_SEGMENT)
        .filter(|&idx| idx > 0)
        .map(|idx| segments[idx - 1].replace('-', " "));

    ProductInfo {
        pid: id_param(url, "pid"),
        lid: id_param(url, "lid"),
        name,
        item_id: item_id(&segments),
    }
}

/// Returns true if the URL already points at a review feed
pub fn is_review_url(url: &Url) -> bool {
    path_segments(url).contains(&REVIEWS_SEGMENT)
}

/// Rewrites a product page URL into its review feed URL
///
/// Review URLs are returned unchanged. A product URL must have the shape
/// `/{slug}/p/…` and carry a `pid`; `lid` and the item id are optional, but
/// both are needed for the fully-qualified review path.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use review_ripple::url::to_review_url;
///
/// let product = Url::parse(
///     "https://www.flipkart.com/acme-phone/p/itm0a1b2c?pid=MOBABC123&lid=LSTMOBABC",
/// ).unwrap();
/// let reviews = to_review_url(&product, "FLIPKART").unwrap();
/// assert_eq!(
///     reviews.as_str(),
///     "https://www.flipkart.com/acme-phone/product-reviews/itm0a1b2c?pid=MOBABC123&lid=LSTMOBABC&marketplace=FLIPKART",
/// );
/// ```
pub fn to_review_url(url: &Url, marketplace: &str) -> UrlResult<Url> {
    if is_review_url(url) {
        return Ok(url.clone());
    }

    let segments = path_segments(url);
    let slug = match segments.as_slice() {
        [slug, PRODUCT_SEGMENT, ..] if !slug.is_empty() => *slug,
        _ => return Err(UrlError::UnrecognizedProductPath(url.to_string())),
    };

    let pid = id_param(url, "pid").ok_or_else(|| UrlError::MissingProductId(url.to_string()))?;
    let lid = id_param(url, "lid");
    let item = item_id(&segments);

    let origin = url.origin().ascii_serialization();
    let (item_segment, lid) = match (item, lid) {
        (Some(item), Some(lid)) => (item, Some(lid)),
        _ => (ITEM_PREFIX.to_string(), None),
    };

    let mut review_url = Url::parse(&format!(
        "{}/{}/{}/{}",
        origin, slug, REVIEWS_SEGMENT, item_segment
    ))
    .map_err(|e| UrlError::Parse(e.to_string()))?;

    {
        let mut query = review_url.query_pairs_mut();
        query.append_pair("pid", &pid);
        if let Some(lid) = &lid {
            query.append_pair("lid", lid);
        }
        query.append_pair("marketplace", marketplace);
    }

    Ok(review_url)
}

fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

/// Reads an id-shaped query parameter (uppercase letters and digits)
fn id_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| {
            v.chars()
                .take_while(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
                .collect::<String>()
        })
        .filter(|id| !id.is_empty())
}

fn item_id(segments: &[&str]) -> Option<String> {
    segments.iter().find_map(|segment| {
        let rest = segment.strip_prefix(ITEM_PREFIX)?;
        let suffix: String = rest
            .chars()
            .take_while(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            .collect();
        if suffix.is_empty() {
            None
        } else {
            Some(format!("{}{}", ITEM_PREFIX, suffix))
        }
    })
}
