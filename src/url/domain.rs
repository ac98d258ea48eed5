use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use review_ripple::url::extract_domain;
///
/// let url = Url::parse("https://WWW.Flipkart.com/reviews").unwrap();
/// assert_eq!(extract_domain(&url), Some("www.flipkart.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if `host` is the site domain itself or one of its subdomains
///
/// `www.flipkart.com` and `dl.flipkart.com` both belong to `flipkart.com`;
/// `notflipkart.com` does not.
pub fn belongs_to_site(host: &str, site_domain: &str) -> bool {
    let host = host.to_lowercase();
    let site = site_domain.to_lowercase();
    host == site || host.ends_with(&format!(".{}", site))
}

/// Parses a user-supplied URL and checks that it points at the target site
///
/// Only `http` and `https` are accepted. Anything else, or a host outside
/// `site_domain`, is a validation failure.
pub fn parse_site_url(url_str: &str, site_domain: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    match extract_domain(&url) {
        Some(host) if belongs_to_site(&host, site_domain) => Ok(url),
        _ => Err(UrlError::NotTargetSite {
            url: url.to_string(),
            domain: site_domain.to_string(),
        }),
    }
}
