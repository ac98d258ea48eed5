use serde::Deserialize;

/// Main configuration structure for Review-Ripple
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The review site being crawled
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Registrable domain every crawl URL must belong to
    pub domain: String,

    /// Value of the `marketplace` parameter on rewritten review URLs
    pub marketplace: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: "flipkart.com".to_string(),
            marketplace: "FLIPKART".to_string(),
        }
    }
}

/// How the crawler finds the next review page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// Follow next links and page counters in the markup, then fall back to
    /// incrementing `page`
    #[default]
    Html,

    /// Only increment `page`; ignore page content entirely
    Mechanical,
}

/// Crawl loop behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages to visit (unset = until the feed ends)
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,

    /// Page number to start from
    #[serde(rename = "start-page")]
    pub start_page: u32,

    /// Lower bound of the randomised pause between pages (milliseconds)
    #[serde(rename = "min-delay-ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the randomised pause between pages (milliseconds)
    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,

    /// Pagination strategy
    pub pagination: PaginationMode,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: None,
            start_page: 1,
            min_delay_ms: 2000,
            max_delay_ms: 4000,
            pagination: PaginationMode::Html,
        }
    }
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Fixed user agent; when unset one is picked from a rotation list
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout_secs: 10,
        }
    }
}

/// Review extraction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// CSS selector for one review container
    #[serde(rename = "review-selector")]
    pub review_selector: String,

    /// CSS selector for the broader containers used as a fallback
    #[serde(rename = "container-selector")]
    pub container_selector: String,

    /// Extra title labels appended to the built-in lexicon
    #[serde(rename = "extra-titles")]
    pub extra_titles: Vec<String>,

    /// Body length budget for fallback records (characters)
    #[serde(rename = "fallback-body-chars")]
    pub fallback_body_chars: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            review_selector: "div.EKFha-".to_string(),
            container_selector: "div.cPHDOP.col-12-12".to_string(),
            extra_titles: Vec::new(),
            fallback_body_chars: 200,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV export (default: `reviews_<pid>.csv`)
    #[serde(rename = "csv-path")]
    pub csv_path: Option<String>,

    /// Keep only certified-buyer reviews in the export
    #[serde(rename = "verified-only")]
    pub verified_only: bool,
}
