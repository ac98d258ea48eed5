//! Pagination: deciding whether another review page exists and where it is
//!
//! # Policy
//!
//! An explicit "Page X of Y" counter is authoritative whenever it is present:
//! it decides `has_next` outright and caps every computed next URL. Without a
//! counter, markup signals (next links, pagination bars) are consulted, and the
//! URL falls back to incrementing the `page` query parameter.
//!
//! In [`PaginationMode::Mechanical`] page content is ignored entirely and the
//! crawl relies on the page limit or an empty page to stop.

use crate::config::PaginationMode;
use crate::url::{belongs_to_site, extract_domain, with_page};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

static PAGE_COUNTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Page\s+([\d,]+)\s+of\s+([\d,]+)").expect("valid regex"));

/// Dedicated next-page button
static NEXT_BUTTON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a._1LKTO3").expect("valid selector"));

static LINKS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid selector"));

static LABELS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a, span").expect("valid selector"));

/// Page-number bar and its highlighted current page
static PAGE_BAR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div._2MImiq").expect("valid selector"));
static PAGE_BAR_ITEMS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("valid selector"));
const CURRENT_PAGE_CLASS: &str = "_2Kfbh8";

static NAV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("nav").expect("valid selector"));

/// Decides whether and where the crawl continues
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    mode: PaginationMode,
    site_domain: Option<String>,
}

impl Paginator {
    pub fn new(mode: PaginationMode) -> Self {
        Self {
            mode,
            site_domain: None,
        }
    }

    /// Restricts followed links to `domain` and its subdomains
    ///
    /// Without a site domain, links must stay on the current page's host.
    pub fn with_site_domain(mut self, domain: impl Into<String>) -> Self {
        self.site_domain = Some(domain.into());
        self
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// Returns true if another review page should exist
    ///
    /// # Check Order
    ///
    /// 1. "Page X of Y" counter: X < Y decides
    /// 2. A next control (dedicated button or a link/label reading "Next")
    /// 3. A page-number bar whose current page is not the last entry, or a
    ///    `<nav>` holding several links
    ///
    /// Inconclusive pages answer false so an ambiguous page ends the crawl
    /// instead of looping.
    pub fn has_next(&self, page: &str) -> bool {
        if self.mode == PaginationMode::Mechanical {
            return true;
        }

        let document = Html::parse_document(page);

        if let Some((current, total)) = page_counter(&document) {
            tracing::debug!("Page counter: {} of {}", current, total);
            return current < total;
        }

        if has_next_control(&document) {
            return true;
        }

        has_page_bar_ahead(&document) || has_multi_link_nav(&document)
    }

    /// Computes the URL of the page after `current_page`
    ///
    /// Returns `None` when a page counter shows `current_page` is the last
    /// page. Otherwise an explicit next link wins, then a link labelled
    /// "Next", then the mechanical `page` increment.
    pub fn next_url(&self, current_url: &Url, page: &str, current_page: u32) -> Option<Url> {
        let next_page = current_page.checked_add(1)?;

        if self.mode == PaginationMode::Mechanical {
            return Some(with_page(current_url, next_page));
        }

        let document = Html::parse_document(page);

        if let Some((_, total)) = page_counter(&document) {
            if next_page > total {
                tracing::debug!("Page {} would exceed total of {}", next_page, total);
                return None;
            }
        }

        let button_href = document
            .select(&NEXT_BUTTON)
            .find_map(|a| a.value().attr("href"))
            .and_then(|href| self.resolve_link(href, current_url));
        if let Some(url) = button_href {
            return Some(url);
        }

        let labelled_href = document
            .select(&LINKS)
            .filter(|a| is_next_label(&element_text(*a)))
            .find_map(|a| a.value().attr("href"))
            .and_then(|href| self.resolve_link(href, current_url));
        if let Some(url) = labelled_href {
            return Some(url);
        }

        Some(with_page(current_url, next_page))
    }

    /// Resolves a link href against the current page URL
    ///
    /// Returns None for script, mail, phone and data links, bare fragments,
    /// anything that does not resolve to HTTP(S), and links off the site.
    fn resolve_link(&self, href: &str, base_url: &Url) -> Option<Url> {
        let href = href.trim();

        if href.is_empty() || href.starts_with('#') {
            return None;
        }

        if href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
            || href.starts_with("data:")
        {
            return None;
        }

        let site = match &self.site_domain {
            Some(domain) => domain.clone(),
            None => extract_domain(base_url)?,
        };

        let resolved = base_url
            .join(href)
            .ok()
            .filter(|url| url.scheme() == "http" || url.scheme() == "https")?;

        match extract_domain(&resolved) {
            Some(host) if belongs_to_site(&host, &site) => Some(resolved),
            _ => {
                tracing::debug!("Ignoring off-site next link: {}", resolved);
                None
            }
        }
    }
}

/// Finds the first "Page X of Y" counter in any single text node
fn page_counter(document: &Html) -> Option<(u32, u32)> {
    document.root_element().text().find_map(|text| {
        let caps = PAGE_COUNTER.captures(text)?;
        let current = parse_count(caps.get(1)?.as_str())?;
        let total = parse_count(caps.get(2)?.as_str())?;
        Some((current, total))
    })
}

fn parse_count(digits: &str) -> Option<u32> {
    digits.replace(',', "").parse().ok()
}

fn has_next_control(document: &Html) -> bool {
    document.select(&NEXT_BUTTON).next().is_some()
        || document
            .select(&LABELS)
            .any(|el| is_next_label(&element_text(el)))
}

fn has_page_bar_ahead(document: &Html) -> bool {
    document.select(&PAGE_BAR).any(|bar| {
        let items: Vec<ElementRef<'_>> = bar.select(&PAGE_BAR_ITEMS).collect();
        items
            .iter()
            .position(|item| item.value().classes().any(|c| c == CURRENT_PAGE_CLASS))
            .map(|idx| idx + 1 < items.len())
            .unwrap_or(false)
    })
}

fn has_multi_link_nav(document: &Html) -> bool {
    document
        .select(&NAV)
        .next()
        .map(|nav| nav.select(&LINKS).count() > 1)
        .unwrap_or(false)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Matches "Next", "NEXT", "Next ›" and similar labels, but not "Next day delivery"
fn is_next_label(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    match text.strip_prefix("next") {
        Some(rest) => !rest.chars().any(char::is_alphanumeric),
        None => false,
    }
}
