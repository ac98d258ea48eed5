//! URL handling module for Review-Ripple
//!
//! This module validates that a URL belongs to the target site, rewrites
//! product URLs into review feed URLs, and manipulates the `page` parameter.

mod domain;
mod grammar;
mod query;

pub use domain::{belongs_to_site, extract_domain, parse_site_url};
pub use grammar::{extract_product_info, is_review_url, to_review_url, ProductInfo};
pub use query::{page_param, with_page, PAGE_PARAM};
