//! Configuration module for Review-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use review_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("reviews.toml")).unwrap();
//! println!("Crawling reviews on: {}", config.site.domain);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, ExtractConfig, FetchConfig, OutputConfig, PaginationMode, SiteConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
