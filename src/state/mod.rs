//! State management for crawl progress
//!
//! This module contains the per-invocation crawl state and the reasons a crawl
//! can stop.

mod crawl_state;
mod stop_reason;

pub use crawl_state::CrawlState;
pub use stop_reason::StopReason;
