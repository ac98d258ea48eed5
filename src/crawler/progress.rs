//! Human-readable progress reporting
//!
//! Progress messages are purely observational; nothing a sink does can change
//! how the crawl proceeds.

/// Receives status lines while a crawl runs
pub trait ProgressSink: Send + Sync {
    fn report(&self, message: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Forwards progress lines to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&self, message: &str) {
        tracing::info!("{}", message);
    }
}
