//! Client metrics collection.
//!
//! Emitted series:
//! - `notify_api_request_duration_seconds{operation,outcome}` histogram
//! - `notify_poll_ticks_total{outcome}` counter
//! - `notify_feed_unread` gauge

use metrics::{counter, gauge, histogram};
use std::time::Instant;

/// Record the outcome of one poll tick.
pub fn record_poll_outcome(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("notify_poll_ticks_total", "outcome" => outcome).increment(1);
}

/// Record the current unread count.
pub fn record_unread_count(unread: u64) {
    gauge!("notify_feed_unread").set(unread as f64);
}

/// Times an API operation and records its duration.
pub struct RequestTimer {
    operation: &'static str,
    start: Instant,
}

impl RequestTimer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }

    /// Record the elapsed duration with the request outcome.
    pub fn record(self, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        histogram!(
            "notify_api_request_duration_seconds",
            "operation" => self.operation,
            "outcome" => outcome
        )
        .record(self.start.elapsed().as_secs_f64());
    }
}
