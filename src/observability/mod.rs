//! Observability subsystem
//!
//! - Structured JSON logging to stderr, filtered by severity
//! - Typed events
//! - Atomic counters
//!
//! Observability is read-only: nothing here changes codec results.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{CodecMetrics, MetricsSnapshot};

/// Log an event at its own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_does_not_panic() {
        log_event(Event::RecordsRead, &[("records", "2")]);
        log_event(Event::ConversionFailed, &[]);
    }
}
