//! Log sink trait and the tracing-backed default.

use crate::record::Severity;

/// Destination for the leveled log line emitted alongside every audit
/// write.
///
/// The line carries the target kind, target id, and composed message, so
/// operators can correlate it with the durable record whether or not the
/// audit store was reachable.
pub trait LogSink: Send + Sync {
    /// Emit one log line at the given severity.
    fn emit(&self, severity: Severity, text: &str);
}

/// Default sink forwarding to the `tracing` ecosystem.
///
/// `Warning` maps to `warn!`; both `Error` and `Critical` map to `error!`,
/// the highest level `tracing` offers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn emit(&self, severity: Severity, text: &str) {
        match severity {
            Severity::Debug => tracing::debug!("{text}"),
            Severity::Info => tracing::info!("{text}"),
            Severity::Warning => tracing::warn!("{text}"),
            Severity::Error => tracing::error!("{text}"),
            Severity::Critical => tracing::error!(severity = "critical", "{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_sink_emits_without_subscriber() {
        // No subscriber installed: events are dropped, not panicked on.
        let sink = TracingLogSink;
        sink.emit(Severity::Info, "recipe 1: Created Chicken Soup");
        sink.emit(Severity::Critical, "ingredient 42: Deleted Salt");
    }
}
