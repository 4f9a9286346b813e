//! # Telemetry Port
//!
//! Fire-and-forget timing and error reporting. The sink is an injected
//! trait object so tests can substitute a recording fake; nothing in this
//! module may ever affect control flow of the operation being observed.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

use crate::error::ClientError;

// =============================================================================
// Severity
// =============================================================================

/// Severity attached to a reported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

// =============================================================================
// Telemetry Sink
// =============================================================================

/// Port for the telemetry collaborator.
///
/// Implementations must be cheap and infallible: both methods are called
/// on hot paths and their effects are fire-and-forget.
pub trait TelemetrySink: Send + Sync {
    /// Records a completed timing measurement for a named operation.
    fn record_timing(&self, operation: &str, elapsed: Duration);

    /// Reports a failed operation.
    fn report_error(&self, operation: &str, error: &ClientError, severity: Severity);
}

// =============================================================================
// Timing Guard
// =============================================================================

/// Scoped timing measurement.
///
/// Created at the top of an operation, dropped on every exit path -
/// success, failure, or panic unwind - so the measurement is always
/// stopped and flushed.
pub struct TimingGuard {
    operation: String,
    started: Instant,
    sink: Option<Arc<dyn TelemetrySink>>,
}

impl TimingGuard {
    /// Starts a named measurement against the given sink.
    pub fn start(sink: Arc<dyn TelemetrySink>, operation: &str) -> Self {
        TimingGuard {
            operation: operation.to_string(),
            started: Instant::now(),
            sink: Some(sink),
        }
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.record_timing(&self.operation, self.started.elapsed());
        }
    }
}

// =============================================================================
// Built-in Sinks
// =============================================================================

/// Telemetry sink backed by the `tracing` subscriber.
///
/// The default sink in production wiring: timings at debug, failures at
/// error/warn with the remote-rejection class as a structured field.
#[derive(Debug, Default, Clone)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn record_timing(&self, operation: &str, elapsed: Duration) {
        debug!(
            operation = operation,
            elapsed_ms = elapsed.as_millis() as u64,
            "operation timed"
        );
    }

    fn report_error(&self, operation: &str, err: &ClientError, severity: Severity) {
        match severity {
            Severity::Error => error!(
                operation = operation,
                error = %err,
                remote_rejection = err.is_remote_rejection(),
                "operation failed"
            ),
            Severity::Warning => warn!(
                operation = operation,
                error = %err,
                "operation degraded"
            ),
        }
    }
}

/// No-op telemetry sink for tests and benchmarks.
#[derive(Debug, Default, Clone)]
pub struct NoOpTelemetry;

impl TelemetrySink for NoOpTelemetry {
    fn record_timing(&self, _operation: &str, _elapsed: Duration) {}
    fn report_error(&self, _operation: &str, _error: &ClientError, _severity: Severity) {}
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CountingSink {
        timings: Mutex<Vec<String>>,
    }

    impl TelemetrySink for CountingSink {
        fn record_timing(&self, operation: &str, _elapsed: Duration) {
            self.timings.lock().unwrap().push(operation.to_string());
        }
        fn report_error(&self, _operation: &str, _error: &ClientError, _severity: Severity) {}
    }

    #[test]
    fn test_timing_guard_records_on_drop() {
        let sink = Arc::new(CountingSink {
            timings: Mutex::new(Vec::new()),
        });

        {
            let _guard = TimingGuard::start(sink.clone(), "get_accounts");
            assert!(sink.timings.lock().unwrap().is_empty());
        }

        assert_eq!(*sink.timings.lock().unwrap(), vec!["get_accounts"]);
    }

    #[test]
    fn test_timing_guard_records_on_early_return() {
        let sink = Arc::new(CountingSink {
            timings: Mutex::new(Vec::new()),
        });

        fn failing(sink: Arc<CountingSink>) -> Result<(), ()> {
            let _guard = TimingGuard::start(sink, "sync_orders");
            Err(())
        }

        let _ = failing(sink.clone());
        assert_eq!(*sink.timings.lock().unwrap(), vec!["sync_orders"]);
    }
}
