//! # Fault Boundary
//!
//! The uniform wrapper around every client operation: start a named
//! timing measurement, run the work, and contain failures.
//!
//! ## Containment Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      FaultBoundary::run                                 │
//! │                                                                         │
//! │  start TimingGuard(name) ───────────────── released on every exit      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  await work ── Ok(value) ──────────────────────────► Ok(value)         │
//! │       │                                                                 │
//! │       └─ Err(e) ── report to telemetry (severity: error)               │
//! │              │                                                          │
//! │              ├─ e.is_transient()  ────────────────► Ok(default)        │
//! │              │   (remote rejection, network, local store)              │
//! │              │                                                          │
//! │              └─ consistency / invalid argument ───► Err(e)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A single flaky pull or disk hiccup degrades a read to an empty result
//! instead of crashing the caller; a violated catalog invariant does not,
//! because masking it would hide corrupt data behind a plausible answer.

use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::ClientResult;
use crate::telemetry::{Severity, TelemetrySink, TimingGuard};

/// Executes units of work with timing telemetry and fail-soft error
/// containment. Cheap to clone; all clones share the sink.
#[derive(Clone)]
pub struct FaultBoundary {
    telemetry: Arc<dyn TelemetrySink>,
}

impl FaultBoundary {
    /// Creates a boundary reporting to the given sink.
    pub fn new(telemetry: Arc<dyn TelemetrySink>) -> Self {
        FaultBoundary { telemetry }
    }

    /// Returns the telemetry sink this boundary reports to.
    pub fn telemetry(&self) -> Arc<dyn TelemetrySink> {
        self.telemetry.clone()
    }

    /// Runs `work` under the named timing measurement.
    ///
    /// On success the result is returned unchanged. On failure the error
    /// is reported to telemetry; transient failures then degrade to
    /// `Ok(default)`, while consistency violations and invalid arguments
    /// propagate as `Err`.
    pub async fn run<T, F>(&self, operation: &str, default: T, work: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let _timer = TimingGuard::start(self.telemetry.clone(), operation);

        match work.await {
            Ok(value) => Ok(value),
            Err(err) => {
                self.telemetry.report_error(operation, &err, Severity::Error);

                if err.is_transient() {
                    warn!(
                        operation = operation,
                        error = %err,
                        "transient failure, returning default result"
                    );
                    Ok(default)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// No-return-value form of [`FaultBoundary::run`].
    ///
    /// Completes normally whatever happens; every failure is reported and
    /// swallowed. Used by the sync pulls, whose callers have nothing to do
    /// with an error beyond what telemetry already captured.
    pub async fn run_unit<F>(&self, operation: &str, work: F)
    where
        F: Future<Output = ClientResult<()>>,
    {
        if let Err(err) = self.run(operation, (), work).await {
            debug!(operation = operation, error = %err, "error swallowed by unit boundary");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::remote::RemoteError;
    use crate::testutil::RecordingTelemetry;
    use caravan_core::ConsistencyError;

    fn boundary() -> (FaultBoundary, Arc<RecordingTelemetry>) {
        let telemetry = Arc::new(RecordingTelemetry::default());
        (FaultBoundary::new(telemetry.clone()), telemetry)
    }

    #[tokio::test]
    async fn test_success_passes_through_and_times() {
        let (boundary, telemetry) = boundary();

        let result = boundary.run("op", 0, async { Ok(42) }).await.unwrap();

        assert_eq!(result, 42);
        assert_eq!(telemetry.timings(), vec!["op"]);
        assert!(telemetry.errors().is_empty());
    }

    #[tokio::test]
    async fn test_transient_failure_degrades_to_default() {
        let (boundary, telemetry) = boundary();

        let result = boundary
            .run("op", Vec::<i32>::new(), async {
                Err(ClientError::Remote(RemoteError::Network("down".into())))
            })
            .await
            .unwrap();

        assert!(result.is_empty());
        // Reported AND timed despite the failure.
        assert_eq!(telemetry.errors().len(), 1);
        assert_eq!(telemetry.timings(), vec!["op"]);
    }

    #[tokio::test]
    async fn test_consistency_failure_propagates() {
        let (boundary, telemetry) = boundary();

        let result = boundary
            .run("op", 0, async {
                Err(ClientError::Consistency(ConsistencyError::RootMissing))
            })
            .await;

        assert!(matches!(
            result,
            Err(ClientError::Consistency(ConsistencyError::RootMissing))
        ));
        // Still reported and timed: propagation does not bypass telemetry.
        assert_eq!(telemetry.errors().len(), 1);
        assert_eq!(telemetry.timings(), vec!["op"]);
    }

    #[tokio::test]
    async fn test_run_unit_swallows_everything() {
        let (boundary, telemetry) = boundary();

        boundary
            .run_unit("op", async {
                Err(ClientError::Consistency(ConsistencyError::RootMissing))
            })
            .await;

        assert_eq!(telemetry.errors().len(), 1);
    }
}
