//! # Client Error Types
//!
//! The single error type seen by the fault boundary, and the
//! categorization that drives its fail-soft policy.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  TRANSIENT (degraded to the default result, never propagated)          │
//! │  ├── Remote    - the remote source rejected the pull, or the network   │
//! │  │               failed before it could answer                          │
//! │  └── Database  - the local store failed (init, query, pool)            │
//! │                                                                         │
//! │  PROPAGATED (reported AND returned to the caller)                      │
//! │  ├── Consistency     - catalog invariant violated (roots, hierarchy)   │
//! │  └── InvalidArgument - blank required identifier, bad local input      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use caravan_core::{ConsistencyError, ValidationError};
use caravan_db::DbError;

use crate::remote::RemoteError;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Any failure a client operation can observe.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The caller passed invalid input; rejected before any I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// The cached catalog violates an invariant of the data contract.
    #[error("catalog consistency violation: {0}")]
    Consistency(#[from] ConsistencyError),

    /// The remote source failed or rejected the operation.
    #[error("remote source failure: {0}")]
    Remote(#[from] RemoteError),

    /// The local cache failed.
    #[error("local cache failure: {0}")]
    Database(#[from] DbError),
}

impl ClientError {
    /// True for failures the fault boundary masks behind a default result.
    ///
    /// Transient failures are environmental - the network dropped, the
    /// disk hiccuped - and retrying later may succeed. Everything else is
    /// a fact about the data or the call and must reach the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self, ClientError::Remote(_) | ClientError::Database(_))
    }

    /// True when the remote service explicitly rejected the operation, as
    /// opposed to an infrastructure failure. Both are transient; telemetry
    /// keeps them attributable separately.
    pub fn is_remote_rejection(&self) -> bool {
        matches!(self, ClientError::Remote(RemoteError::Rejected { .. }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_categorization() {
        assert!(ClientError::Remote(RemoteError::Network("timeout".into())).is_transient());
        assert!(ClientError::Database(DbError::PoolExhausted).is_transient());

        assert!(!ClientError::Consistency(ConsistencyError::RootMissing).is_transient());
        assert!(!ClientError::InvalidArgument(ValidationError::Required {
            field: "id".into()
        })
        .is_transient());
    }

    #[test]
    fn test_remote_rejection_is_distinguishable() {
        let rejected = ClientError::Remote(RemoteError::Rejected {
            operation: "pull_accounts".into(),
            message: "quota exceeded".into(),
        });
        assert!(rejected.is_transient());
        assert!(rejected.is_remote_rejection());

        let network = ClientError::Remote(RemoteError::Network("dns".into()));
        assert!(!network.is_remote_rejection());
    }
}
