//! # Remote Source Port
//!
//! The injected contract for the remote data source. One pull per logical
//! table, each returning the full unfiltered row set for that table.
//!
//! The trait is pull-only **by construction**: the mirror is
//! server-authoritative and this client must never grow a write-back
//! path, so no push method exists to be called by mistake. The concrete
//! implementation (HTTP, gRPC, a fixture in tests) is always passed in at
//! client construction, never reached through a process-wide singleton.

use async_trait::async_trait;
use thiserror::Error;

use caravan_core::{Account, Category, Order, Product};

// =============================================================================
// Remote Error
// =============================================================================

/// Failures observed while pulling from the remote source.
///
/// Both variants are transient from the client's point of view; they are
/// kept distinct so telemetry can attribute a rejection by the service
/// separately from infrastructure trouble.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The remote service answered and refused the operation.
    #[error("remote service rejected {operation}: {message}")]
    Rejected { operation: String, message: String },

    /// The network or transport failed before the service could answer.
    #[error("network failure: {0}")]
    Network(String),
}

/// Result type for remote pulls.
pub type RemoteResult<T> = Result<T, RemoteError>;

// =============================================================================
// Remote Source
// =============================================================================

/// Port for the remote data source, one unconditional pull per table.
///
/// Pulls are full refreshes: no incremental filter, no cursor. The caller
/// upserts the result into the local mirror and never deletes on its
/// behalf.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Pulls every account.
    async fn pull_accounts(&self) -> RemoteResult<Vec<Account>>;

    /// Pulls every order.
    async fn pull_orders(&self) -> RemoteResult<Vec<Order>>;

    /// Pulls every catalog category.
    async fn pull_categories(&self) -> RemoteResult<Vec<Category>>;

    /// Pulls every catalog product.
    async fn pull_products(&self) -> RemoteResult<Vec<Product>>;
}
