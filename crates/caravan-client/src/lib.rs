//! # caravan-client: Local-First Sync Client for Caravan
//!
//! This crate maintains a local SQLite mirror of a remote field-sales data
//! source and exposes typed query operations over it. Synchronization is
//! strictly pull-only: the remote is authoritative, the cache is a
//! disposable projection, and no write-back path exists.
//!
//! ## Component Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Client Architecture                             │
//! │                                                                         │
//! │  Caller (app / tests)                                                  │
//! │     │              │                    │                               │
//! │     ▼              ▼                    ▼                               │
//! │  ┌──────────┐  ┌─────────────┐  ┌─────────────────┐                    │
//! │  │   Sync   │  │ DataService │  │ CatalogResolver │                    │
//! │  │Coordinator│ │ typed reads │◄─│ leaf discovery  │                    │
//! │  │ 4 pulls  │  │ + save/del  │  │ + aggregation   │                    │
//! │  └────┬─────┘  └──────┬──────┘  └─────────────────┘                    │
//! │       │               │                                                 │
//! │       │   every operation:                                             │
//! │       │   1. ensure_initialized()   ← CacheManager (idempotent)        │
//! │       │   2. run inside FaultBoundary ← timing + fail-soft             │
//! │       ▼               ▼                                                 │
//! │  ┌───────────────────────────────────────────────┐                     │
//! │  │       caravan-db (SQLite mirror tables)       │                     │
//! │  └───────────────────────────────────────────────┘                     │
//! │       ▲                                                                 │
//! │  ┌────┴─────────────┐        ┌──────────────────┐                      │
//! │  │ RemoteSource port│        │ TelemetrySink    │                      │
//! │  │ (pull-only)      │        │ (fire-and-forget)│                      │
//! │  └──────────────────┘        └──────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//!
//! Transient I/O failures (remote rejection, network, local store) are
//! caught at the fault boundary, reported to telemetry, and masked behind
//! the operation's default result - an empty list, `None`, or silent
//! completion. Catalog consistency violations and invalid arguments
//! propagate so callers and tests can tell them apart from a flaky network.
//!
//! ## Module Organization
//!
//! - [`telemetry`] - `TelemetrySink` port, timing guard, tracing-backed sink
//! - [`boundary`] - `FaultBoundary`, the uniform wrap for every operation
//! - [`remote`] - `RemoteSource` port (pull-only by construction)
//! - [`cache`] - `CacheManager`, lazy idempotent local store bootstrap
//! - [`sync`] - `SyncCoordinator`, per-table pulls plus full seeding
//! - [`service`] - `DataService`, the typed query facade
//! - [`catalog`] - `CatalogResolver`, recursive leaf-category discovery
//! - [`config`] - TOML client configuration
//! - [`client`] - `Client`/`ClientBuilder`, wiring it all together
//!
//! ## Usage
//!
//! ```rust,ignore
//! use caravan_client::{Client, ClientBuilder};
//!
//! let client = ClientBuilder::new(remote)
//!     .with_db_config(DbConfig::new("./caravan.db"))
//!     .build();
//!
//! client.sync().seed_local_data().await;
//! let accounts = client.data().get_accounts(false).await?;
//! let products = client.catalog().all_products_under(&dept_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod boundary;
pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod remote;
pub mod service;
pub mod sync;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testutil;

// =============================================================================
// Re-exports
// =============================================================================

pub use boundary::FaultBoundary;
pub use cache::CacheManager;
pub use catalog::{CatalogResolver, MAX_HIERARCHY_DEPTH};
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ClientResult};
pub use remote::{RemoteError, RemoteSource};
pub use service::DataService;
pub use sync::SyncCoordinator;
pub use telemetry::{NoOpTelemetry, Severity, TelemetrySink, TimingGuard, TracingTelemetry};
