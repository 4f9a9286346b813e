//! # caravan-core: Pure Domain Types for Caravan
//!
//! Caravan keeps a local, pull-only mirror of a remote field-sales data
//! source. This crate is the bottom of the stack: the entity types held in
//! that mirror, the invariants of the catalog hierarchy, and the input
//! validation rules. No I/O of any kind happens here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Caravan Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 caravan-client (Sync Client)                    │   │
//! │  │   SyncCoordinator ── DataService ── CatalogResolver             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 caravan-db (Local Cache Layer)                  │   │
//! │  │         SQLite pool, migrations, per-table repositories         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ caravan-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐     ┌───────────┐     ┌────────────┐           │   │
//! │  │   │   types   │     │   error   │     │ validation │           │   │
//! │  │   │  Account  │     │Consistency│     │ require_id │           │   │
//! │  │   │  Category │     │Validation │     │   checks   │           │   │
//! │  │   └───────────┘     └───────────┘     └────────────┘           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity types (Account, Order, Category, Product)
//! - [`error`] - Consistency and validation error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **Server-Authoritative Mirror**: the cache is disposable; these types
//!    never carry conflict-resolution state because push sync does not exist

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ConsistencyError, ValidationError};
pub use types::{Account, Category, Order, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length accepted for an account company name.
///
/// Keeps locally entered data within what the remote schema accepts.
pub const MAX_COMPANY_NAME_LEN: usize = 200;
