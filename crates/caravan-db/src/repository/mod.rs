//! # Repository Module
//!
//! Repository implementations for the four mirror tables. Each repository
//! wraps the shared pool and keeps that table's SQL in one place: the
//! typed filter/order read operations consumed by the query facade, the
//! local save/delete mutations (accounts and orders only), and the
//! transactional `upsert_all` used by pull synchronization.
//!
//! ## Available Repositories
//!
//! - [`account::AccountRepository`] - account reads and local mutations
//! - [`order::OrderRepository`] - order reads and local mutations
//! - [`category::CategoryRepository`] - category tree reads (read-only mirror)
//! - [`product::ProductRepository`] - product reads and search (read-only mirror)

use uuid::Uuid;

pub mod account;
pub mod category;
pub mod order;
pub mod product;

/// Generates a new entity id (UUID v4).
///
/// Ids are assigned client-side so inserts work offline, the same scheme
/// the remote source uses.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
