//! # Error Types
//!
//! Domain error types for caravan-core.
//!
//! Two families live here, and the distinction carries all the way up the
//! stack: a [`ConsistencyError`] means the cached catalog violates an
//! invariant of the data contract and must surface to the caller; a
//! [`ValidationError`] means the caller handed us bad input and is rejected
//! before any I/O happens. Transient I/O failures are NOT represented here -
//! those belong to the db and client layers, which degrade them to default
//! results instead of propagating them.

use thiserror::Error;

// =============================================================================
// Consistency Error
// =============================================================================

/// A violated invariant of the catalog hierarchy or cached data.
///
/// These are raised as explicit failures and propagate out of the operation
/// that detected them; they are never masked behind a default result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsistencyError {
    /// No category has a null parent. The tree has no root.
    #[error("catalog has no root category")]
    RootMissing,

    /// More than one category has a null parent.
    #[error("catalog has {count} root categories, expected exactly one")]
    MultipleRoots { count: usize },

    /// A category referenced by id does not exist in the cache.
    #[error("category not found: {0}")]
    CategoryNotFound(String),

    /// A category was passed where a top-level category id is required,
    /// but its parent is not the root.
    #[error("category {category_id} is not a direct child of the root category")]
    NotTopLevel { category_id: String },

    /// A product name lookup matched more than one product. Names are
    /// expected to be unique; an ambiguous match is an anomaly worth
    /// surfacing, not silently picking one.
    #[error("product name '{name}' matches {count} products, expected at most one")]
    AmbiguousProductName { name: String, count: usize },

    /// The category tree is deeper than the defensive recursion bound,
    /// which in practice means a cycle. The data contract guarantees an
    /// acyclic tree; this converts a violation into a reported error
    /// instead of unbounded recursion.
    #[error("category hierarchy deeper than {limit} levels, assuming a cycle")]
    HierarchyTooDeep { limit: usize },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any I/O is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Unit Tests
// =============================================================================
