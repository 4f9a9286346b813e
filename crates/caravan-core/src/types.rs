//! # Domain Types
//!
//! Entity types for the four cached tables mirrored from the remote source.
//!
//! ## Identity Convention
//! Every entity carries a `String` UUID id. An **empty** id means the entity
//! has not been saved yet; it is the sole signal that distinguishes a create
//! from an update in the save operations. Ids are assigned client-side
//! (UUID v4, offline-safe) at insert time.
//!
//! ## Mutability
//! Accounts and orders accept local inserts/updates/deletes. Categories and
//! products are read-only mirrors, written only by pull synchronization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Account
// =============================================================================

/// A customer account, or a lead that has not converted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Account {
    /// Unique identifier (UUID v4). Empty until first save.
    pub id: String,

    /// Company name shown in account lists, the account sort key.
    pub company_name: String,

    /// True while the account is still a lead.
    pub is_lead: bool,
}

impl Account {
    /// True if the account has never been saved (no identifier assigned).
    #[inline]
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }
}

// =============================================================================
// Order
// =============================================================================

/// A sales order belonging to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    /// Unique identifier (UUID v4). Empty until first save.
    pub id: String,

    /// Owning account identifier.
    pub account_id: String,

    /// True while the order is open; false once closed.
    pub is_open: bool,

    /// When the order is due to ship.
    pub due_date: DateTime<Utc>,

    /// When the order was closed. None while the order is open.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// True if the order has never been saved (no identifier assigned).
    #[inline]
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }
}

// =============================================================================
// Category
// =============================================================================

/// A node in the catalog category tree.
///
/// The tree has exactly one root (`parent_id` is `None`); every other
/// category names its parent. Leaves (`has_sub_categories == false`) own
/// the products directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Parent category identifier. `None` marks the root.
    pub parent_id: Option<String>,

    /// Display name.
    pub name: String,

    /// Sibling ordering key, ascending.
    pub sequence: i64,

    /// Whether this category has sub-categories (i.e., is not a leaf).
    pub has_sub_categories: bool,
}

impl Category {
    /// True for the root of the catalog tree.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// True for a leaf category, the kind that owns products.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        !self.has_sub_categories
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product owned by a single leaf category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning leaf category identifier. Single-valued: a product belongs
    /// to exactly one category.
    pub category_id: String,

    /// Display name.
    pub name: String,

    /// Free-text description, searched together with the name.
    pub description: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_is_new_on_empty_id() {
        let account = Account {
            id: String::new(),
            company_name: "Initech".into(),
            is_lead: false,
        };
        assert!(account.is_new());

        let saved = Account {
            id: "a2b5f3c1-0000-4000-8000-000000000001".into(),
            ..account
        };
        assert!(!saved.is_new());
    }

    #[test]
    fn test_category_root_and_leaf_flags() {
        let root = Category {
            id: "root".into(),
            parent_id: None,
            name: "Catalog".into(),
            sequence: 0,
            has_sub_categories: true,
        };
        assert!(root.is_root());
        assert!(!root.is_leaf());

        let leaf = Category {
            id: "leaf".into(),
            parent_id: Some("root".into()),
            name: "Widgets".into(),
            sequence: 1,
            has_sub_categories: false,
        };
        assert!(!leaf.is_root());
        assert!(leaf.is_leaf());
    }
}
