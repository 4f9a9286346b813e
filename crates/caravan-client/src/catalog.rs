//! # Catalog Hierarchy Resolver
//!
//! Recursive leaf-category discovery and product aggregation.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               all_products_under(top_level_category_id)                 │
//! │                                                                         │
//! │  1. reject a blank id (before any table access)                        │
//! │  2. resolve the unique root          ── fatal if zero/multiple roots   │
//! │  3. resolve the named category       ── fatal if missing               │
//! │  4. its parent must BE the root      ── fatal otherwise                │
//! │  5. leaf_categories_under(id):                                         │
//! │        leaf?  → itself, a singleton                                    │
//! │        else   → recurse into children (sequence order), concatenate    │
//! │  6. concat get_products(leaf) over every discovered leaf               │
//! │                                                                         │
//! │         root                                                            │
//! │        ┌──┴───┐                                                         │
//! │        A      B        all_products_under(A):                          │
//! │      ┌─┴─┐    leaf       leaves = [L1, L2]                             │
//! │      L1  L2              result = products(L1) ++ products(L2)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Recursion depth is bounded by tree depth. The data contract guarantees
//! an acyclic, single-rooted tree; that is a precondition, not an enforced
//! invariant, but a defensive depth bound converts a cycle into a reported
//! consistency error instead of unbounded recursion.
//!
//! No de-duplication is applied to the aggregate: owning-category is
//! single-valued per product, so duplicates cannot arise from a
//! well-formed tree.

use futures_util::future::BoxFuture;

use caravan_core::{validation, Category, ConsistencyError, Product};

use crate::error::ClientResult;
use crate::service::DataService;

/// Hard ceiling on category tree depth.
///
/// Far above any real catalog; hitting it means the parent links loop.
pub const MAX_HIERARCHY_DEPTH: usize = 32;

/// Resolves leaf categories under a top-level category and aggregates
/// their products, using the data service's read primitives.
#[derive(Clone)]
pub struct CatalogResolver {
    service: DataService,
}

impl CatalogResolver {
    /// Creates a resolver over the given data service.
    pub fn new(service: DataService) -> Self {
        CatalogResolver { service }
    }

    /// Returns every product under the given **top-level** category,
    /// aggregated across all leaf categories in its subtree.
    ///
    /// ## Failures (all propagate)
    /// - blank id: invalid argument, before any table access
    /// - zero or multiple roots: fatal consistency error
    /// - unknown id: [`ConsistencyError::CategoryNotFound`]
    /// - id not directly under the root: [`ConsistencyError::NotTopLevel`];
    ///   guards against misuse with a nested category id, and no product
    ///   fetch happens
    pub async fn all_products_under(&self, top_level_category_id: &str) -> ClientResult<Vec<Product>> {
        self.service
            .boundary()
            .run("all_products_under", Vec::new(), async {
                validation::require_id("top_level_category_id", top_level_category_id)?;

                let db = self.service.cache().ensure_initialized().await?;
                let root = self.service.root_category(db).await?;

                let category = db
                    .categories()
                    .get_by_id(top_level_category_id)
                    .await?
                    .ok_or_else(|| {
                        ConsistencyError::CategoryNotFound(top_level_category_id.to_string())
                    })?;

                if category.parent_id.as_deref() != Some(root.id.as_str()) {
                    return Err(ConsistencyError::NotTopLevel {
                        category_id: category.id,
                    }
                    .into());
                }

                let mut products = Vec::new();
                for leaf in self.leaf_categories_under(category, 0).await? {
                    products.extend(self.service.get_products(&leaf.id).await?);
                }

                Ok(products)
            })
            .await
    }

    /// Depth-first leaf discovery.
    ///
    /// A leaf returns itself as a singleton; a branch recurses into every
    /// immediate child (in sequence order, as the category query returns
    /// them) and concatenates the results.
    fn leaf_categories_under(
        &self,
        category: Category,
        depth: usize,
    ) -> BoxFuture<'_, ClientResult<Vec<Category>>> {
        Box::pin(async move {
            if depth >= MAX_HIERARCHY_DEPTH {
                return Err(ConsistencyError::HierarchyTooDeep {
                    limit: MAX_HIERARCHY_DEPTH,
                }
                .into());
            }

            if category.is_leaf() {
                return Ok(vec![category]);
            }

            let mut leaves = Vec::new();
            for child in self.service.get_categories(Some(&category.id)).await? {
                leaves.extend(self.leaf_categories_under(child, depth + 1).await?);
            }

            Ok(leaves)
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
