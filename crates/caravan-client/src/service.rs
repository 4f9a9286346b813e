//! # Data Service
//!
//! The typed query facade over the cached tables, plus the only local
//! mutations in the system (account and order save/delete, mirrored into
//! the remote-backed local tables).
//!
//! Every method first ensures the cache is initialized, then runs its
//! table operation inside the fault boundary: reads degrade to an empty
//! collection or `None` on transient failure, while consistency
//! violations and invalid arguments propagate.

use std::sync::Arc;
use tracing::debug;

use caravan_core::{validation, Account, Category, ConsistencyError, Order, Product};
use caravan_db::repository::generate_id;
use caravan_db::Database;

use crate::boundary::FaultBoundary;
use crate::cache::CacheManager;
use crate::error::ClientResult;
use crate::telemetry::TelemetrySink;

/// Typed, filtered, ordered read operations over the local mirror.
///
/// Cheap to clone; all clones share the cache manager and telemetry sink.
#[derive(Clone)]
pub struct DataService {
    cache: Arc<CacheManager>,
    boundary: FaultBoundary,
}

impl DataService {
    /// Creates a service over the given cache and telemetry sink.
    pub fn new(cache: Arc<CacheManager>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        DataService {
            cache,
            boundary: FaultBoundary::new(telemetry),
        }
    }

    pub(crate) fn cache(&self) -> &CacheManager {
        &self.cache
    }

    pub(crate) fn boundary(&self) -> &FaultBoundary {
        &self.boundary
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Lists accounts filtered by lead flag, ordered by company name
    /// ascending. Default `leads = false` callers pass `false` explicitly.
    pub async fn get_accounts(&self, leads: bool) -> ClientResult<Vec<Account>> {
        self.boundary
            .run("get_accounts", Vec::new(), async {
                let db = self.cache.ensure_initialized().await?;
                Ok(db.accounts().list(leads).await?)
            })
            .await
    }

    /// Saves an account: inserts when it has no identifier yet, updates
    /// otherwise. On insert the generated id is written back into the
    /// entity. Identifier presence is the sole create-vs-update signal.
    pub async fn save_account(&self, account: &mut Account) -> ClientResult<()> {
        self.boundary
            .run("save_account", (), async {
                validation::validate_company_name(&account.company_name)?;
                let db = self.cache.ensure_initialized().await?;

                if account.is_new() {
                    account.id = generate_id();
                    db.accounts().insert(account).await?;
                    debug!(id = %account.id, "Account inserted");
                } else {
                    db.accounts().update(account).await?;
                    debug!(id = %account.id, "Account updated");
                }
                Ok(())
            })
            .await
    }

    /// Deletes an account. The entity must carry an identifier.
    pub async fn delete_account(&self, account: &Account) -> ClientResult<()> {
        self.boundary
            .run("delete_account", (), async {
                validation::require_id("id", &account.id)?;
                let db = self.cache.ensure_initialized().await?;
                db.accounts().delete(&account.id).await?;
                Ok(())
            })
            .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Lists open orders for an account, ordered by due date ascending.
    pub async fn get_open_orders_for_account(&self, account_id: &str) -> ClientResult<Vec<Order>> {
        self.boundary
            .run("get_open_orders_for_account", Vec::new(), async {
                let db = self.cache.ensure_initialized().await?;
                Ok(db.orders().open_for_account(account_id).await?)
            })
            .await
    }

    /// Lists closed orders for an account, ordered by closed date descending.
    pub async fn get_closed_orders_for_account(
        &self,
        account_id: &str,
    ) -> ClientResult<Vec<Order>> {
        self.boundary
            .run("get_closed_orders_for_account", Vec::new(), async {
                let db = self.cache.ensure_initialized().await?;
                Ok(db.orders().closed_for_account(account_id).await?)
            })
            .await
    }

    /// Lists every cached order, unfiltered.
    pub async fn get_all_orders(&self) -> ClientResult<Vec<Order>> {
        self.boundary
            .run("get_all_orders", Vec::new(), async {
                let db = self.cache.ensure_initialized().await?;
                Ok(db.orders().list_all().await?)
            })
            .await
    }

    /// Saves an order: inserts when it has no identifier yet, updates
    /// otherwise. The owning account id is required.
    pub async fn save_order(&self, order: &mut Order) -> ClientResult<()> {
        self.boundary
            .run("save_order", (), async {
                validation::require_id("account_id", &order.account_id)?;
                let db = self.cache.ensure_initialized().await?;

                if order.is_new() {
                    order.id = generate_id();
                    db.orders().insert(order).await?;
                    debug!(id = %order.id, "Order inserted");
                } else {
                    db.orders().update(order).await?;
                    debug!(id = %order.id, "Order updated");
                }
                Ok(())
            })
            .await
    }

    /// Deletes an order. The entity must carry an identifier.
    pub async fn delete_order(&self, order: &Order) -> ClientResult<()> {
        self.boundary
            .run("delete_order", (), async {
                validation::require_id("id", &order.id)?;
                let db = self.cache.ensure_initialized().await?;
                db.orders().delete(&order.id).await?;
                Ok(())
            })
            .await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Lists the immediate children of a category, ordered by sequence
    /// ascending.
    ///
    /// With `None` (or a blank id) the unique root is located first and
    /// its children - the top-level categories - are returned. Zero or
    /// multiple roots is a fatal consistency error that propagates.
    pub async fn get_categories(&self, parent_id: Option<&str>) -> ClientResult<Vec<Category>> {
        self.boundary
            .run("get_categories", Vec::new(), async {
                let db = self.cache.ensure_initialized().await?;

                let parent = match parent_id.map(str::trim).filter(|id| !id.is_empty()) {
                    Some(id) => id.to_string(),
                    None => self.root_category(db).await?.id,
                };

                Ok(db.categories().children_of(&parent).await?)
            })
            .await
    }

    /// Lists the products owned by a category.
    pub async fn get_products(&self, category_id: &str) -> ClientResult<Vec<Product>> {
        self.boundary
            .run("get_products", Vec::new(), async {
                let db = self.cache.ensure_initialized().await?;
                Ok(db.products().list_by_category(category_id).await?)
            })
            .await
    }

    /// Looks a product up by exact name.
    ///
    /// Returns `None` when nothing matches. More than one match means the
    /// mirror holds duplicate names; that anomaly surfaces as an
    /// [`ConsistencyError::AmbiguousProductName`] instead of silently
    /// picking one.
    pub async fn get_product_by_name(&self, name: &str) -> ClientResult<Option<Product>> {
        self.boundary
            .run("get_product_by_name", None, async {
                let db = self.cache.ensure_initialized().await?;
                let mut matches = db.products().find_by_name(name).await?;

                match matches.len() {
                    0 => Ok(None),
                    1 => Ok(Some(matches.remove(0))),
                    count => Err(ConsistencyError::AmbiguousProductName {
                        name: name.to_string(),
                        count,
                    }
                    .into()),
                }
            })
            .await
    }

    /// Searches products by case-insensitive substring match against name
    /// OR description, de-duplicated.
    pub async fn search(&self, term: &str) -> ClientResult<Vec<Product>> {
        self.boundary
            .run("search_products", Vec::new(), async {
                let db = self.cache.ensure_initialized().await?;
                Ok(db.products().search(term).await?)
            })
            .await
    }

    // =========================================================================
    // Shared Helpers
    // =========================================================================

    /// Resolves the unique root of the category tree.
    ///
    /// Exactly one category may have a null parent; zero or many is a
    /// fatal consistency error.
    pub(crate) async fn root_category(&self, db: &Database) -> ClientResult<Category> {
        let mut roots = db.categories().roots().await?;

        match roots.len() {
            0 => Err(ConsistencyError::RootMissing.into()),
            1 => Ok(roots.remove(0)),
            count => Err(ConsistencyError::MultipleRoots { count }.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
