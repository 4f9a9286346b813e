//! # Sync Coordinator
//!
//! Per-table pull synchronization: refresh the local mirror from the
//! remote source, one table at a time.
//!
//! ## Pull Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Pull Operation                                 │
//! │                                                                         │
//! │  ensure_initialized() ── idempotent local cache bootstrap              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RemoteSource::pull_<table>() ── full unfiltered fetch                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repository.upsert_all(rows) ── single transaction:                    │
//! │       overwrite by id, insert new, NEVER delete;                       │
//! │       any failure rolls back, previous rows survive                    │
//! │                                                                         │
//! │  The whole pull runs inside FaultBoundary under its own name, so a     │
//! │  failed table is individually attributable and never reaches the      │
//! │  caller as an error.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is deliberately no push path here and none may be added: the
//! remote is the single source of truth and local rows are a disposable
//! projection of it.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::boundary::FaultBoundary;
use crate::cache::CacheManager;
use crate::remote::RemoteSource;
use crate::telemetry::TelemetrySink;

/// Coordinates pull-only synchronization of the four mirror tables.
pub struct SyncCoordinator {
    cache: Arc<CacheManager>,
    remote: Arc<dyn RemoteSource>,
    boundary: FaultBoundary,
}

impl SyncCoordinator {
    /// Creates a coordinator over the given cache, remote source, and
    /// telemetry sink.
    pub fn new(
        cache: Arc<CacheManager>,
        remote: Arc<dyn RemoteSource>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        SyncCoordinator {
            cache,
            remote,
            boundary: FaultBoundary::new(telemetry),
        }
    }

    /// Refreshes the accounts mirror from the remote source.
    pub async fn synchronize_accounts(&self) {
        self.boundary
            .run_unit("sync_accounts", async {
                let db = self.cache.ensure_initialized().await?;
                let accounts = self.remote.pull_accounts().await?;
                db.accounts().upsert_all(&accounts).await?;
                debug!(count = accounts.len(), "Accounts synchronized");
                Ok(())
            })
            .await;
    }

    /// Refreshes the orders mirror from the remote source.
    pub async fn synchronize_orders(&self) {
        self.boundary
            .run_unit("sync_orders", async {
                let db = self.cache.ensure_initialized().await?;
                let orders = self.remote.pull_orders().await?;
                db.orders().upsert_all(&orders).await?;
                debug!(count = orders.len(), "Orders synchronized");
                Ok(())
            })
            .await;
    }

    /// Refreshes the categories mirror from the remote source.
    pub async fn synchronize_categories(&self) {
        self.boundary
            .run_unit("sync_categories", async {
                let db = self.cache.ensure_initialized().await?;
                let categories = self.remote.pull_categories().await?;
                db.categories().upsert_all(&categories).await?;
                debug!(count = categories.len(), "Categories synchronized");
                Ok(())
            })
            .await;
    }

    /// Refreshes the products mirror from the remote source.
    pub async fn synchronize_products(&self) {
        self.boundary
            .run_unit("sync_products", async {
                let db = self.cache.ensure_initialized().await?;
                let products = self.remote.pull_products().await?;
                db.products().upsert_all(&products).await?;
                debug!(count = products.len(), "Products synchronized");
                Ok(())
            })
            .await;
    }

    /// Initializes the cache and runs all four pulls, sequentially.
    ///
    /// One remote call is in flight at a time; each pull is its own
    /// fault-isolated operation, so one failed table does not stop the
    /// others.
    pub async fn seed_local_data(&self) {
        if let Err(err) = self.cache.ensure_initialized().await {
            // Each pull will rediscover and report this; noted here because
            // seeding against an unusable cache is worth a line of its own.
            warn!(error = %err, "Cache initialization failed at seed time");
        }

        self.synchronize_accounts().await;
        self.synchronize_categories().await;
        self.synchronize_products().await;
        self.synchronize_orders().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{account, client_with, product, scenario_remote, FixtureRemote};
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_seed_pulls_all_four_tables_sequentially() {
        let remote = scenario_remote();
        remote
            .accounts
            .lock()
            .unwrap()
            .push(account("acc-1", "Acme", false));
        let (client, telemetry) = client_with(remote);

        client.sync().seed_local_data().await;

        assert_eq!(
            telemetry.timings(),
            vec!["sync_accounts", "sync_categories", "sync_products", "sync_orders"]
        );

        let db = client.cache().ensure_initialized().await.unwrap();
        assert_eq!(db.accounts().count().await.unwrap(), 1);
        assert_eq!(db.categories().count().await.unwrap(), 4);
        assert_eq!(db.products().count().await.unwrap(), 2);
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_pull_refreshes_changed_rows_in_place() {
        let remote = scenario_remote();
        let (client, _telemetry) = client_with(remote.clone());

        client.sync().synchronize_products().await;

        // The remote renames a product; the next pull must overwrite it
        // without duplicating rows.
        remote.products.lock().unwrap()[0] = product("p1", "L", "widget-9001", "revised");
        client.sync().synchronize_products().await;

        let db = client.cache().ensure_initialized().await.unwrap();
        assert_eq!(db.products().count().await.unwrap(), 2);
        let hits = db.products().find_by_name("widget-9001").await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_pull_keeps_previous_rows_and_raises_nothing() {
        let remote = scenario_remote();
        let (client, telemetry) = client_with(remote.clone());

        client.sync().synchronize_products().await;

        remote.fail_products.store(true, Ordering::SeqCst);
        // Must complete normally despite the failure.
        client.sync().synchronize_products().await;

        let db = client.cache().ensure_initialized().await.unwrap();
        assert_eq!(db.products().count().await.unwrap(), 2);

        let errors = telemetry.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "sync_products");
    }

    #[tokio::test]
    async fn test_rejected_pull_is_reported_per_operation() {
        let remote = Arc::new(FixtureRemote::default());
        remote.fail_all.store(true, Ordering::SeqCst);
        let (client, telemetry) = client_with(remote);

        client.sync().seed_local_data().await;

        let failed: Vec<String> = telemetry.errors().into_iter().map(|(op, _)| op).collect();
        assert_eq!(
            failed,
            ["sync_accounts", "sync_categories", "sync_products", "sync_orders"]
        );
    }
}
