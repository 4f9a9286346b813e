//! # Cache Manager
//!
//! Lazy, idempotent bootstrap of the local store. The first operation to
//! touch the cache pays for opening the pool and applying the schema
//! migrations; every later call gets the already-initialized handle back
//! immediately. Callers never perform a separate setup step.

use tokio::sync::OnceCell;
use tracing::{error, info};

use caravan_db::{Database, DbConfig, DbResult};

/// Owns the lazy initialization of the local cache and hands out the
/// shared [`Database`] handle.
///
/// Backed by a `OnceCell`, which gives exactly the guarantees the
/// transparent-setup behavior needs: single successful assignment,
/// re-entrant under concurrent first calls, no hidden global state. A
/// *failed* attempt leaves the cell empty, so the next operation retries
/// instead of wedging the process until restart.
pub struct CacheManager {
    config: DbConfig,
    db: OnceCell<Database>,
}

impl CacheManager {
    /// Creates a manager for the given database configuration. No I/O
    /// happens until the first [`CacheManager::ensure_initialized`] call.
    pub fn new(config: DbConfig) -> Self {
        CacheManager {
            config,
            db: OnceCell::new(),
        }
    }

    /// True once the local store has been successfully initialized.
    pub fn is_initialized(&self) -> bool {
        self.db.initialized()
    }

    /// Returns the initialized database handle, initializing on first use.
    ///
    /// Initialization opens the WAL-mode pool and applies the embedded
    /// migrations that define all four mirror tables. A failure is logged
    /// and returned; the caller's fault boundary decides what the
    /// operation degrades to. Initialization is best-effort by policy:
    /// nothing here aborts the process.
    pub async fn ensure_initialized(&self) -> DbResult<&Database> {
        if let Some(db) = self.db.get() {
            return Ok(db);
        }

        self.db
            .get_or_try_init(|| async {
                info!(
                    path = %self.config.database_path.display(),
                    "Bootstrapping local cache on first use"
                );

                match Database::new(self.config.clone()).await {
                    Ok(db) => Ok(db),
                    Err(err) => {
                        error!(error = %err, "Local cache initialization failed");
                        Err(err)
                    }
                }
            })
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_initialization_is_lazy_and_idempotent() {
        let manager = CacheManager::new(DbConfig::in_memory());
        assert!(!manager.is_initialized());

        let first = manager.ensure_initialized().await.unwrap().clone();
        assert!(manager.is_initialized());

        // Second call must reuse the same store, not rebuild it.
        let second = manager.ensure_initialized().await.unwrap();
        second
            .accounts()
            .upsert_all(&[caravan_core::Account {
                id: "acc-1".into(),
                company_name: "Acme".into(),
                is_lead: false,
            }])
            .await
            .unwrap();
        assert_eq!(first.accounts().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_initialization_reports_and_stays_uninitialized() {
        // A directory that cannot exist as a database file.
        let bad = DbConfig::new(PathBuf::from("/dev/null/nope/caravan.db"));
        let manager = CacheManager::new(bad);

        assert!(manager.ensure_initialized().await.is_err());
        assert!(!manager.is_initialized());
    }
}
