//! # Client Assembly
//!
//! Wires the components into one handle: a shared cache manager, the sync
//! coordinator, the data service, and the catalog resolver, all reporting
//! to a single telemetry sink.
//!
//! The remote source is a required constructor argument - never a
//! process-wide singleton - so tests and alternative transports plug in
//! without touching the core.

use std::sync::Arc;

use caravan_db::DbConfig;

use crate::cache::CacheManager;
use crate::catalog::CatalogResolver;
use crate::config::ClientConfig;
use crate::remote::RemoteSource;
use crate::service::DataService;
use crate::sync::SyncCoordinator;
use crate::telemetry::{TelemetrySink, TracingTelemetry};

// =============================================================================
// Client
// =============================================================================

/// The assembled local-first data client.
pub struct Client {
    cache: Arc<CacheManager>,
    sync: SyncCoordinator,
    data: DataService,
    catalog: CatalogResolver,
}

impl Client {
    /// The sync coordinator (pull-only refresh of the mirror tables).
    pub fn sync(&self) -> &SyncCoordinator {
        &self.sync
    }

    /// The query facade over the cached tables.
    pub fn data(&self) -> &DataService {
        &self.data
    }

    /// The catalog hierarchy resolver.
    pub fn catalog(&self) -> &CatalogResolver {
        &self.catalog
    }

    /// The cache manager (initialization state and handle access).
    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`Client`].
///
/// ## Example
/// ```rust,ignore
/// let client = ClientBuilder::new(Arc::new(HttpRemote::new(base_url)))
///     .with_config(&ClientConfig::load_or_default(None))
///     .build();
/// ```
pub struct ClientBuilder {
    remote: Arc<dyn RemoteSource>,
    db_config: Option<DbConfig>,
    telemetry: Option<Arc<dyn TelemetrySink>>,
}

impl ClientBuilder {
    /// Creates a builder around the injected remote source.
    pub fn new(remote: Arc<dyn RemoteSource>) -> Self {
        ClientBuilder {
            remote,
            db_config: None,
            telemetry: None,
        }
    }

    /// Sets the database configuration directly.
    pub fn with_db_config(mut self, config: DbConfig) -> Self {
        self.db_config = Some(config);
        self
    }

    /// Derives the database configuration from a client config.
    pub fn with_config(mut self, config: &ClientConfig) -> Self {
        self.db_config = Some(config.db_config());
        self
    }

    /// Sets the telemetry sink. Defaults to [`TracingTelemetry`].
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Builds the client. No I/O happens until the first operation.
    pub fn build(self) -> Client {
        let telemetry = self
            .telemetry
            .unwrap_or_else(|| Arc::new(TracingTelemetry));
        let db_config = self
            .db_config
            .unwrap_or_else(|| ClientConfig::default().db_config());

        let cache = Arc::new(CacheManager::new(db_config));
        let sync = SyncCoordinator::new(cache.clone(), self.remote, telemetry.clone());
        let data = DataService::new(cache.clone(), telemetry);
        let catalog = CatalogResolver::new(data.clone());

        Client {
            cache,
            sync,
            data,
            catalog,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
