//! Shared test fixtures: a programmable in-memory remote source, a
//! recording telemetry spy, and entity constructors.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use caravan_core::{Account, Category, Order, Product};
use caravan_db::DbConfig;

use crate::client::{Client, ClientBuilder};
use crate::error::ClientError;
use crate::remote::{RemoteError, RemoteResult, RemoteSource};
use crate::telemetry::{Severity, TelemetrySink};

// =============================================================================
// Recording Telemetry
// =============================================================================

/// Telemetry spy collecting every timing and error report.
#[derive(Default)]
pub(crate) struct RecordingTelemetry {
    timings: Mutex<Vec<String>>,
    errors: Mutex<Vec<(String, String)>>,
}

impl RecordingTelemetry {
    /// Operation names of recorded timings, in completion order.
    pub fn timings(&self) -> Vec<String> {
        self.timings.lock().unwrap().clone()
    }

    /// (operation, error message) pairs of reported errors.
    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().unwrap().clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn record_timing(&self, operation: &str, _elapsed: Duration) {
        self.timings.lock().unwrap().push(operation.to_string());
    }

    fn report_error(&self, operation: &str, error: &ClientError, _severity: Severity) {
        self.errors
            .lock()
            .unwrap()
            .push((operation.to_string(), error.to_string()));
    }
}

// =============================================================================
// Fixture Remote
// =============================================================================

/// In-memory remote source with per-table data and failure switches.
#[derive(Default)]
pub(crate) struct FixtureRemote {
    pub accounts: Mutex<Vec<Account>>,
    pub orders: Mutex<Vec<Order>>,
    pub categories: Mutex<Vec<Category>>,
    pub products: Mutex<Vec<Product>>,
    /// When set, every pull is rejected by the "service".
    pub fail_all: AtomicBool,
    /// When set, only the product pull fails (with a network error).
    pub fail_products: AtomicBool,
}

impl FixtureRemote {
    pub fn failing_all(&self) -> bool {
        self.fail_all.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteSource for FixtureRemote {
    async fn pull_accounts(&self) -> RemoteResult<Vec<Account>> {
        if self.failing_all() {
            return Err(RemoteError::Rejected {
                operation: "pull_accounts".into(),
                message: "fixture failure".into(),
            });
        }
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn pull_orders(&self) -> RemoteResult<Vec<Order>> {
        if self.failing_all() {
            return Err(RemoteError::Rejected {
                operation: "pull_orders".into(),
                message: "fixture failure".into(),
            });
        }
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn pull_categories(&self) -> RemoteResult<Vec<Category>> {
        if self.failing_all() {
            return Err(RemoteError::Rejected {
                operation: "pull_categories".into(),
                message: "fixture failure".into(),
            });
        }
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn pull_products(&self) -> RemoteResult<Vec<Product>> {
        if self.failing_all() || self.fail_products.load(Ordering::SeqCst) {
            return Err(RemoteError::Network("fixture network failure".into()));
        }
        Ok(self.products.lock().unwrap().clone())
    }
}

// =============================================================================
// Entity Constructors
// =============================================================================

pub(crate) fn account(id: &str, name: &str, lead: bool) -> Account {
    Account {
        id: id.to_string(),
        company_name: name.to_string(),
        is_lead: lead,
    }
}

pub(crate) fn category(id: &str, parent: Option<&str>, seq: i64, branches: bool) -> Category {
    Category {
        id: id.to_string(),
        parent_id: parent.map(str::to_string),
        name: id.to_uppercase(),
        sequence: seq,
        has_sub_categories: branches,
    }
}

pub(crate) fn product(id: &str, category_id: &str, name: &str, description: &str) -> Product {
    Product {
        id: id.to_string(),
        category_id: category_id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

// =============================================================================
// Client Assembly
// =============================================================================

/// Builds a full client stack over an in-memory database, returning the
/// telemetry spy alongside it.
pub(crate) fn client_with(remote: Arc<FixtureRemote>) -> (Client, Arc<RecordingTelemetry>) {
    let telemetry = Arc::new(RecordingTelemetry::default());
    let client = ClientBuilder::new(remote)
        .with_db_config(DbConfig::in_memory())
        .with_telemetry(telemetry.clone())
        .build();
    (client, telemetry)
}

/// A remote preloaded with the canonical catalog scenario:
/// root R has children A (seq=1, branches) and B (seq=2, leaf);
/// A has child leaf L; product p1 under L, p2 under B.
pub(crate) fn scenario_remote() -> Arc<FixtureRemote> {
    let remote = FixtureRemote::default();
    *remote.categories.lock().unwrap() = vec![
        category("R", None, 0, true),
        category("A", Some("R"), 1, true),
        category("B", Some("R"), 2, false),
        category("L", Some("A"), 1, false),
    ];
    *remote.products.lock().unwrap() = vec![
        product("p1", "L", "widget-9000", "flagship widget"),
        product("p2", "B", "sprocket", "plain sprocket"),
    ];
    Arc::new(remote)
}
