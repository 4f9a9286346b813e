//! # Order Repository
//!
//! Database operations for the orders mirror table.
//!
//! Open and closed orders are read through separate queries because they
//! sort differently: open orders by the soonest due date, closed orders by
//! the most recent close.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use caravan_core::Order;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Lists open orders for an account, ordered by due date ascending.
    pub async fn open_for_account(&self, account_id: &str) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, account_id, is_open, due_date, closed_at
            FROM orders
            WHERE account_id = ?1 AND is_open = 1
            ORDER BY due_date ASC
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Lists closed orders for an account, ordered by closed date descending.
    pub async fn closed_for_account(&self, account_id: &str) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, account_id, is_open, due_date, closed_at
            FROM orders
            WHERE account_id = ?1 AND is_open = 0
            ORDER BY closed_at DESC
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Lists every cached order, unfiltered.
    pub async fn list_all(&self) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, account_id, is_open, due_date, closed_at FROM orders",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Gets an order by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, account_id, is_open, due_date, closed_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Inserts a new order. The id must be generated beforehand.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        debug!(id = %order.id, account_id = %order.account_id, "Inserting order");

        sqlx::query(
            r#"
            INSERT INTO orders (id, account_id, is_open, due_date, closed_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&order.id)
        .bind(&order.account_id)
        .bind(order.is_open)
        .bind(order.due_date)
        .bind(order.closed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing order.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Order doesn't exist
    pub async fn update(&self, order: &Order) -> DbResult<()> {
        debug!(id = %order.id, "Updating order");

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                account_id = ?2,
                is_open = ?3,
                due_date = ?4,
                closed_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&order.id)
        .bind(&order.account_id)
        .bind(order.is_open)
        .bind(order.due_date)
        .bind(order.closed_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", &order.id));
        }

        Ok(())
    }

    /// Deletes an order by id.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Upserts a full pull result in a single transaction.
    ///
    /// Same contract as the other mirrors: overwrite by id, never delete,
    /// roll back wholesale on failure.
    pub async fn upsert_all(&self, orders: &[Order]) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        for order in orders {
            sqlx::query(
                r#"
                INSERT INTO orders (id, account_id, is_open, due_date, closed_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(id) DO UPDATE SET
                    account_id = excluded.account_id,
                    is_open = excluded.is_open,
                    due_date = excluded.due_date,
                    closed_at = excluded.closed_at
                "#,
            )
            .bind(&order.id)
            .bind(&order.account_id)
            .bind(order.is_open)
            .bind(order.due_date)
            .bind(order.closed_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(count = orders.len(), "Order mirror refreshed");
        Ok(())
    }

    /// Counts cached orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
