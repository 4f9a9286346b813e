//! # Category Repository
//!
//! Database operations for the categories mirror table.
//!
//! Categories form a tree: one root row with a NULL parent, every other
//! row naming its parent. The repository only answers structural queries
//! (roots, children, by-id); enforcing the single-root invariant is the
//! client layer's job, because a violated invariant is a consistency
//! error, not a query failure.
//!
//! The mirror is read-only from the caller's perspective; the only write
//! is the sync upsert.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use caravan_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists every category with a NULL parent, ordered by sequence.
    ///
    /// A consistent catalog has exactly one such row; callers decide what
    /// zero or many means.
    pub async fn roots(&self) -> DbResult<Vec<Category>> {
        let roots = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, parent_id, name, sequence, has_sub_categories
            FROM categories
            WHERE parent_id IS NULL
            ORDER BY sequence ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(roots)
    }

    /// Lists the immediate children of a category, ordered by sequence ascending.
    pub async fn children_of(&self, parent_id: &str) -> DbResult<Vec<Category>> {
        let children = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, parent_id, name, sequence, has_sub_categories
            FROM categories
            WHERE parent_id = ?1
            ORDER BY sequence ASC
            "#,
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(children)
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, parent_id, name, sequence, has_sub_categories
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Upserts a full pull result in a single transaction.
    pub async fn upsert_all(&self, categories: &[Category]) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        for category in categories {
            sqlx::query(
                r#"
                INSERT INTO categories (id, parent_id, name, sequence, has_sub_categories)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(id) DO UPDATE SET
                    parent_id = excluded.parent_id,
                    name = excluded.name,
                    sequence = excluded.sequence,
                    has_sub_categories = excluded.has_sub_categories
                "#,
            )
            .bind(&category.id)
            .bind(&category.parent_id)
            .bind(&category.name)
            .bind(category.sequence)
            .bind(category.has_sub_categories)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(count = categories.len(), "Category mirror refreshed");
        Ok(())
    }

    /// Counts cached categories (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn category(id: &str, parent: Option<&str>, seq: i64, branches: bool) -> Category {
        Category {
            id: id.to_string(),
            parent_id: parent.map(str::to_string),
            name: id.to_uppercase(),
            sequence: seq,
            has_sub_categories: branches,
        }
    }

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.categories()
            .upsert_all(&[
                category("root", None, 0, true),
                category("drinks", Some("root"), 2, false),
                category("tools", Some("root"), 1, true),
                category("hammers", Some("tools"), 1, false),
            ])
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_roots_returns_null_parent_rows() {
        let db = seeded().await;

        let roots = db.categories().roots().await.unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id, "root");
        assert!(roots[0].is_root());
    }

    #[tokio::test]
    async fn test_children_ordered_by_sequence() {
        let db = seeded().await;

        let children = db.categories().children_of("root").await.unwrap();
        let ids: Vec<&str> = children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["tools", "drinks"]);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = seeded().await;

        let hammers = db.categories().get_by_id("hammers").await.unwrap().unwrap();
        assert_eq!(hammers.parent_id.as_deref(), Some("tools"));
        assert!(hammers.is_leaf());

        assert!(db.categories().get_by_id("missing").await.unwrap().is_none());
    }
}
