//! # Product Repository
//!
//! Database operations for the products mirror table.
//!
//! Search is a case-insensitive substring match across name and
//! description. LIKE would need escaping for '%' and '_' in user input, so
//! the match uses instr() over lower()ed columns instead; products are
//! unique by id, so a term hitting both columns still yields one row.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use caravan_core::Product;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the products owned by a category, ordered by name ascending.
    pub async fn list_by_category(&self, category_id: &str) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, category_id, name, description
            FROM products
            WHERE category_id = ?1
            ORDER BY name ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists every product whose name matches exactly.
    ///
    /// Names are expected to be unique; the caller treats multiple matches
    /// as a consistency violation, so this returns all of them.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, category_id, name, description
            FROM products
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Searches products by case-insensitive substring match against
    /// name OR description, ordered by name ascending.
    pub async fn search(&self, term: &str) -> DbResult<Vec<Product>> {
        let term = term.trim().to_lowercase();

        debug!(term = %term, "Searching products");

        if term.is_empty() {
            return Ok(Vec::new());
        }

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, category_id, name, description
            FROM products
            WHERE instr(lower(name), ?1) > 0
               OR instr(lower(description), ?1) > 0
            ORDER BY name ASC
            "#,
        )
        .bind(&term)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Upserts a full pull result in a single transaction.
    pub async fn upsert_all(&self, products: &[Product]) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        for product in products {
            sqlx::query(
                r#"
                INSERT INTO products (id, category_id, name, description)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(id) DO UPDATE SET
                    category_id = excluded.category_id,
                    name = excluded.name,
                    description = excluded.description
                "#,
            )
            .bind(&product.id)
            .bind(&product.category_id)
            .bind(&product.name)
            .bind(&product.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(count = products.len(), "Product mirror refreshed");
        Ok(())
    }

    /// Counts cached products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
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
    use crate::repository::generate_id;

    fn product(category: &str, name: &str, description: &str) -> Product {
        Product {
            id: generate_id(),
            category_id: category.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
            .upsert_all(&[
                product("cat-1", "widget-9000", "flagship model"),
                product("cat-1", "sprocket", "pairs with any Widget"),
                product("cat-2", "gear", "plain steel gear"),
            ])
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let db = seeded().await;

        let products = db.products().list_by_category("cat-1").await.unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["sprocket", "widget-9000"]);
    }

    #[tokio::test]
    async fn test_search_matches_name_or_description_case_insensitive() {
        let db = seeded().await;

        // "widget-9000" by name, "sprocket" by description, "gear" by neither.
        let hits = db.products().search("WIDGET").await.unwrap();
        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["sprocket", "widget-9000"]);
    }

    #[tokio::test]
    async fn test_search_returns_no_duplicates_when_both_fields_match() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
            .upsert_all(&[product("cat-1", "Widget Pro", "the widget for pros")])
            .await
            .unwrap();

        let hits = db.products().search("widget").await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_search_blank_term_is_empty() {
        let db = seeded().await;
        assert!(db.products().search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_name_returns_all_exact_matches() {
        let db = seeded().await;
        db.products()
            .upsert_all(&[product("cat-2", "gear", "duplicate name")])
            .await
            .unwrap();

        assert_eq!(db.products().find_by_name("gear").await.unwrap().len(), 2);
        assert!(db.products().find_by_name("GEAR").await.unwrap().is_empty());
    }
}
