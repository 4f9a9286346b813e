//! # Account Repository
//!
//! Database operations for the accounts mirror table.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use caravan_core::Account;

/// Repository for account database operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Creates a new AccountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AccountRepository { pool }
    }

    /// Lists accounts filtered by lead flag, ordered by company name ascending.
    ///
    /// ## Arguments
    /// * `leads` - true for leads, false for converted customer accounts
    pub async fn list(&self, leads: bool) -> DbResult<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, company_name, is_lead
            FROM accounts
            WHERE is_lead = ?1
            ORDER BY company_name ASC
            "#,
        )
        .bind(leads)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    /// Gets an account by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, company_name, is_lead
            FROM accounts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Inserts a new account. The id must be generated beforehand.
    pub async fn insert(&self, account: &Account) -> DbResult<()> {
        debug!(id = %account.id, "Inserting account");

        sqlx::query(
            r#"
            INSERT INTO accounts (id, company_name, is_lead)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&account.id)
        .bind(&account.company_name)
        .bind(account.is_lead)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing account.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Account doesn't exist
    pub async fn update(&self, account: &Account) -> DbResult<()> {
        debug!(id = %account.id, "Updating account");

        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                company_name = ?2,
                is_lead = ?3
            WHERE id = ?1
            "#,
        )
        .bind(&account.id)
        .bind(&account.company_name)
        .bind(account.is_lead)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Account", &account.id));
        }

        Ok(())
    }

    /// Deletes an account by id.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting account");

        let result = sqlx::query("DELETE FROM accounts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Account", id));
        }

        Ok(())
    }

    /// Upserts a full pull result in a single transaction.
    ///
    /// Existing rows are overwritten by id, new rows inserted; rows absent
    /// from `accounts` are left untouched (the sync path never deletes).
    /// On any failure the transaction rolls back and the previous cache
    /// state survives intact.
    pub async fn upsert_all(&self, accounts: &[Account]) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        for account in accounts {
            sqlx::query(
                r#"
                INSERT INTO accounts (id, company_name, is_lead)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(id) DO UPDATE SET
                    company_name = excluded.company_name,
                    is_lead = excluded.is_lead
                "#,
            )
            .bind(&account.id)
            .bind(&account.company_name)
            .bind(account.is_lead)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(count = accounts.len(), "Account mirror refreshed");
        Ok(())
    }

    /// Counts cached accounts (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
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

    fn account(name: &str, lead: bool) -> Account {
        Account {
            id: generate_id(),
            company_name: name.to_string(),
            is_lead: lead,
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_lead_and_orders_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.accounts();

        repo.insert(&account("Zenith Corp", false)).await.unwrap();
        repo.insert(&account("Acme Ltd", false)).await.unwrap();
        repo.insert(&account("Maybe Inc", true)).await.unwrap();

        let customers = repo.list(false).await.unwrap();
        let names: Vec<&str> = customers.iter().map(|a| a.company_name.as_str()).collect();
        assert_eq!(names, ["Acme Ltd", "Zenith Corp"]);

        let leads = repo.list(true).await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].company_name, "Maybe Inc");
    }

    #[tokio::test]
    async fn test_update_missing_account_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.accounts();

        let ghost = account("Ghost GmbH", false);
        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_upsert_all_overwrites_by_id_and_keeps_others() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.accounts();

        let local = account("Local Only", false);
        repo.insert(&local).await.unwrap();

        let mut pulled = account("Pulled Corp", false);
        repo.upsert_all(std::slice::from_ref(&pulled)).await.unwrap();

        pulled.company_name = "Pulled Corp (renamed)".to_string();
        repo.upsert_all(std::slice::from_ref(&pulled)).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        let fetched = repo.get_by_id(&pulled.id).await.unwrap().unwrap();
        assert_eq!(fetched.company_name, "Pulled Corp (renamed)");
        assert!(repo.get_by_id(&local.id).await.unwrap().is_some());
    }
}
