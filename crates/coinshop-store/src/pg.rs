//! PostgreSQL ledger backend.
//!
//! All cross-request serialization happens in the database: the debit is a
//! single conditional `UPDATE`, the item lookup takes `FOR UPDATE`, and a
//! scope is one `sqlx` transaction holding one pooled connection for its
//! lifetime. Dropping an uncommitted [`PgScope`] rolls the transaction back.

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::{PgPool, Postgres, Transaction};

use coinshop_core::{
    CatalogItem, InventoryEntry, LedgerError, ReceivedTransfer, Result, SentTransfer,
};

use crate::{execution, Ledger};

/// Embedded schema migrations, run by the service at startup.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// PostgreSQL-backed ledger.
#[derive(Debug, Clone)]
pub struct PgLedger {
    pool: PgPool,
}

/// One open database transaction.
pub struct PgScope {
    tx: Transaction<'static, Postgres>,
}

impl PgLedger {
    /// Create a ledger over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Ledger for PgLedger {
    type Scope = PgScope;

    async fn begin(&self) -> Result<PgScope> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| execution("begin", e))?;
        Ok(PgScope { tx })
    }

    async fn commit(&self, scope: PgScope) -> Result<()> {
        scope.tx.commit().await.map_err(|e| execution("commit", e))
    }

    async fn rollback(&self, scope: PgScope) -> Result<()> {
        scope
            .tx
            .rollback()
            .await
            .map_err(|e| execution("rollback", e))
    }

    async fn find_or_create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<String> {
        // Single-statement upsert: the conditional insert no-ops on a
        // username conflict, so two concurrent first logins cannot create
        // two accounts. Balance comes from the column default.
        let created: Option<String> = sqlx::query_scalar(
            "INSERT INTO accounts (username, password_hash) VALUES ($1, $2) \
             ON CONFLICT (username) DO NOTHING RETURNING password_hash",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| execution("create account", e))?;

        if let Some(stored) = created {
            tracing::info!(username, "account created");
            return Ok(stored);
        }

        sqlx::query_scalar("SELECT password_hash FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| execution("read account", e))
    }

    async fn balance(&self, scope: &mut PgScope, username: &str) -> Result<i64> {
        sqlx::query_scalar("SELECT balance FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut *scope.tx)
            .await
            .map_err(|e| execution("get balance", e))?
            .ok_or_else(|| LedgerError::account_not_found(username))
    }

    async fn debit(&self, scope: &mut PgScope, username: &str, amount: i64) -> Result<()> {
        // Check-and-update in one statement; zero affected rows means the
        // balance was too low or the account is unknown.
        let result = sqlx::query(
            "UPDATE accounts SET balance = balance - $1 \
             WHERE username = $2 AND balance >= $1",
        )
        .bind(amount)
        .bind(username)
        .execute(&mut *scope.tx)
        .await
        .map_err(|e| execution("debit", e))?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::InsufficientFunds {
                username: username.to_string(),
                requested: amount,
            });
        }

        tracing::debug!(username, amount, "balance debited");
        Ok(())
    }

    async fn credit(&self, scope: &mut PgScope, username: &str, amount: i64) -> Result<()> {
        let result = sqlx::query("UPDATE accounts SET balance = balance + $1 WHERE username = $2")
            .bind(amount)
            .bind(username)
            .execute(&mut *scope.tx)
            .await
            .map_err(|e| execution("credit", e))?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::account_not_found(username));
        }

        tracing::debug!(username, amount, "balance credited");
        Ok(())
    }

    async fn item(&self, scope: &mut PgScope, name: &str) -> Result<CatalogItem> {
        let row: Option<(String, i64)> =
            sqlx::query_as("SELECT item, price FROM catalog_items WHERE item = $1 FOR UPDATE")
                .bind(name)
                .fetch_optional(&mut *scope.tx)
                .await
                .map_err(|e| execution("get item", e))?;

        row.map(|(item, price)| CatalogItem { item, price })
            .ok_or_else(|| LedgerError::item_not_found(name))
    }

    async fn record_purchase(
        &self,
        scope: &mut PgScope,
        username: &str,
        item: &str,
        price: i64,
    ) -> Result<()> {
        sqlx::query("INSERT INTO purchases (username, item, price_paid) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(item)
            .bind(price)
            .execute(&mut *scope.tx)
            .await
            .map_err(|e| execution("record purchase", e))?;

        tracing::debug!(username, item, price, "purchase recorded");
        Ok(())
    }

    async fn record_transfer(
        &self,
        scope: &mut PgScope,
        from_user: &str,
        to_user: &str,
        amount: i64,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO transfers (from_username, to_username, amount) VALUES ($1, $2, $3)",
        )
        .bind(from_user)
        .bind(to_user)
        .bind(amount)
        .execute(&mut *scope.tx)
        .await
        .map_err(|e| execution("record transfer", e))?;

        tracing::debug!(from_user, to_user, amount, "transfer recorded");
        Ok(())
    }

    async fn purchases_by_item(
        &self,
        scope: &mut PgScope,
        username: &str,
    ) -> Result<Vec<InventoryEntry>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT item, COUNT(*) FROM purchases WHERE username = $1 GROUP BY item",
        )
        .bind(username)
        .fetch_all(&mut *scope.tx)
        .await
        .map_err(|e| execution("list purchases", e))?;

        Ok(rows
            .into_iter()
            .map(|(item, quantity)| InventoryEntry { item, quantity })
            .collect())
    }

    async fn received_transfers(
        &self,
        scope: &mut PgScope,
        username: &str,
    ) -> Result<Vec<ReceivedTransfer>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT from_username, amount FROM transfers WHERE to_username = $1 ORDER BY id",
        )
        .bind(username)
        .fetch_all(&mut *scope.tx)
        .await
        .map_err(|e| execution("list received transfers", e))?;

        Ok(rows
            .into_iter()
            .map(|(from_user, amount)| ReceivedTransfer { from_user, amount })
            .collect())
    }

    async fn sent_transfers(
        &self,
        scope: &mut PgScope,
        username: &str,
    ) -> Result<Vec<SentTransfer>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT to_username, amount FROM transfers WHERE from_username = $1 ORDER BY id",
        )
        .bind(username)
        .fetch_all(&mut *scope.tx)
        .await
        .map_err(|e| execution("list sent transfers", e))?;

        Ok(rows
            .into_iter()
            .map(|(to_user, amount)| SentTransfer { to_user, amount })
            .collect())
    }
}
