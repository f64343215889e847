//! Authentication and the account query protocol.

use std::sync::Arc;

use coinshop_core::{AccountSnapshot, LedgerError};
use coinshop_store::{exec, Ledger};

use crate::crypto;
use crate::error::ApiError;

/// Account authentication and consistent account snapshots.
#[derive(Debug, Clone)]
pub struct AccountService<L> {
    ledger: Arc<L>,
    auth_secret: String,
}

impl<L: Ledger> AccountService<L> {
    /// Create the service over a ledger handle.
    pub fn new(ledger: Arc<L>, auth_secret: impl Into<String>) -> Self {
        Self {
            ledger,
            auth_secret: auth_secret.into(),
        }
    }

    /// Authenticate a user, creating the account on first login.
    ///
    /// The account upsert is a single atomic statement outside any scope;
    /// a freshly created account stores the supplied credential material and
    /// the comparison below trivially succeeds. For an existing account the
    /// stored material must match.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let hash = crypto::hmac_sha256_hex(&self.auth_secret, password);
        let stored = self
            .ledger
            .find_or_create_account(username, &hash)
            .await
            .map_err(ApiError::from)?;

        if !crypto::constant_time_eq(&stored, &hash) {
            tracing::warn!(username, "incorrect password");
            return Err(ApiError::Unauthorized);
        }

        Ok(())
    }

    /// Assemble balance, inventory, and transfer history inside one scope.
    ///
    /// Consistency follows the backend's transaction isolation. The
    /// in-memory backend holds the state lock for the whole scope, so all
    /// four reads see one state. PostgreSQL runs the scope at its default
    /// READ COMMITTED level, where each statement sees the latest committed
    /// state: a transfer committing mid-snapshot can show up in the history
    /// reads without being reflected in the balance read before it. Records
    /// are append-only and accounts are never deleted, so the skew is
    /// bounded to that.
    pub async fn snapshot(&self, username: &str) -> Result<AccountSnapshot, LedgerError> {
        let mut scope = self.ledger.begin().await?;
        let outcome = self.snapshot_in_scope(&mut scope, username).await;
        exec::finish(self.ledger.as_ref(), scope, outcome).await
    }

    async fn snapshot_in_scope(
        &self,
        scope: &mut L::Scope,
        username: &str,
    ) -> Result<AccountSnapshot, LedgerError> {
        let balance = self.ledger.balance(scope, username).await?;
        let inventory = self.ledger.purchases_by_item(scope, username).await?;
        let received = self.ledger.received_transfers(scope, username).await?;
        let sent = self.ledger.sent_transfers(scope, username).await?;

        Ok(AccountSnapshot {
            balance,
            inventory,
            received,
            sent,
        })
    }
}
