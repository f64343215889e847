//! In-memory ledger backend for tests.
//!
//! Mirrors the PostgreSQL backend's contract exactly: the debit is a
//! conditional check-and-update, credit to an unknown account fails, and a
//! scope is all-or-nothing. A [`MemScope`] holds the state mutex for its
//! whole lifetime, which serializes concurrent scopes the same way row locks
//! linearize conflicting database transactions, and keeps a snapshot so that
//! rollback (explicit or by drop) restores the pre-scope state.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use coinshop_core::{
    CatalogItem, InventoryEntry, LedgerError, PurchaseRecord, ReceivedTransfer, Result,
    SentTransfer, TransferRecord, INITIAL_BALANCE,
};

use crate::Ledger;

#[derive(Debug, Clone)]
struct AccountRow {
    password_hash: String,
    balance: i64,
}

#[derive(Debug, Clone, Default)]
struct MemState {
    accounts: HashMap<String, AccountRow>,
    items: BTreeMap<String, i64>,
    purchases: Vec<PurchaseRecord>,
    transfers: Vec<TransferRecord>,
}

/// In-memory ledger.
#[derive(Debug, Clone, Default)]
pub struct MemLedger {
    state: Arc<Mutex<MemState>>,
}

/// One open unit of work against a [`MemLedger`].
///
/// Owns the state lock until committed or dropped. Dropping without a commit
/// restores the snapshot taken at `begin`, matching the rollback-on-drop
/// behavior of a database transaction.
pub struct MemScope {
    guard: OwnedMutexGuard<MemState>,
    snapshot: Option<MemState>,
    committed: bool,
}

impl Drop for MemScope {
    fn drop(&mut self) {
        if !self.committed {
            if let Some(snapshot) = self.snapshot.take() {
                *self.guard = snapshot;
            }
        }
    }
}

impl MemLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to the catalog.
    ///
    /// Test seeding only; the ledger itself has no catalog mutation path.
    pub async fn insert_item(&self, item: &str, price: i64) {
        let mut state = self.state.lock().await;
        state.items.insert(item.to_string(), price);
    }
}

#[async_trait]
impl Ledger for MemLedger {
    type Scope = MemScope;

    async fn begin(&self) -> Result<MemScope> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let snapshot = Some(guard.clone());
        Ok(MemScope {
            guard,
            snapshot,
            committed: false,
        })
    }

    async fn commit(&self, mut scope: MemScope) -> Result<()> {
        scope.committed = true;
        Ok(())
    }

    async fn rollback(&self, scope: MemScope) -> Result<()> {
        drop(scope);
        Ok(())
    }

    async fn find_or_create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<String> {
        let mut state = self.state.lock().await;
        let row = state
            .accounts
            .entry(username.to_string())
            .or_insert_with(|| AccountRow {
                password_hash: password_hash.to_string(),
                balance: INITIAL_BALANCE,
            });
        Ok(row.password_hash.clone())
    }

    async fn balance(&self, scope: &mut MemScope, username: &str) -> Result<i64> {
        scope
            .guard
            .accounts
            .get(username)
            .map(|row| row.balance)
            .ok_or_else(|| LedgerError::account_not_found(username))
    }

    async fn debit(&self, scope: &mut MemScope, username: &str, amount: i64) -> Result<()> {
        match scope.guard.accounts.get_mut(username) {
            Some(row) if row.balance >= amount => {
                row.balance -= amount;
                Ok(())
            }
            // An unknown account and a short balance are the same failure,
            // as with the conditional update in the database backend.
            _ => Err(LedgerError::InsufficientFunds {
                username: username.to_string(),
                requested: amount,
            }),
        }
    }

    async fn credit(&self, scope: &mut MemScope, username: &str, amount: i64) -> Result<()> {
        match scope.guard.accounts.get_mut(username) {
            Some(row) => {
                row.balance += amount;
                Ok(())
            }
            None => Err(LedgerError::account_not_found(username)),
        }
    }

    async fn item(&self, scope: &mut MemScope, name: &str) -> Result<CatalogItem> {
        scope
            .guard
            .items
            .get(name)
            .map(|&price| CatalogItem {
                item: name.to_string(),
                price,
            })
            .ok_or_else(|| LedgerError::item_not_found(name))
    }

    async fn record_purchase(
        &self,
        scope: &mut MemScope,
        username: &str,
        item: &str,
        price: i64,
    ) -> Result<()> {
        scope.guard.purchases.push(PurchaseRecord {
            username: username.to_string(),
            item: item.to_string(),
            price_paid: price,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn record_transfer(
        &self,
        scope: &mut MemScope,
        from_user: &str,
        to_user: &str,
        amount: i64,
    ) -> Result<()> {
        scope.guard.transfers.push(TransferRecord {
            from_username: from_user.to_string(),
            to_username: to_user.to_string(),
            amount,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn purchases_by_item(
        &self,
        scope: &mut MemScope,
        username: &str,
    ) -> Result<Vec<InventoryEntry>> {
        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for purchase in scope
            .guard
            .purchases
            .iter()
            .filter(|p| p.username == username)
        {
            *counts.entry(purchase.item.as_str()).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(item, quantity)| InventoryEntry {
                item: item.to_string(),
                quantity,
            })
            .collect())
    }

    async fn received_transfers(
        &self,
        scope: &mut MemScope,
        username: &str,
    ) -> Result<Vec<ReceivedTransfer>> {
        Ok(scope
            .guard
            .transfers
            .iter()
            .filter(|t| t.to_username == username)
            .map(|t| ReceivedTransfer {
                from_user: t.from_username.clone(),
                amount: t.amount,
            })
            .collect())
    }

    async fn sent_transfers(
        &self,
        scope: &mut MemScope,
        username: &str,
    ) -> Result<Vec<SentTransfer>> {
        Ok(scope
            .guard
            .transfers
            .iter()
            .filter(|t| t.from_username == username)
            .map(|t| SentTransfer {
                to_user: t.to_username.clone(),
                amount: t.amount,
            })
            .collect())
    }
}
