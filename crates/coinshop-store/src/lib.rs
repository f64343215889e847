//! Storage layer for coinshop.
//!
//! This crate owns the durable ledger state: account balances, the item
//! catalog, and the append-only purchase/transfer records. All invariant
//! enforcement that must be atomic with data visibility lives here, most
//! importantly the non-negative-balance check, which is a single conditional
//! update rather than a read-then-write.
//!
//! # Transaction scopes
//!
//! Every mutating operation runs against a caller-supplied scope: one
//! atomic, all-or-nothing unit of work obtained from [`Ledger::begin`].
//! Scopes do not nest; a business operation opens exactly one scope and
//! releases it through [`exec::finish`]. Dropping an uncommitted scope rolls
//! it back, so cancellation can never leave partial effects behind.
//!
//! # Backends
//!
//! - [`PgLedger`]: PostgreSQL via sqlx. Cross-request serialization for a
//!   given account is delegated to the database's row locks; the ledger
//!   itself holds no in-process locks.
//! - [`MemLedger`]: in-memory, for tests. A scope holds the state lock for
//!   its lifetime, which serializes scopes the way row locks linearize
//!   conflicting transactions.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod exec;
pub mod mem;
pub mod pg;

pub use mem::{MemLedger, MemScope};
pub use pg::{PgLedger, PgScope, MIGRATOR};

use async_trait::async_trait;
use coinshop_core::{
    CatalogItem, InventoryEntry, LedgerError, ReceivedTransfer, Result, SentTransfer,
};

/// The ledger store contract.
///
/// All operations except [`Ledger::find_or_create_account`] take a scope and
/// only become visible when that scope commits. Operations may block waiting
/// for a lock held by a concurrent scope on the same account or item row;
/// callers must tolerate that latency.
#[async_trait]
pub trait Ledger: Send + Sync + 'static {
    /// One atomic unit of work against this backend.
    type Scope: Send;

    /// Open a new transaction scope.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Execution`] if a connection cannot be checked
    /// out or the transaction cannot be started.
    async fn begin(&self) -> Result<Self::Scope>;

    /// Commit a scope, making all of its operations visible at once.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Execution`] if the commit fails; the unit of
    /// work is then considered not applied.
    async fn commit(&self, scope: Self::Scope) -> Result<()>;

    /// Roll back a scope, discarding all of its operations.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Execution`] if the rollback itself fails.
    async fn rollback(&self, scope: Self::Scope) -> Result<()>;

    /// Create the account if the username is free, otherwise leave it alone;
    /// return the credential material now stored for it.
    ///
    /// Runs outside any scope: the upsert must itself be atomic against a
    /// duplicate-username race, which a single conditional insert guarantees
    /// without a surrounding transaction. A freshly created account starts
    /// with the initial balance and echoes back the supplied material.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Execution`] on storage failure.
    async fn find_or_create_account(&self, username: &str, password_hash: &str)
        -> Result<String>;

    /// Read the current balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the account does not exist.
    async fn balance(&self, scope: &mut Self::Scope, username: &str) -> Result<i64>;

    /// Atomically decrement the balance by `amount`, only if the result
    /// stays non-negative.
    ///
    /// The check and the update are a single operation; two concurrent
    /// debits can never both pass the check and jointly overdraw.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] when the conditional
    /// update affects no row, either because the balance is too low or the account does
    /// not exist.
    async fn debit(&self, scope: &mut Self::Scope, username: &str, amount: i64) -> Result<()>;

    /// Atomically increment the balance by `amount`. No upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the account does not exist.
    async fn credit(&self, scope: &mut Self::Scope, username: &str, amount: i64) -> Result<()>;

    /// Locking read of a catalog item. The row lock is held until the scope
    /// ends, so a price change cannot be observed inconsistently between
    /// lookup and debit.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the item does not exist.
    async fn item(&self, scope: &mut Self::Scope, name: &str) -> Result<CatalogItem>;

    /// Append an immutable purchase record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Execution`] on storage failure.
    async fn record_purchase(
        &self,
        scope: &mut Self::Scope,
        username: &str,
        item: &str,
        price: i64,
    ) -> Result<()>;

    /// Append an immutable transfer record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Execution`] on storage failure.
    async fn record_transfer(
        &self,
        scope: &mut Self::Scope,
        from_user: &str,
        to_user: &str,
        amount: i64,
    ) -> Result<()>;

    /// Purchase records for the user aggregated by item: one entry per
    /// distinct item with its total count. Grouped, not insertion-ordered.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Execution`] on storage failure.
    async fn purchases_by_item(
        &self,
        scope: &mut Self::Scope,
        username: &str,
    ) -> Result<Vec<InventoryEntry>>;

    /// Transfers received by the user, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Execution`] on storage failure.
    async fn received_transfers(
        &self,
        scope: &mut Self::Scope,
        username: &str,
    ) -> Result<Vec<ReceivedTransfer>>;

    /// Transfers sent by the user, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Execution`] on storage failure.
    async fn sent_transfers(
        &self,
        scope: &mut Self::Scope,
        username: &str,
    ) -> Result<Vec<SentTransfer>>;
}

/// Map a storage-level failure into the opaque execution variant.
pub(crate) fn execution(operation: &str, err: impl std::fmt::Display) -> LedgerError {
    LedgerError::Execution(format!("{operation}: {err}"))
}
