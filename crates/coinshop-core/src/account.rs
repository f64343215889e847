//! Account types for coinshop.
//!
//! The account row itself lives in the store backends; what crosses crate
//! boundaries is the username (a plain string owned by the caller), the
//! [`INITIAL_BALANCE`] grant, and the [`AccountSnapshot`] aggregate the
//! account query protocol assembles.

use serde::{Deserialize, Serialize};

use crate::records::{InventoryEntry, ReceivedTransfer, SentTransfer};

/// Balance granted to every account at creation, in coins.
///
/// Fixed at account creation and enforced as the column default in the
/// database schema; `MemLedger` applies the same value. Authentication never
/// mutates it afterwards.
pub const INITIAL_BALANCE: i64 = 1000;

/// A point-in-time view of one account.
///
/// Produced by the account query protocol inside a single transaction scope.
/// How consistent the four parts are with each other depends on the store
/// backend's transaction isolation; see the account query protocol for the
/// exact guarantee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Current coin balance.
    pub balance: i64,

    /// Purchased items aggregated by item name.
    pub inventory: Vec<InventoryEntry>,

    /// Transfers received by this account.
    pub received: Vec<ReceivedTransfer>,

    /// Transfers sent by this account.
    pub sent: Vec<SentTransfer>,
}
