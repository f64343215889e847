//! Immutable movement records and their query-time aggregates.
//!
//! One row is appended per purchase or transfer event. Rows are never updated
//! or deleted; repeated purchases of the same item produce repeated rows and
//! are aggregated at query time into [`InventoryEntry`] counts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One purchase event, immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// The buyer.
    pub username: String,

    /// The purchased item.
    pub item: String,

    /// The price paid at purchase time, in coins.
    pub price_paid: i64,

    /// When the purchase was committed.
    pub created_at: DateTime<Utc>,
}

/// One peer-to-peer coin movement, immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRecord {
    /// The sender.
    pub from_username: String,

    /// The recipient.
    pub to_username: String,

    /// Moved amount in coins, always positive.
    pub amount: i64,

    /// When the transfer was committed.
    pub created_at: DateTime<Utc>,
}

/// Purchases of one item aggregated by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// The item name.
    pub item: String,

    /// How many times the item was purchased.
    pub quantity: i64,
}

/// One incoming transfer as seen by the recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedTransfer {
    /// Who sent the coins.
    pub from_user: String,

    /// Received amount in coins.
    pub amount: i64,
}

/// One outgoing transfer as seen by the sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentTransfer {
    /// Who received the coins.
    pub to_user: String,

    /// Sent amount in coins.
    pub amount: i64,
}
