//! Account info handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use coinshop_core::AccountSnapshot;
use coinshop_store::Ledger;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Summary of the authenticated user's balance and activity.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    /// Current coin balance.
    pub coins: i64,
    /// Purchased items aggregated by name.
    pub inventory: Vec<InventoryItem>,
    /// Transfer history in both directions.
    #[serde(rename = "coinHistory")]
    pub coin_history: CoinHistory,
}

/// One purchased item with its total count.
#[derive(Debug, Serialize)]
pub struct InventoryItem {
    /// The item name.
    #[serde(rename = "type")]
    pub item: String,
    /// How many were bought.
    pub quantity: i64,
}

/// Received and sent transfers.
#[derive(Debug, Serialize)]
pub struct CoinHistory {
    /// Incoming transfers.
    pub received: Vec<ReceivedEntry>,
    /// Outgoing transfers.
    pub sent: Vec<SentEntry>,
}

/// One incoming transfer.
#[derive(Debug, Serialize)]
pub struct ReceivedEntry {
    /// The sender.
    #[serde(rename = "fromUser")]
    pub from_user: String,
    /// Received amount.
    pub amount: i64,
}

/// One outgoing transfer.
#[derive(Debug, Serialize)]
pub struct SentEntry {
    /// The recipient.
    #[serde(rename = "toUser")]
    pub to_user: String,
    /// Sent amount.
    pub amount: i64,
}

impl From<AccountSnapshot> for InfoResponse {
    fn from(snapshot: AccountSnapshot) -> Self {
        Self {
            coins: snapshot.balance,
            inventory: snapshot
                .inventory
                .into_iter()
                .map(|e| InventoryItem {
                    item: e.item,
                    quantity: e.quantity,
                })
                .collect(),
            coin_history: CoinHistory {
                received: snapshot
                    .received
                    .into_iter()
                    .map(|t| ReceivedEntry {
                        from_user: t.from_user,
                        amount: t.amount,
                    })
                    .collect(),
                sent: snapshot
                    .sent
                    .into_iter()
                    .map(|t| SentEntry {
                        to_user: t.to_user,
                        amount: t.amount,
                    })
                    .collect(),
            },
        }
    }
}

/// Get the authenticated user's balance, inventory, and coin history.
pub async fn info<L: Ledger>(
    State(state): State<Arc<AppState<L>>>,
    user: AuthUser,
) -> Result<Json<InfoResponse>, ApiError> {
    let snapshot = state.accounts.snapshot(&user.username).await?;
    Ok(Json(InfoResponse::from(snapshot)))
}
