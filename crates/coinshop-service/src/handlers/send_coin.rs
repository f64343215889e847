//! Coin transfer handler.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use coinshop_core::LedgerError;
use coinshop_store::Ledger;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::valid_username;
use crate::state::AppState;

/// Request body for a coin transfer.
#[derive(Debug, Deserialize)]
pub struct SendCoinRequest {
    /// Recipient username.
    #[serde(rename = "toUser")]
    pub to_user: String,
    /// Amount of coins to move.
    pub amount: i64,
}

/// Transfer coins from the authenticated user to another account.
pub async fn send_coin<L: Ledger>(
    State(state): State<Arc<AppState<L>>>,
    user: AuthUser,
    Json(body): Json<SendCoinRequest>,
) -> Result<StatusCode, ApiError> {
    if !valid_username(&body.to_user) {
        return Err(ApiError::BadRequest("invalid recipient username".into()));
    }
    if body.amount < 1 {
        return Err(ApiError::BadRequest(
            "amount must be a positive integer".into(),
        ));
    }

    match state
        .transfers
        .send(&user.username, &body.to_user, body.amount)
        .await
    {
        Ok(()) => Ok(StatusCode::OK),
        // An unknown recipient is the caller's mistake, not a missing
        // resource on our side.
        Err(LedgerError::NotFound { entity, .. }) if entity == "account" => {
            Err(ApiError::InvalidRecipient)
        }
        Err(err) => Err(err.into()),
    }
}
