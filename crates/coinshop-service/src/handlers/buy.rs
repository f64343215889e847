//! Item purchase handler.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;

use coinshop_store::Ledger;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Buy one unit of a catalog item for the authenticated user.
pub async fn buy<L: Ledger>(
    State(state): State<Arc<AppState<L>>>,
    user: AuthUser,
    Path(item): Path<String>,
) -> Result<StatusCode, ApiError> {
    if item.is_empty() {
        return Err(ApiError::BadRequest("item name must not be empty".into()));
    }
    state.shop.buy(&item, &user.username).await?;
    Ok(StatusCode::OK)
}
