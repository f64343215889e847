//! Authentication handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use coinshop_store::Ledger;

use crate::auth::issue_token;
use crate::error::ApiError;
use crate::handlers::valid_username;
use crate::state::AppState;

/// Authentication request.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    /// Username; the account is created on first login.
    pub username: String,
    /// Plaintext password, 8-72 characters.
    pub password: String,
}

/// Authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
}

/// Authenticate a user, creating the account on first login, and issue a
/// token.
pub async fn auth<L: Ledger>(
    State(state): State<Arc<AppState<L>>>,
    Json(body): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if !valid_username(&body.username) {
        return Err(ApiError::BadRequest("invalid username".into()));
    }
    if body.password.len() < 8 || body.password.len() > 72 {
        return Err(ApiError::BadRequest(
            "password must be 8-72 characters".into(),
        ));
    }

    state
        .accounts
        .authenticate(&body.username, &body.password)
        .await?;

    let token = issue_token(
        &state.config.auth_secret,
        &body.username,
        state.config.token_ttl_seconds,
    )?;

    tracing::info!(username = %body.username, "user authenticated");

    Ok(Json(AuthResponse { token }))
}
