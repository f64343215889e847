//! Coinshop HTTP API service.
//!
//! This crate provides the HTTP surface over the ledger core:
//!
//! - Authentication (account auto-creation on first login, JWT issuance)
//! - Account info: balance, inventory, and coin history
//! - Peer-to-peer coin transfers
//! - Catalog purchases
//!
//! The ledger itself lives in `coinshop-store`; every handler delegates to a
//! protocol service that runs its operations inside one transaction scope.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Axum handlers all return Result, documenting every error variant per
// handler adds nothing over the ApiError docs.
#![allow(clippy::missing_errors_doc)]

pub mod auth;
pub mod config;
pub mod crypto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
