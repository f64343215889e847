//! Core types and utilities for coinshop.
//!
//! This crate provides the foundational types used throughout the coinshop
//! platform:
//!
//! - **Accounts**: the [`INITIAL_BALANCE`] grant and [`AccountSnapshot`],
//!   the consistent per-account view
//! - **Catalog**: [`CatalogItem`], a purchasable item with a fixed price
//! - **Records**: [`PurchaseRecord`] and [`TransferRecord`], the immutable
//!   rows that justify every balance change
//! - **Errors**: [`LedgerError`], the closed failure taxonomy of the ledger
//!
//! # Coins
//!
//! Balances and prices are whole coins stored as `i64`. There are no
//! fractional coins; an account balance is never negative.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod catalog;
pub mod error;
pub mod records;

pub use account::{AccountSnapshot, INITIAL_BALANCE};
pub use catalog::CatalogItem;
pub use error::{LedgerError, Result};
pub use records::{
    InventoryEntry, PurchaseRecord, ReceivedTransfer, SentTransfer, TransferRecord,
};
