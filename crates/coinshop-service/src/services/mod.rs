//! Business protocols over the ledger.
//!
//! Each protocol is a single call that opens one transaction scope, runs its
//! ledger operations, and completes the scope through
//! [`coinshop_store::exec::finish`]. The ledger handle is injected at
//! construction, never ambient, so tests can substitute an isolated store.

pub mod accounts;
pub mod shop;
pub mod transfer;

pub use accounts::AccountService;
pub use shop::ShopService;
pub use transfer::TransferService;
