//! Application state.

use std::sync::Arc;

use coinshop_store::Ledger;

use crate::config::ServiceConfig;
use crate::services::{AccountService, ShopService, TransferService};

/// Application state shared across handlers.
///
/// Generic over the ledger backend: the binary wires in `PgLedger`,
/// integration tests wire in `MemLedger`. The shared pool behind the ledger
/// handle is the only cross-request resource.
pub struct AppState<L: Ledger> {
    /// Service configuration.
    pub config: ServiceConfig,

    /// Authentication and account snapshots.
    pub accounts: AccountService<L>,

    /// Peer-to-peer transfers.
    pub transfers: TransferService<L>,

    /// Catalog purchases.
    pub shop: ShopService<L>,
}

impl<L: Ledger> AppState<L> {
    /// Wire the protocol services over one ledger handle.
    pub fn new(ledger: Arc<L>, config: ServiceConfig) -> Self {
        let accounts = AccountService::new(Arc::clone(&ledger), config.auth_secret.clone());
        let transfers = TransferService::new(Arc::clone(&ledger));
        let shop = ShopService::new(ledger);

        Self {
            config,
            accounts,
            transfers,
            shop,
        }
    }
}
