//! Catalog types for coinshop.

use serde::{Deserialize, Serialize};

/// A purchasable item with a fixed price.
///
/// The catalog is read-only from the ledger's perspective: no create, update,
/// or delete path exists. Lookups still take a row lock so that a future
/// price-mutation path cannot race a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique item name.
    pub item: String,

    /// Price in whole coins, `price >= 0`.
    pub price: i64,
}
