//! The catalog purchase protocol.

use std::sync::Arc;

use coinshop_core::LedgerError;
use coinshop_store::{exec, Ledger};

/// Buys catalog items against an account balance.
#[derive(Debug, Clone)]
pub struct ShopService<L> {
    ledger: Arc<L>,
}

impl<L: Ledger> ShopService<L> {
    /// Create the service over a ledger handle.
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Purchase one `item` for `username` at the catalog price.
    ///
    /// The locking item lookup, the debit, and the purchase record all run
    /// in the same scope, so the price observed at lookup is the price
    /// debited even if a price-mutation path is ever added.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] when the item does not exist; nothing is
    ///   debited and no record is written.
    /// - [`LedgerError::InsufficientFunds`] when the buyer cannot afford it;
    ///   the scope rolls back without a record.
    pub async fn buy(&self, item: &str, username: &str) -> Result<(), LedgerError> {
        let mut scope = self.ledger.begin().await?;
        let outcome = self.buy_in_scope(&mut scope, item, username).await;
        let result = exec::finish(self.ledger.as_ref(), scope, outcome).await;

        match &result {
            Ok(()) => tracing::info!(username, item, "purchase completed"),
            Err(err) => tracing::warn!(username, item, error = %err, "purchase failed"),
        }
        result
    }

    async fn buy_in_scope(
        &self,
        scope: &mut L::Scope,
        item: &str,
        username: &str,
    ) -> Result<(), LedgerError> {
        let product = self.ledger.item(scope, item).await?;
        self.ledger.debit(scope, username, product.price).await?;
        self.ledger
            .record_purchase(scope, username, &product.item, product.price)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinshop_store::MemLedger;

    async fn balance_of(ledger: &MemLedger, username: &str) -> i64 {
        let mut scope = ledger.begin().await.unwrap();
        let balance = ledger.balance(&mut scope, username).await.unwrap();
        ledger.rollback(scope).await.unwrap();
        balance
    }

    async fn harness() -> (MemLedger, ShopService<MemLedger>) {
        let ledger = MemLedger::new();
        ledger.find_or_create_account("alice", "h").await.unwrap();
        ledger.insert_item("hat", 30).await;
        let service = ShopService::new(Arc::new(ledger.clone()));
        (ledger, service)
    }

    #[tokio::test]
    async fn purchase_debits_price_and_records_once() {
        let (ledger, service) = harness().await;

        // Fix the balance at 100 for the scenario.
        let mut scope = ledger.begin().await.unwrap();
        let over = ledger.balance(&mut scope, "alice").await.unwrap() - 100;
        ledger.debit(&mut scope, "alice", over).await.unwrap();
        ledger.commit(scope).await.unwrap();

        service.buy("hat", "alice").await.unwrap();

        assert_eq!(balance_of(&ledger, "alice").await, 70);

        let mut scope = ledger.begin().await.unwrap();
        let inventory = ledger.purchases_by_item(&mut scope, "alice").await.unwrap();
        ledger.rollback(scope).await.unwrap();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory[0].item, "hat");
        assert_eq!(inventory[0].quantity, 1);
    }

    #[tokio::test]
    async fn unknown_item_fails_without_mutation() {
        let (ledger, service) = harness().await;
        let before = balance_of(&ledger, "alice").await;

        let err = service.buy("crown", "alice").await.unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { entity: "item", .. }));
        assert_eq!(balance_of(&ledger, "alice").await, before);
    }

    #[tokio::test]
    async fn unaffordable_item_writes_no_record() {
        let (ledger, service) = harness().await;
        ledger.insert_item("yacht", 1_000_000).await;

        let err = service.buy("yacht", "alice").await.unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));

        let mut scope = ledger.begin().await.unwrap();
        let inventory = ledger.purchases_by_item(&mut scope, "alice").await.unwrap();
        ledger.rollback(scope).await.unwrap();
        assert!(inventory.is_empty());
    }
}
