//! The peer-to-peer transfer protocol.

use std::sync::Arc;

use coinshop_core::LedgerError;
use coinshop_store::{exec, Ledger};

/// Moves coins between accounts, all-or-nothing.
#[derive(Debug, Clone)]
pub struct TransferService<L> {
    ledger: Arc<L>,
}

impl<L: Ledger> TransferService<L> {
    /// Create the service over a ledger handle.
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Transfer `amount` coins from `from_user` to `to_user`.
    ///
    /// Self-transfers are rejected before any scope is opened. Inside one
    /// scope: debit the sender, credit the recipient, record the transfer.
    /// Debit comes first so that a sender who cannot afford the amount
    /// causes no mutation at all; the record is written last, once the
    /// movement is fully determined. Any failure rolls the whole scope back,
    /// so a debited-but-not-credited state is never observable.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidRecipient`] when `to_user == from_user`.
    /// - [`LedgerError::InsufficientFunds`] when the sender cannot afford it.
    /// - [`LedgerError::NotFound`] when the recipient does not exist.
    pub async fn send(
        &self,
        from_user: &str,
        to_user: &str,
        amount: i64,
    ) -> Result<(), LedgerError> {
        if to_user == from_user {
            tracing::warn!(from_user, "sender matches recipient");
            return Err(LedgerError::InvalidRecipient {
                username: to_user.to_string(),
            });
        }

        let mut scope = self.ledger.begin().await?;
        let outcome = self
            .send_in_scope(&mut scope, from_user, to_user, amount)
            .await;
        let result = exec::finish(self.ledger.as_ref(), scope, outcome).await;

        match &result {
            Ok(()) => tracing::info!(from_user, to_user, amount, "coins sent"),
            Err(err) => tracing::warn!(from_user, to_user, amount, error = %err, "transfer failed"),
        }
        result
    }

    async fn send_in_scope(
        &self,
        scope: &mut L::Scope,
        from_user: &str,
        to_user: &str,
        amount: i64,
    ) -> Result<(), LedgerError> {
        self.ledger.debit(scope, from_user, amount).await?;
        self.ledger.credit(scope, to_user, amount).await?;
        self.ledger
            .record_transfer(scope, from_user, to_user, amount)
            .await
    }
}
