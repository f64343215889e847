//! Error types for coinshop.

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur in ledger operations.
///
/// This is a closed taxonomy: every failure a store backend or protocol can
/// produce is one of these variants, and callers match on the variant rather
/// than inspecting messages. Errors propagate unchanged through the
/// transaction scope executor; rollback never rewrites them.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A referenced account or catalog item does not exist.
    #[error("{entity} not found: {name}")]
    NotFound {
        /// The kind of record that was missing ("account" or "item").
        entity: &'static str,
        /// The key that was looked up.
        name: String,
    },

    /// A debit would take the balance below zero.
    ///
    /// Also returned when debiting an account that does not exist: the
    /// conditional update affects no row in either case, and the two are
    /// indistinguishable without a second read.
    #[error("insufficient funds for {username}: requested {requested}")]
    InsufficientFunds {
        /// The account that could not afford the debit.
        username: String,
        /// The amount that was requested.
        requested: i64,
    },

    /// A transfer target equals the sender.
    #[error("invalid recipient: {username}")]
    InvalidRecipient {
        /// The rejected recipient.
        username: String,
    },

    /// Any lower-level storage failure: connectivity, commit failure, or a
    /// constraint violation not covered above. Opaque and fatal to the
    /// operation; never retried inside the ledger.
    #[error("execution failure: {0}")]
    Execution(String),
}

impl LedgerError {
    /// Construct a `NotFound` for an account.
    #[must_use]
    pub fn account_not_found(username: &str) -> Self {
        Self::NotFound {
            entity: "account",
            name: username.to_string(),
        }
    }

    /// Construct a `NotFound` for a catalog item.
    #[must_use]
    pub fn item_not_found(item: &str) -> Self {
        Self::NotFound {
            entity: "item",
            name: item.to_string(),
        }
    }
}
