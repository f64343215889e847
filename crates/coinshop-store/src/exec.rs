//! Transaction scope completion.
//!
//! A business protocol opens one scope, runs its ledger operations against
//! it, and hands the scope plus the outcome to [`finish`]. Exactly one unit
//! of work is open per protocol invocation; nesting is not supported.

use coinshop_core::Result;

use crate::Ledger;

/// Complete a scope according to the outcome of the operations run in it.
///
/// On `Ok`, commits; a commit failure is surfaced to the caller and the unit
/// of work is considered not applied. On `Err`, rolls back best-effort and
/// propagates the original error unchanged; a rollback failure is logged
/// but never masks what actually went wrong.
///
/// # Errors
///
/// Returns the original operation error, or [`coinshop_core::LedgerError::Execution`]
/// if the commit fails.
pub async fn finish<L, T>(ledger: &L, scope: L::Scope, outcome: Result<T>) -> Result<T>
where
    L: Ledger,
{
    match outcome {
        Ok(value) => {
            ledger.commit(scope).await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = ledger.rollback(scope).await {
                tracing::warn!(error = %rollback_err, "scope rollback failed");
            }
            Err(err)
        }
    }
}
