use tipjar_types::{AccountId, Amount};

/// Failure modes of donate and withdraw transactions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("donation of {amount} does not exceed the minimum of {minimum}")]
    InvalidAmount { amount: Amount, minimum: Amount },

    #[error("caller {caller} is not the ledger owner")]
    Unauthorized { caller: AccountId },

    #[error("no funds to withdraw")]
    NothingToWithdraw,

    #[error("outbound transfer failed: {reason}")]
    TransferFailure { reason: String },

    #[error("amount arithmetic overflowed")]
    Overflow,

    #[error("internal ledger error: {0}")]
    Internal(String),
}
