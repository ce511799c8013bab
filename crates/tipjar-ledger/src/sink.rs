use std::sync::RwLock;

use tipjar_types::{AccountId, Amount};

/// Error reported by an outbound transfer attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct TransferError {
    pub reason: String,
}

impl TransferError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Destination for withdrawn balances.
///
/// The ledger calls `transfer` while the withdrawal transaction is still
/// open; the balance is only cleared once the sink returns `Ok`. An `Err`
/// aborts the withdrawal and leaves the recorded balance intact.
pub trait TransferSink: Send + Sync {
    fn transfer(&self, to: &AccountId, amount: Amount) -> Result<(), TransferError>;
}

/// Accepts every transfer without side effects. The host settles value
/// out of band.
pub struct NullSink;

impl TransferSink for NullSink {
    fn transfer(&self, _to: &AccountId, _amount: Amount) -> Result<(), TransferError> {
        Ok(())
    }
}

/// A payout captured by [`RecordingSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payout {
    pub to: AccountId,
    pub amount: Amount,
}

/// Records every payout in memory, for tests and demos.
#[derive(Default)]
pub struct RecordingSink {
    payouts: RwLock<Vec<Payout>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All payouts in the order they settled.
    pub fn payouts(&self) -> Vec<Payout> {
        self.payouts.read().expect("sink lock poisoned").clone()
    }

    /// Total amount paid out to the given account.
    pub fn total_to(&self, account: &AccountId) -> Amount {
        self.payouts
            .read()
            .expect("sink lock poisoned")
            .iter()
            .filter(|p| &p.to == account)
            .fold(Amount::ZERO, |acc, p| acc.saturating_add(p.amount))
    }
}

impl TransferSink for RecordingSink {
    fn transfer(&self, to: &AccountId, amount: Amount) -> Result<(), TransferError> {
        self.payouts
            .write()
            .expect("sink lock poisoned")
            .push(Payout {
                to: to.clone(),
                amount,
            });
        Ok(())
    }
}

/// Refuses every transfer, for exercising withdrawal failure paths.
pub struct FailingSink {
    reason: String,
}

impl FailingSink {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl TransferSink for FailingSink {
    fn transfer(&self, _to: &AccountId, _amount: Amount) -> Result<(), TransferError> {
        Err(TransferError::new(self.reason.clone()))
    }
}
