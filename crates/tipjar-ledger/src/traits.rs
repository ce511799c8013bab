use tipjar_types::{AccountId, Amount};

use crate::error::LedgerError;
use crate::records::{
    Contribution, DonationReceipt, DonorSummary, LedgerTotals, WithdrawalReceipt,
};

/// Read boundary for donation ledger queries.
///
/// Reads observe a consistent snapshot taken at call time; they never
/// block each other.
pub trait DonationRead: Send + Sync {
    /// Compact view of one donor: cumulative total plus latest message.
    /// Unknown accounts yield the zero-valued summary.
    fn donor(&self, account: &AccountId) -> Result<DonorSummary, LedgerError>;

    /// Full contribution history of one donor, oldest first. Unknown
    /// accounts yield an empty history.
    fn donor_history(&self, account: &AccountId) -> Result<Vec<Contribution>, LedgerError>;

    /// Number of distinct accounts that have donated at least once.
    fn total_donors(&self) -> Result<u64, LedgerError>;

    /// Donations received and not yet withdrawn.
    fn balance(&self) -> Result<Amount, LedgerError>;

    /// All aggregate counters in one consistent snapshot.
    fn totals(&self) -> Result<LedgerTotals, LedgerError>;

    /// Every donor account, sorted.
    fn donors(&self) -> Result<Vec<AccountId>, LedgerError>;
}

/// Write boundary for donation ledger mutations.
pub trait DonationWrite: Send + Sync {
    /// Record a donation from `donor`. The amount must strictly exceed
    /// the configured minimum; the message may be empty and is stored
    /// verbatim.
    fn donate(
        &self,
        donor: &AccountId,
        amount: Amount,
        message: &str,
    ) -> Result<DonationReceipt, LedgerError>;

    /// Sweep the entire outstanding balance to the owner. Only the owner
    /// may call this, and only while the balance is non-zero.
    fn withdraw(&self, caller: &AccountId) -> Result<WithdrawalReceipt, LedgerError>;
}
