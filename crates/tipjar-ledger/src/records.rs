use serde::{Deserialize, Serialize};

use tipjar_types::{AccountId, Amount, DonationId, Timestamp};

/// A single accepted donation, as stored in a donor's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Unique identifier of this contribution.
    pub id: DonationId,
    /// Donated amount in base units.
    pub amount: Amount,
    /// Free-form message attached by the donor. May be empty.
    pub message: String,
    /// Ledger time at which the donation was accepted.
    pub timestamp: Timestamp,
}

/// Everything the ledger tracks for one donor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorRecord {
    /// Cumulative amount across all of this donor's contributions.
    pub total_amount: Amount,
    /// Message of the most recent contribution.
    pub latest_message: String,
    /// Append-only list of contributions, oldest first.
    pub history: Vec<Contribution>,
}

impl DonorRecord {
    /// The compact view served for donor lookups.
    pub fn summary(&self) -> DonorSummary {
        DonorSummary {
            total_amount: self.total_amount,
            latest_message: self.latest_message.clone(),
        }
    }
}

/// Compact donor view: cumulative total plus most recent message.
///
/// Lookups of unknown accounts return [`DonorSummary::empty`] rather
/// than an error, mirroring a mapping with zero-value defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorSummary {
    pub total_amount: Amount,
    pub latest_message: String,
}

impl DonorSummary {
    /// The zero value returned for accounts that never donated.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Aggregate counters maintained across all donors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Lifetime sum of accepted donations. Never decreases.
    pub total_amount: Amount,
    /// Number of distinct donor accounts.
    pub donor_count: u64,
    /// Donations received and not yet withdrawn.
    pub balance: Amount,
}

/// Returned by a successful donation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationReceipt {
    /// Identifier assigned to the new contribution.
    pub donation_id: DonationId,
    /// The contributing account.
    pub donor: AccountId,
    /// Donated amount in base units.
    pub amount: Amount,
    /// Position of this contribution in the donor's history (1-based).
    pub seq: u64,
    /// `true` if this donation created the donor's record.
    pub first_donation: bool,
    /// Ledger time at which the donation was accepted.
    pub timestamp: Timestamp,
}

/// Returned by a successful withdrawal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    /// The owner account the balance was swept to.
    pub owner: AccountId,
    /// The full balance that was transferred out.
    pub amount: Amount,
    /// Ledger time at which the withdrawal settled.
    pub timestamp: Timestamp,
}
