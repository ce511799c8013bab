use serde::{Deserialize, Serialize};

use tipjar_types::{AccountId, Amount};

use crate::error::LedgerError;
use crate::traits::DonationRead;

/// Result of a full consistency audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Number of donor accounts examined.
    pub donor_count: u64,
    /// Every donor total and latest message matches that donor's history.
    pub donor_records_consistent: bool,
    /// Aggregate counters match what the donor records add up to.
    pub totals_consistent: bool,
    /// The outstanding balance does not exceed the lifetime total.
    pub balance_bounded: bool,
    /// Every history is stamped in non-decreasing order.
    pub timestamps_ordered: bool,
    pub violations: Vec<Violation>,
}

impl AuditReport {
    /// True when no check recorded a violation.
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific inconsistency found during an audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The donor the violation pertains to, if any.
    pub account: Option<AccountId>,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    EmptyHistory,
    DonorTotalMismatch,
    LatestMessageMismatch,
    TimestampRegression,
    TotalMismatch,
    DonorCountMismatch,
    BalanceExceedsTotal,
}

/// Cross-checks every derived counter against the contribution histories,
/// which are the ground truth.
pub struct LedgerAuditor;

impl LedgerAuditor {
    /// Audit all donor records and aggregate counters of `reader`.
    pub fn audit<R: DonationRead>(reader: &R) -> Result<AuditReport, LedgerError> {
        let totals = reader.totals()?;
        let accounts = reader.donors()?;

        let mut violations = Vec::new();
        let mut donor_records_consistent = true;
        let mut timestamps_ordered = true;
        let mut donor_totals = Vec::with_capacity(accounts.len());

        for account in &accounts {
            let summary = reader.donor(account)?;
            let history = reader.donor_history(account)?;

            if history.is_empty() {
                donor_records_consistent = false;
                violations.push(Violation {
                    account: Some(account.clone()),
                    kind: ViolationKind::EmptyHistory,
                    description: "donor record exists without any contribution".into(),
                });
                continue;
            }

            match Amount::checked_sum(history.iter().map(|c| c.amount)) {
                Some(sum) if sum == summary.total_amount => {}
                Some(sum) => {
                    donor_records_consistent = false;
                    violations.push(Violation {
                        account: Some(account.clone()),
                        kind: ViolationKind::DonorTotalMismatch,
                        description: format!(
                            "recorded total {} but history sums to {sum}",
                            summary.total_amount
                        ),
                    });
                }
                None => {
                    donor_records_consistent = false;
                    violations.push(Violation {
                        account: Some(account.clone()),
                        kind: ViolationKind::DonorTotalMismatch,
                        description: "history sum overflows u128".into(),
                    });
                }
            }

            if let Some(last) = history.last() {
                if last.message != summary.latest_message {
                    donor_records_consistent = false;
                    violations.push(Violation {
                        account: Some(account.clone()),
                        kind: ViolationKind::LatestMessageMismatch,
                        description: format!(
                            "latest message {:?} does not match newest contribution {:?}",
                            summary.latest_message, last.message
                        ),
                    });
                }
            }

            if !history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp) {
                timestamps_ordered = false;
                violations.push(Violation {
                    account: Some(account.clone()),
                    kind: ViolationKind::TimestampRegression,
                    description: "history timestamps decrease".into(),
                });
            }

            donor_totals.push(summary.total_amount);
        }

        let mut totals_consistent = true;
        match Amount::checked_sum(donor_totals) {
            Some(sum) if sum == totals.total_amount => {}
            _ => {
                totals_consistent = false;
                violations.push(Violation {
                    account: None,
                    kind: ViolationKind::TotalMismatch,
                    description: format!(
                        "aggregate total {} does not match donor records",
                        totals.total_amount
                    ),
                });
            }
        }

        if totals.donor_count != accounts.len() as u64 {
            totals_consistent = false;
            violations.push(Violation {
                account: None,
                kind: ViolationKind::DonorCountMismatch,
                description: format!(
                    "donor count {} but {} donor records exist",
                    totals.donor_count,
                    accounts.len()
                ),
            });
        }

        let balance_bounded = totals.balance <= totals.total_amount;
        if !balance_bounded {
            violations.push(Violation {
                account: None,
                kind: ViolationKind::BalanceExceedsTotal,
                description: format!(
                    "balance {} exceeds lifetime total {}",
                    totals.balance, totals.total_amount
                ),
            });
        }

        Ok(AuditReport {
            donor_count: accounts.len() as u64,
            donor_records_consistent,
            totals_consistent,
            balance_bounded,
            timestamps_ordered,
            violations,
        })
    }
}
