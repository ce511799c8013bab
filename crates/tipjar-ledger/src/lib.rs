//! Donation ledger for the Tipjar system.
//!
//! This crate is the heart of tipjar. It provides:
//! - Donor records, contribution histories, and aggregate totals
//! - `DonationRead` / `DonationWrite` trait boundaries
//! - `InMemoryLedger`: a single-lock implementation with atomic transactions
//! - `Clock` and `TransferSink` seams for deterministic tests and host payouts
//! - `LedgerAuditor`: cross-checks every derived counter against the histories
//!
//! Donations below or at the configured minimum are rejected outright, and
//! a failed outbound transfer aborts the withdrawal with the balance intact.

pub mod audit;
pub mod clock;
pub mod config;
pub mod error;
pub mod memory;
pub mod records;
pub mod sink;
pub mod traits;

pub use audit::{AuditReport, LedgerAuditor, Violation, ViolationKind};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{LedgerConfig, DEFAULT_MINIMUM_DONATION};
pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use records::{
    Contribution, DonationReceipt, DonorRecord, DonorSummary, LedgerTotals, WithdrawalReceipt,
};
pub use sink::{FailingSink, NullSink, Payout, RecordingSink, TransferError, TransferSink};
pub use traits::{DonationRead, DonationWrite};
