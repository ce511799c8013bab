//! Foundation types for the Tipjar donation ledger.
//!
//! This crate provides the identity, amount, and temporal primitives used
//! throughout the tipjar system. Every other tipjar crate depends on
//! `tipjar-types`.
//!
//! # Key Types
//!
//! - [`AccountId`] — Opaque account identity derived from key material or a label
//! - [`Amount`] — Asset quantity in indivisible base units, checked arithmetic only
//! - [`Timestamp`] — Wall-clock seconds since the UNIX epoch
//! - [`DonationId`] — UUID v7 identifier for an accepted contribution

pub mod account;
pub mod amount;
pub mod donation;
pub mod error;
pub mod time;

pub use account::{AccountId, AccountMaterial};
pub use amount::Amount;
pub use donation::DonationId;
pub use error::TypeError;
pub use time::Timestamp;
