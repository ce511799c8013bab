//! Typed notifications for the Tipjar donation ledger.
//!
//! Every accepted transaction emits one [`LedgerEvent`]: a `Donate` event
//! carrying (donor, amount, message) or a `Withdraw` event carrying
//! (owner, amount). Events are integrity-hashed with BLAKE3 and fanned
//! out through the [`EventHub`] to filtered broadcast subscribers.
//!
//! The hub is in-process only; persistence and external delivery are the
//! host's concern.

pub mod event;
pub mod hub;

pub use event::{EventId, EventKind, EventPayload, LedgerEvent};
pub use hub::{EventFilter, EventHub, EventStream, DEFAULT_CHANNEL_CAPACITY};
