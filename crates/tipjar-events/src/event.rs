use serde::{Deserialize, Serialize};

use tipjar_types::{AccountId, Amount, Timestamp};

/// Unique identifier for a ledger event.
///
/// A BLAKE3 hash of the event content, so the identifier is
/// content-addressable and identical replays carry identical ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId {
    /// BLAKE3 digest the id is built from.
    pub hash: [u8; 32],
}

impl EventId {
    /// Wrap a precomputed digest.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self { hash }
    }

    /// First 8 hex chars, enough for log lines.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.hash[..4])
    }

    /// The full digest as hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "evt:{}", self.short_hex())
    }
}

/// Classification of ledger events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A donation was accepted and recorded.
    Donate,
    /// The outstanding balance was swept to the owner.
    Withdraw,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Donate => "Donate",
            Self::Withdraw => "Withdraw",
        };
        write!(f, "{s}")
    }
}

/// Payload data carried by a ledger event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    /// An accepted donation: who gave, how much, and their message.
    Donate {
        donor: AccountId,
        amount: Amount,
        message: String,
    },
    /// A completed withdrawal: the owner and the swept amount.
    Withdraw { owner: AccountId, amount: Amount },
}

impl EventPayload {
    /// The event kind this payload implies.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Donate { .. } => EventKind::Donate,
            Self::Withdraw { .. } => EventKind::Withdraw,
        }
    }

    /// The account the event pertains to: the donor for donations, the
    /// owner for withdrawals.
    pub fn account(&self) -> &AccountId {
        match self {
            Self::Donate { donor, .. } => donor,
            Self::Withdraw { owner, .. } => owner,
        }
    }

    /// The amount moved by the underlying transaction.
    pub fn amount(&self) -> Amount {
        match self {
            Self::Donate { amount, .. } | Self::Withdraw { amount, .. } => *amount,
        }
    }
}

/// A single notification emitted by the ledger.
///
/// Every event carries a content-addressed ID, the transaction stamp, a
/// classification kind, a payload, and a BLAKE3 integrity hash computed
/// over the serialized (timestamp + kind + payload).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Content-derived identifier.
    pub id: EventId,
    /// Stamp of the transaction that produced this event.
    pub timestamp: Timestamp,
    /// Kind, always consistent with `payload`.
    pub kind: EventKind,
    /// The transaction details.
    pub payload: EventPayload,
    /// BLAKE3 integrity hash over (timestamp, kind, payload).
    pub integrity_hash: [u8; 32],
}

impl LedgerEvent {
    /// Build a new `LedgerEvent`, computing its integrity hash and ID. The
    /// kind is derived from the payload.
    pub fn new(timestamp: Timestamp, payload: EventPayload) -> Self {
        let kind = payload.kind();
        let integrity_hash = Self::compute_integrity(&timestamp, &kind, &payload);
        let id = EventId::from_hash(integrity_hash);
        Self {
            id,
            timestamp,
            kind,
            payload,
            integrity_hash,
        }
    }

    /// Recompute the integrity hash and compare it to the stored one.
    pub fn verify_integrity(&self) -> bool {
        let expected = Self::compute_integrity(&self.timestamp, &self.kind, &self.payload);
        self.integrity_hash == expected
    }

    /// Domain-separated BLAKE3 over the stamp, kind, and payload.
    fn compute_integrity(
        timestamp: &Timestamp,
        kind: &EventKind,
        payload: &EventPayload,
    ) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"tipjar-event-v1:");
        hasher.update(&timestamp.secs().to_le_bytes());

        if let Ok(kind_bytes) = bincode::serialize(kind) {
            hasher.update(&kind_bytes);
        }
        if let Ok(payload_bytes) = bincode::serialize(payload) {
            hasher.update(&payload_bytes);
        }

        *hasher.finalize().as_bytes()
    }
}
