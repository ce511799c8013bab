use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Material used to derive an [`AccountId`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountMaterial {
    /// An ed25519-style public key (32 bytes).
    PublicKey([u8; 32]),
    /// A human-readable label, for deployments with named accounts.
    Label(String),
    /// A raw seed, for ephemeral and test accounts.
    Seed([u8; 32]),
}

/// Opaque identity of a contributor or of the ledger owner.
///
/// An `AccountId` is derived deterministically from [`AccountMaterial`]
/// using BLAKE3. The same material always produces the same identity, so
/// hosts can map their own principals (wallet keys, usernames) onto stable
/// ledger accounts. The ledger itself never inspects the material.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId {
    hash: [u8; 32],
}

impl AccountId {
    /// Derive an `AccountId` from account material.
    pub fn derive(material: &AccountMaterial) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"tipjar-account-v1:");
        match material {
            AccountMaterial::PublicKey(pk) => {
                hasher.update(b"pubkey:");
                hasher.update(pk);
            }
            AccountMaterial::Label(label) => {
                hasher.update(b"label:");
                hasher.update(label.as_bytes());
            }
            AccountMaterial::Seed(seed) => {
                hasher.update(b"seed:");
                hasher.update(seed);
            }
        }
        Self {
            hash: *hasher.finalize().as_bytes(),
        }
    }

    /// Derive from an ed25519-style public key.
    pub fn from_public_key(pk: &[u8; 32]) -> Self {
        Self::derive(&AccountMaterial::PublicKey(*pk))
    }

    /// Derive from a human-readable label.
    pub fn from_label(label: &str) -> Self {
        Self::derive(&AccountMaterial::Label(label.to_string()))
    }

    /// Create an ephemeral (random) account for tests and demos.
    pub fn ephemeral() -> Self {
        let mut seed = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut seed);
        Self::derive(&AccountMaterial::Seed(seed))
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Hex form used on the wire and in bearer tokens.
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Prefixed short form for logs and CLI output.
    pub fn short_id(&self) -> String {
        format!("acct:{}", hex::encode(&self.hash[..4]))
    }

    /// Parse 64 hex chars, with or without the `acct:` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("acct:").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self { hash: arr })
    }

    /// Adopt a raw hash. Prefer [`derive`](Self::derive) outside tests.
    pub fn from_raw(hash: [u8; 32]) -> Self {
        Self { hash }
    }
}

impl FromStr for AccountId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Account ids cross JSON and TOML boundaries as hex strings.
impl Serialize for AccountId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.short_id())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}
