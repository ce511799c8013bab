use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use tipjar_events::DEFAULT_CHANNEL_CAPACITY;
use tipjar_ledger::DEFAULT_MINIMUM_DONATION;
use tipjar_types::{AccountId, Amount};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// The only account allowed to withdraw. The default is a fixed
    /// development identity; deployments must set their own.
    pub owner: AccountId,
    /// Floor a donation must strictly exceed.
    pub minimum_donation: Amount,
    /// Capacity of per-subscriber event channels.
    pub channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9310".parse().unwrap(),
            owner: AccountId::from_label("tipjar-dev-owner"),
            minimum_donation: DEFAULT_MINIMUM_DONATION,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing fields fall back to defaults.
    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
