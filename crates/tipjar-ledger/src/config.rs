use serde::{Deserialize, Serialize};

use tipjar_types::Amount;

/// Default donation floor: 0.01 whole tokens for an 18-decimal asset.
pub const DEFAULT_MINIMUM_DONATION: Amount = Amount::new(10_000_000_000_000_000);

/// Tunable parameters of a donation ledger instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Floor a donation must strictly exceed to be accepted. A floor of
    /// zero still rejects zero-amount donations.
    pub minimum_donation: Amount,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            minimum_donation: DEFAULT_MINIMUM_DONATION,
        }
    }
}
