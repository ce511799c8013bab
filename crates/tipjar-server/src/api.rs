use serde::{Deserialize, Serialize};

use tipjar_types::Amount;

/// Body of `POST /v1/donations`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DonateRequest {
    /// Base-unit amount, as a decimal string or integer.
    pub amount: Amount,
    /// Optional message; omitted means empty.
    #[serde(default)]
    pub message: String,
}

/// Body of `GET /v1/stats`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_donors: u64,
    pub total_raised: Amount,
    pub balance: Amount,
}

/// Body of `GET /v1/health`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
        }
    }
}
