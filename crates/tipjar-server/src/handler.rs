use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde_json::json;

use tipjar_ledger::{
    AuditReport, Contribution, DonationReceipt, DonationRead, DonationWrite, DonorSummary,
    InMemoryLedger, LedgerAuditor, WithdrawalReceipt,
};
use tipjar_types::AccountId;

use crate::api::{DonateRequest, HealthResponse, StatsResponse};
use crate::auth::{credentials_from_headers, IdentityResolver};
use crate::error::{ServerError, ServerResult};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<InMemoryLedger>,
    pub resolver: Arc<dyn IdentityResolver>,
}

fn parse_account(raw: &str) -> ServerResult<AccountId> {
    AccountId::from_hex(raw).map_err(|e| ServerError::InvalidAccount(e.to_string()))
}

/// Accept a donation from the resolved bearer identity.
pub async fn donate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<DonateRequest>,
) -> ServerResult<Json<DonationReceipt>> {
    let credentials = credentials_from_headers(&headers);
    let donor = state.resolver.resolve(&credentials).await?;
    let receipt = state.ledger.donate(&donor, req.amount, &req.message)?;
    Ok(Json(receipt))
}

/// Sweep the full balance to the owner. The bearer identity must be
/// the owner; the ledger enforces the check.
pub async fn withdraw_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ServerResult<Json<WithdrawalReceipt>> {
    let credentials = credentials_from_headers(&headers);
    let caller = state.resolver.resolve(&credentials).await?;
    let receipt = state.ledger.withdraw(&caller)?;
    Ok(Json(receipt))
}

/// Donor summary lookup; unknown accounts read as zero-valued.
pub async fn donor_handler(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> ServerResult<Json<DonorSummary>> {
    let account = parse_account(&account)?;
    Ok(Json(state.ledger.donor(&account)?))
}

/// Full contribution history for one donor, oldest first.
pub async fn history_handler(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> ServerResult<Json<Vec<Contribution>>> {
    let account = parse_account(&account)?;
    Ok(Json(state.ledger.donor_history(&account)?))
}

/// Aggregate ledger counters.
pub async fn stats_handler(State(state): State<AppState>) -> ServerResult<Json<StatsResponse>> {
    let totals = state.ledger.totals()?;
    Ok(Json(StatsResponse {
        total_donors: totals.donor_count,
        total_raised: totals.total_amount,
        balance: totals.balance,
    }))
}

/// Consistency audit of the running ledger.
pub async fn audit_handler(State(state): State<AppState>) -> ServerResult<Json<AuditReport>> {
    let report = LedgerAuditor::audit(state.ledger.as_ref())?;
    Ok(Json(report))
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler. Reports the receiving owner so clients can tell
/// whether the caller is allowed to withdraw.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "tipjar-server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": crate::API_VERSION,
        "owner": state.ledger.owner().to_hex(),
        "minimum_donation": state.ledger.config().minimum_donation,
    }))
}
