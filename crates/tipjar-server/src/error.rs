use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use tipjar_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("invalid account id: {0}")]
    InvalidAccount(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// HTTP status plus stable machine-readable code for this error.
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Ledger(LedgerError::InvalidAmount { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_amount")
            }
            Self::Ledger(LedgerError::Overflow) => (StatusCode::BAD_REQUEST, "overflow"),
            Self::Ledger(LedgerError::Unauthorized { .. }) => {
                (StatusCode::FORBIDDEN, "unauthorized")
            }
            Self::Ledger(LedgerError::NothingToWithdraw) => {
                (StatusCode::CONFLICT, "nothing_to_withdraw")
            }
            Self::Ledger(LedgerError::TransferFailure { .. }) => {
                (StatusCode::BAD_GATEWAY, "transfer_failure")
            }
            Self::Ledger(LedgerError::Internal(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
            Self::AuthFailed(_) => (StatusCode::UNAUTHORIZED, "auth_failed"),
            Self::InvalidAccount(_) => (StatusCode::BAD_REQUEST, "invalid_account"),
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        let body = Json(json!({
            "error": code,
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
