use async_trait::async_trait;
use axum::http::{header, HeaderMap};

use tipjar_types::AccountId;

use crate::error::{ServerError, ServerResult};

/// Credentials presented by an HTTP caller.
#[derive(Clone, Debug)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

/// Maps presented credentials onto a ledger account.
///
/// Reads are open; every mutating endpoint resolves an identity first and
/// the ledger only ever sees [`AccountId`]s.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, credentials: &Credentials) -> ServerResult<AccountId>;
}

/// Resolver for bearer tokens that carry a hex-encoded account id.
///
/// Deployments with real principals (wallet signatures, session tokens)
/// substitute their own resolver.
pub struct BearerIdentity;

#[async_trait]
impl IdentityResolver for BearerIdentity {
    async fn resolve(&self, credentials: &Credentials) -> ServerResult<AccountId> {
        match credentials {
            Credentials::Bearer(token) => AccountId::from_hex(token)
                .map_err(|e| ServerError::AuthFailed(format!("bad bearer account: {e}"))),
            Credentials::Anonymous => Err(ServerError::AuthFailed(
                "mutating requests require a bearer identity".into(),
            )),
        }
    }
}

/// Extract credentials from request headers. Anything other than a
/// well-formed `Authorization: Bearer <token>` counts as anonymous.
pub fn credentials_from_headers(headers: &HeaderMap) -> Credentials {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Credentials::Anonymous;
    };
    let Ok(value) = value.to_str() else {
        return Credentials::Anonymous;
    };
    match value.strip_prefix("Bearer ") {
        Some(token) => Credentials::Bearer(token.trim().to_string()),
        None => Credentials::Anonymous,
    }
}
