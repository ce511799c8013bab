//! HTTP boundary for the Tipjar donation ledger.
//!
//! Serves donations, withdrawals, donor lookups, aggregate stats, and a
//! consistency audit as a small JSON API. Mutating routes resolve the
//! caller from a bearer identity header before the ledger sees anything.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

/// Version reported by `GET /v1/info`, bumped on breaking API changes.
pub const API_VERSION: u32 = 1;

pub use api::{DonateRequest, HealthResponse, StatsResponse};
pub use auth::{credentials_from_headers, BearerIdentity, Credentials, IdentityResolver};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use router::build_router;
pub use server::DonationServer;
