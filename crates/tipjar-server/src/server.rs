use std::sync::Arc;

use tokio::net::TcpListener;

use tipjar_events::EventHub;
use tipjar_ledger::{InMemoryLedger, LedgerConfig};

use crate::auth::BearerIdentity;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Tipjar donation server: a single ledger and its event hub behind an
/// axum HTTP surface.
pub struct DonationServer {
    config: ServerConfig,
    ledger: Arc<InMemoryLedger>,
    events: Arc<EventHub>,
}

impl DonationServer {
    /// Build a server from configuration alone. The ledger starts empty
    /// and withdrawals settle through the default sink.
    pub fn new(config: ServerConfig) -> Self {
        let events = Arc::new(EventHub::new(config.channel_capacity));
        let ledger = Arc::new(
            InMemoryLedger::new(config.owner.clone())
                .with_config(LedgerConfig {
                    minimum_donation: config.minimum_donation,
                })
                .with_events(events.clone()),
        );
        Self {
            config,
            ledger,
            events,
        }
    }

    /// Assemble a server around an existing ledger and hub, for embedders
    /// and tests that wire custom clocks or sinks.
    pub fn from_parts(
        config: ServerConfig,
        ledger: Arc<InMemoryLedger>,
        events: Arc<EventHub>,
    ) -> Self {
        Self {
            config,
            ledger,
            events,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The ledger this server fronts.
    pub fn ledger(&self) -> &Arc<InMemoryLedger> {
        &self.ledger
    }

    /// The hub carrying Donate/Withdraw notifications.
    pub fn events(&self) -> &Arc<EventHub> {
        &self.events
    }

    /// Build the router without binding, for `oneshot` tests and embedding.
    pub fn router(&self) -> axum::Router {
        build_router(AppState {
            ledger: self.ledger.clone(),
            resolver: Arc::new(BearerIdentity),
        })
    }

    /// Bind the configured address and serve until shutdown.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            owner = %self.config.owner,
            minimum_donation = %self.config.minimum_donation,
            "tipjar server listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
