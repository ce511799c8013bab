use std::sync::RwLock;

use tokio::sync::broadcast;
use tracing::debug;

use tipjar_types::{AccountId, Timestamp};

use crate::event::{EventKind, LedgerEvent};

/// Default capacity of per-subscriber broadcast channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Filter for subscribing to a subset of ledger events.
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    /// If set, only these kinds are delivered.
    pub kinds: Option<Vec<EventKind>>,
    /// If set, only events touching these accounts are delivered.
    pub accounts: Option<Vec<AccountId>>,
    /// If set, only events stamped after this time are delivered.
    pub since: Option<Timestamp>,
}

impl EventFilter {
    /// Whether `event` passes every restriction set on this filter.
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        if let Some(ref kinds) = self.kinds {
            if !kinds.contains(&event.kind) {
                return false;
            }
        }
        if let Some(ref accounts) = self.accounts {
            if !accounts.contains(event.payload.account()) {
                return false;
            }
        }
        if let Some(ref since) = self.since {
            if event.timestamp <= *since {
                return false;
            }
        }
        true
    }
}

/// A broadcast channel receiver for ledger events.
pub type EventStream = broadcast::Receiver<LedgerEvent>;

/// A registered listener: its filter and the sending half of its channel.
struct Subscriber {
    filter: EventFilter,
    sender: broadcast::Sender<LedgerEvent>,
}

/// Fan-out hub that delivers ledger events to matching subscribers.
///
/// The ledger publishes while its transaction guard is still held, so
/// subscribers observe events in commit order. Slow subscribers lag on
/// their own channel and never block publication.
pub struct EventHub {
    subscribers: RwLock<Vec<Subscriber>>,
    channel_capacity: usize,
}

impl EventHub {
    /// Create a hub with the given per-subscriber channel capacity.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Register a listener and get the receiving half of its channel.
    /// Only events passing `filter` are sent to it.
    pub fn subscribe(&self, filter: EventFilter) -> EventStream {
        let (tx, rx) = broadcast::channel(self.channel_capacity);
        let sub = Subscriber { filter, sender: tx };
        self.subscribers
            .write()
            .expect("hub lock poisoned")
            .push(sub);
        rx
    }

    /// Deliver an event to all matching subscribers.
    /// Dead subscribers are dropped along the way.
    pub fn publish(&self, event: &LedgerEvent) {
        let mut subs = self.subscribers.write().expect("hub lock poisoned");
        subs.retain(|sub| {
            if sub.filter.matches(event) {
                // A failed send means every receiver is gone.
                sub.sender.send(event.clone()).is_ok()
            } else {
                // A non-match stays registered unless its channel already closed.
                sub.sender.receiver_count() > 0
            }
        });
        debug!(id = %event.id, kind = %event.kind, "event published");
    }

    /// How many subscribers are currently registered.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().expect("hub lock poisoned").len()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}
