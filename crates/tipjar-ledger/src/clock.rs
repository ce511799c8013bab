use std::sync::atomic::{AtomicU64, Ordering};

use tipjar_types::Timestamp;

/// Time source used to stamp accepted transactions.
///
/// The ledger clamps whatever the clock returns so that stamps never run
/// backwards within one ledger instance.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Settable clock for deterministic tests.
pub struct ManualClock {
    secs: AtomicU64,
}

impl ManualClock {
    /// Create a manual clock starting at the given time.
    pub fn new(start: Timestamp) -> Self {
        Self {
            secs: AtomicU64::new(start.secs()),
        }
    }

    /// Set the clock to an absolute time. May move backwards.
    pub fn set(&self, now: Timestamp) {
        self.secs.store(now.secs(), Ordering::SeqCst);
    }

    /// Advance the clock by the given number of seconds.
    pub fn advance(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_secs(self.secs.load(Ordering::SeqCst))
    }
}
