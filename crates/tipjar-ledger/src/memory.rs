use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use tipjar_events::{EventHub, EventPayload, LedgerEvent};
use tipjar_types::{AccountId, Amount, DonationId, Timestamp};

use crate::clock::{Clock, SystemClock};
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::records::{
    Contribution, DonationReceipt, DonorRecord, DonorSummary, LedgerTotals, WithdrawalReceipt,
};
use crate::sink::{NullSink, TransferSink};
use crate::traits::{DonationRead, DonationWrite};

/// In-memory donation ledger for servers, tests, and embedding.
///
/// All state lives behind a single `RwLock`. Each mutation runs while
/// holding the write guard, so a donation lands completely (history
/// entry, donor total, aggregate totals, balance) or not at all, and a
/// failed withdrawal leaves the balance untouched.
pub struct InMemoryLedger {
    owner: AccountId,
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn TransferSink>,
    events: Option<Arc<EventHub>>,
    inner: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    donors: HashMap<AccountId, DonorRecord>,
    totals: LedgerTotals,
    last_stamp: Timestamp,
}

impl InMemoryLedger {
    /// Create a ledger owned by `owner`, with default config, wall-clock
    /// time, and a [`NullSink`] for withdrawals.
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            config: LedgerConfig::default(),
            clock: Arc::new(SystemClock),
            sink: Arc::new(NullSink),
            events: None,
            inner: RwLock::new(LedgerState::default()),
        }
    }

    /// Replace the ledger configuration.
    pub fn with_config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the withdrawal destination.
    pub fn with_sink(mut self, sink: Arc<dyn TransferSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Attach an event hub; every accepted transaction publishes one
    /// event while its write guard is still held, so delivery order
    /// matches commit order.
    pub fn with_events(mut self, hub: Arc<EventHub>) -> Self {
        self.events = Some(hub);
        self
    }

    /// The owning account.
    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// The active configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.inner
            .read()
            .map_err(|_| LedgerError::Internal("ledger read lock poisoned".into()))
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.inner
            .write()
            .map_err(|_| LedgerError::Internal("ledger write lock poisoned".into()))
    }

    /// Next transaction stamp: wall clock, clamped so stamps never run
    /// backwards within this ledger.
    fn tick(&self, state: &mut LedgerState) -> Timestamp {
        let now = self.clock.now();
        let stamp = if now > state.last_stamp {
            now
        } else {
            state.last_stamp
        };
        state.last_stamp = stamp;
        stamp
    }

    fn publish(&self, event: LedgerEvent) {
        if let Some(hub) = &self.events {
            hub.publish(&event);
        }
    }
}

impl DonationWrite for InMemoryLedger {
    fn donate(
        &self,
        donor: &AccountId,
        amount: Amount,
        message: &str,
    ) -> Result<DonationReceipt, LedgerError> {
        if amount <= self.config.minimum_donation {
            return Err(LedgerError::InvalidAmount {
                amount,
                minimum: self.config.minimum_donation,
            });
        }

        let mut state = self.write_state()?;

        // All checked additions happen before any field is written, so an
        // overflow rejects the donation with the ledger unchanged.
        let donor_total = state
            .donors
            .get(donor)
            .map(|record| record.total_amount)
            .unwrap_or(Amount::ZERO);
        let new_donor_total = donor_total.checked_add(amount).ok_or(LedgerError::Overflow)?;
        let new_total = state
            .totals
            .total_amount
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let new_balance = state
            .totals
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        let timestamp = self.tick(&mut state);
        let first_donation = !state.donors.contains_key(donor);
        let contribution = Contribution {
            id: DonationId::new(),
            amount,
            message: message.to_string(),
            timestamp,
        };
        let donation_id = contribution.id.clone();

        let record = state.donors.entry(donor.clone()).or_default();
        record.history.push(contribution);
        record.latest_message = message.to_string();
        record.total_amount = new_donor_total;
        let seq = record.history.len() as u64;

        state.totals.total_amount = new_total;
        state.totals.balance = new_balance;
        if first_donation {
            state.totals.donor_count += 1;
        }

        self.publish(LedgerEvent::new(
            timestamp,
            EventPayload::Donate {
                donor: donor.clone(),
                amount,
                message: message.to_string(),
            },
        ));

        debug!(donor = %donor, amount = %amount, seq, first = first_donation, "donation accepted");

        Ok(DonationReceipt {
            donation_id,
            donor: donor.clone(),
            amount,
            seq,
            first_donation,
            timestamp,
        })
    }

    fn withdraw(&self, caller: &AccountId) -> Result<WithdrawalReceipt, LedgerError> {
        if caller != &self.owner {
            return Err(LedgerError::Unauthorized {
                caller: caller.clone(),
            });
        }

        let mut state = self.write_state()?;
        let amount = state.totals.balance;
        if amount.is_zero() {
            return Err(LedgerError::NothingToWithdraw);
        }

        // The sink settles inside the transaction; the balance is cleared
        // only after it confirms.
        self.sink
            .transfer(&self.owner, amount)
            .map_err(|e| LedgerError::TransferFailure {
                reason: e.to_string(),
            })?;

        state.totals.balance = Amount::ZERO;
        let timestamp = self.tick(&mut state);

        self.publish(LedgerEvent::new(
            timestamp,
            EventPayload::Withdraw {
                owner: self.owner.clone(),
                amount,
            },
        ));

        info!(owner = %self.owner, amount = %amount, "balance withdrawn");

        Ok(WithdrawalReceipt {
            owner: self.owner.clone(),
            amount,
            timestamp,
        })
    }
}

impl DonationRead for InMemoryLedger {
    fn donor(&self, account: &AccountId) -> Result<DonorSummary, LedgerError> {
        let state = self.read_state()?;
        Ok(state
            .donors
            .get(account)
            .map(DonorRecord::summary)
            .unwrap_or_else(DonorSummary::empty))
    }

    fn donor_history(&self, account: &AccountId) -> Result<Vec<Contribution>, LedgerError> {
        let state = self.read_state()?;
        Ok(state
            .donors
            .get(account)
            .map(|record| record.history.clone())
            .unwrap_or_default())
    }

    fn total_donors(&self) -> Result<u64, LedgerError> {
        let state = self.read_state()?;
        Ok(state.totals.donor_count)
    }

    fn balance(&self) -> Result<Amount, LedgerError> {
        let state = self.read_state()?;
        Ok(state.totals.balance)
    }

    fn totals(&self) -> Result<LedgerTotals, LedgerError> {
        let state = self.read_state()?;
        Ok(state.totals)
    }

    fn donors(&self) -> Result<Vec<AccountId>, LedgerError> {
        let state = self.read_state()?;
        let mut ids: Vec<_> = state.donors.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::sink::{FailingSink, RecordingSink};
    use tipjar_events::EventFilter;

    fn open_ledger(owner: &AccountId) -> InMemoryLedger {
        // A floor of 10 keeps test amounts readable.
        InMemoryLedger::new(owner.clone()).with_config(LedgerConfig {
            minimum_donation: Amount::new(10),
        })
    }

    #[test]
    fn first_donation_creates_donor_record() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let ledger = open_ledger(&owner);

        let receipt = ledger.donate(&alice, Amount::new(20), "hello").unwrap();
        assert_eq!(receipt.donor, alice);
        assert_eq!(receipt.amount, Amount::new(20));
        assert_eq!(receipt.seq, 1);
        assert!(receipt.first_donation);

        let summary = ledger.donor(&alice).unwrap();
        assert_eq!(summary.total_amount, Amount::new(20));
        assert_eq!(summary.latest_message, "hello");

        let history = ledger.donor_history(&alice).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, receipt.donation_id);
        assert_eq!(history[0].timestamp, receipt.timestamp);

        let totals = ledger.totals().unwrap();
        assert_eq!(totals.total_amount, Amount::new(20));
        assert_eq!(totals.balance, Amount::new(20));
        assert_eq!(totals.donor_count, 1);
    }

    #[test]
    fn donation_must_exceed_minimum() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let ledger = open_ledger(&owner);

        // Exactly at the floor is rejected; the comparison is strict.
        let at_floor = ledger.donate(&alice, Amount::new(10), "").unwrap_err();
        assert_eq!(
            at_floor,
            LedgerError::InvalidAmount {
                amount: Amount::new(10),
                minimum: Amount::new(10),
            }
        );

        let below = ledger.donate(&alice, Amount::new(9), "").unwrap_err();
        assert!(matches!(below, LedgerError::InvalidAmount { .. }));

        // A rejected donation leaves no trace.
        assert_eq!(ledger.total_donors().unwrap(), 0);
        assert_eq!(ledger.balance().unwrap(), Amount::ZERO);
        assert_eq!(ledger.donor(&alice).unwrap(), DonorSummary::empty());

        // One base unit above the floor is enough.
        let receipt = ledger.donate(&alice, Amount::new(11), "").unwrap();
        assert!(receipt.first_donation);
    }

    #[test]
    fn zero_donation_rejected_even_with_zero_floor() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let ledger = InMemoryLedger::new(owner).with_config(LedgerConfig {
            minimum_donation: Amount::ZERO,
        });

        let err = ledger.donate(&alice, Amount::ZERO, "free").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount { .. }));
        assert!(ledger.donate(&alice, Amount::new(1), "paid").is_ok());
    }

    #[test]
    fn repeat_donor_is_counted_once() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let ledger = open_ledger(&owner);

        let first = ledger.donate(&alice, Amount::new(20), "first").unwrap();
        let second = ledger.donate(&alice, Amount::new(30), "second").unwrap();

        assert!(first.first_donation);
        assert!(!second.first_donation);
        assert_eq!(second.seq, 2);

        assert_eq!(ledger.total_donors().unwrap(), 1);
        let summary = ledger.donor(&alice).unwrap();
        assert_eq!(summary.total_amount, Amount::new(50));
        assert_eq!(summary.latest_message, "second");

        let history = ledger.donor_history(&alice).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].message, "first");
        assert_eq!(history[1].message, "second");
    }

    #[test]
    fn donors_accumulate_independently() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let bob = AccountId::from_label("bob");
        let ledger = InMemoryLedger::new(owner);

        // Default floor: 0.01 whole tokens at 18 decimals.
        let small = Amount::new(2 * 10u128.pow(16));
        let large = Amount::new(3 * 10u128.pow(16));

        ledger.donate(&alice, small, "for the jar").unwrap();
        ledger.donate(&bob, large, "keep it up").unwrap();

        assert_eq!(ledger.donor(&alice).unwrap().total_amount, small);
        assert_eq!(ledger.donor(&bob).unwrap().total_amount, large);

        let totals = ledger.totals().unwrap();
        assert_eq!(totals.donor_count, 2);
        assert_eq!(totals.total_amount, Amount::new(5 * 10u128.pow(16)));
        assert_eq!(totals.balance, totals.total_amount);
    }

    #[test]
    fn empty_message_is_stored_verbatim() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let ledger = open_ledger(&owner);

        ledger.donate(&alice, Amount::new(25), "").unwrap();

        let summary = ledger.donor(&alice).unwrap();
        assert_eq!(summary.latest_message, "");
        assert_eq!(ledger.donor_history(&alice).unwrap()[0].message, "");
    }

    #[test]
    fn unknown_donor_reads_zero_value() {
        let owner = AccountId::from_label("owner");
        let nobody = AccountId::from_label("nobody");
        let ledger = open_ledger(&owner);

        assert_eq!(ledger.donor(&nobody).unwrap(), DonorSummary::empty());
        assert!(ledger.donor_history(&nobody).unwrap().is_empty());

        // The lookup must not create a record.
        assert_eq!(ledger.total_donors().unwrap(), 0);
        assert!(ledger.donors().unwrap().is_empty());
    }

    #[test]
    fn withdraw_sweeps_full_balance() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let sink = Arc::new(RecordingSink::new());
        let ledger = open_ledger(&owner).with_sink(sink.clone());

        ledger.donate(&alice, Amount::new(40), "").unwrap();
        ledger.donate(&alice, Amount::new(60), "").unwrap();

        let receipt = ledger.withdraw(&owner).unwrap();
        assert_eq!(receipt.owner, owner);
        assert_eq!(receipt.amount, Amount::new(100));

        assert_eq!(ledger.balance().unwrap(), Amount::ZERO);
        assert_eq!(sink.total_to(&owner), Amount::new(100));

        // Lifetime totals and donor records survive the sweep.
        let totals = ledger.totals().unwrap();
        assert_eq!(totals.total_amount, Amount::new(100));
        assert_eq!(totals.donor_count, 1);
        assert_eq!(ledger.donor(&alice).unwrap().total_amount, Amount::new(100));
        assert_eq!(ledger.donor_history(&alice).unwrap().len(), 2);
    }

    #[test]
    fn withdraw_requires_owner() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let ledger = open_ledger(&owner);

        ledger.donate(&alice, Amount::new(50), "").unwrap();

        let err = ledger.withdraw(&alice).unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized { caller: alice });
        assert_eq!(ledger.balance().unwrap(), Amount::new(50));
    }

    #[test]
    fn withdraw_of_empty_balance_is_rejected() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let ledger = open_ledger(&owner);

        assert_eq!(
            ledger.withdraw(&owner).unwrap_err(),
            LedgerError::NothingToWithdraw
        );

        ledger.donate(&alice, Amount::new(50), "").unwrap();
        ledger.withdraw(&owner).unwrap();

        // A second sweep has nothing left to take.
        assert_eq!(
            ledger.withdraw(&owner).unwrap_err(),
            LedgerError::NothingToWithdraw
        );
    }

    #[test]
    fn unauthorized_reported_before_empty_balance() {
        let owner = AccountId::from_label("owner");
        let stranger = AccountId::from_label("stranger");
        let ledger = open_ledger(&owner);

        // Both conditions hold; the caller check wins.
        let err = ledger.withdraw(&stranger).unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized { caller: stranger });
    }

    #[test]
    fn failed_transfer_preserves_balance() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let ledger = open_ledger(&owner).with_sink(Arc::new(FailingSink::new("wire down")));

        ledger.donate(&alice, Amount::new(75), "").unwrap();

        let err = ledger.withdraw(&owner).unwrap_err();
        assert_eq!(
            err,
            LedgerError::TransferFailure {
                reason: "wire down".into()
            }
        );

        // The aborted sweep must leave everything as it was.
        assert_eq!(ledger.balance().unwrap(), Amount::new(75));
        assert_eq!(ledger.totals().unwrap().total_amount, Amount::new(75));
        assert!(ledger.donate(&alice, Amount::new(25), "").is_ok());
        assert_eq!(ledger.balance().unwrap(), Amount::new(100));
    }

    #[test]
    fn donations_resume_after_withdraw() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let ledger = open_ledger(&owner);

        ledger.donate(&alice, Amount::new(30), "").unwrap();
        ledger.withdraw(&owner).unwrap();
        ledger.donate(&alice, Amount::new(20), "").unwrap();

        let totals = ledger.totals().unwrap();
        assert_eq!(totals.balance, Amount::new(20));
        assert_eq!(totals.total_amount, Amount::new(50));
    }

    #[test]
    fn overflowing_donation_is_rejected_atomically() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let bob = AccountId::from_label("bob");
        let ledger = InMemoryLedger::new(owner).with_config(LedgerConfig {
            minimum_donation: Amount::ZERO,
        });

        ledger.donate(&alice, Amount::new(u128::MAX), "max").unwrap();

        // Bob's donation would overflow the aggregate total; nothing about
        // bob may be recorded.
        let err = ledger.donate(&bob, Amount::new(1), "over").unwrap_err();
        assert_eq!(err, LedgerError::Overflow);
        assert_eq!(ledger.donor(&bob).unwrap(), DonorSummary::empty());
        assert_eq!(ledger.total_donors().unwrap(), 1);
        assert_eq!(ledger.totals().unwrap().total_amount, Amount::new(u128::MAX));

        // Alice hitting her own cap is rejected the same way.
        let err = ledger.donate(&alice, Amount::new(1), "again").unwrap_err();
        assert_eq!(err, LedgerError::Overflow);
        assert_eq!(ledger.donor_history(&alice).unwrap().len(), 1);
    }

    #[test]
    fn stamps_never_run_backwards() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let clock = Arc::new(ManualClock::new(Timestamp::from_secs(100)));
        let ledger = open_ledger(&owner).with_clock(clock.clone());

        let first = ledger.donate(&alice, Amount::new(20), "").unwrap();
        assert_eq!(first.timestamp, Timestamp::from_secs(100));

        // Wall clock regresses; the stamp holds.
        clock.set(Timestamp::from_secs(50));
        let second = ledger.donate(&alice, Amount::new(20), "").unwrap();
        assert_eq!(second.timestamp, Timestamp::from_secs(100));

        clock.set(Timestamp::from_secs(200));
        let third = ledger.donate(&alice, Amount::new(20), "").unwrap();
        assert_eq!(third.timestamp, Timestamp::from_secs(200));

        let history = ledger.donor_history(&alice).unwrap();
        assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn donors_are_listed_sorted() {
        let owner = AccountId::from_label("owner");
        let ledger = open_ledger(&owner);

        for label in ["carol", "alice", "bob"] {
            ledger
                .donate(&AccountId::from_label(label), Amount::new(20), "")
                .unwrap();
        }

        let donors = ledger.donors().unwrap();
        assert_eq!(donors.len(), 3);
        assert!(donors.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn events_follow_commit_order() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let bob = AccountId::from_label("bob");
        let hub = Arc::new(EventHub::default());
        let ledger = open_ledger(&owner).with_events(hub.clone());

        let mut stream = hub.subscribe(EventFilter::default());

        ledger.donate(&alice, Amount::new(20), "gm").unwrap();
        ledger.donate(&bob, Amount::new(30), "").unwrap();
        ledger.withdraw(&owner).unwrap();

        let first = stream.try_recv().unwrap();
        assert!(first.verify_integrity());
        match first.payload {
            EventPayload::Donate {
                donor,
                amount,
                message,
            } => {
                assert_eq!(donor, alice);
                assert_eq!(amount, Amount::new(20));
                assert_eq!(message, "gm");
            }
            other => panic!("unexpected payload: {other:?}"),
        }

        let second = stream.try_recv().unwrap();
        assert!(matches!(second.payload, EventPayload::Donate { .. }));

        let third = stream.try_recv().unwrap();
        match third.payload {
            EventPayload::Withdraw { owner: to, amount } => {
                assert_eq!(to, owner);
                assert_eq!(amount, Amount::new(50));
            }
            other => panic!("unexpected payload: {other:?}"),
        }

        assert!(stream.try_recv().is_err());
    }

    #[test]
    fn rejected_donation_publishes_nothing() {
        let owner = AccountId::from_label("owner");
        let alice = AccountId::from_label("alice");
        let hub = Arc::new(EventHub::default());
        let ledger = open_ledger(&owner).with_events(hub.clone());

        let mut stream = hub.subscribe(EventFilter::default());

        assert!(ledger.donate(&alice, Amount::new(5), "").is_err());
        assert!(ledger.withdraw(&alice).is_err());
        assert!(stream.try_recv().is_err());
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        #[derive(Clone, Debug)]
        enum Op {
            Donate {
                donor: usize,
                amount: u64,
                message: String,
            },
            Withdraw,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (0..4usize, 1..10_000u64, "[a-z ]{0,12}").prop_map(
                    |(donor, amount, message)| Op::Donate {
                        donor,
                        amount,
                        message,
                    }
                ),
                1 => Just(Op::Withdraw),
            ]
        }

        proptest! {
            #[test]
            fn aggregates_match_a_model(ops in prop::collection::vec(op_strategy(), 1..60)) {
                let owner = AccountId::from_label("owner");
                let sink = Arc::new(RecordingSink::new());
                let ledger = InMemoryLedger::new(owner.clone())
                    .with_config(LedgerConfig {
                        minimum_donation: Amount::ZERO,
                    })
                    .with_sink(sink.clone());

                let donors: Vec<AccountId> = (0..4)
                    .map(|i| AccountId::from_label(&format!("donor-{i}")))
                    .collect();

                let mut model_total = 0u128;
                let mut model_balance = 0u128;
                let mut model_withdrawn = 0u128;
                let mut model_donors = HashSet::new();

                for op in ops {
                    match op {
                        Op::Donate { donor, amount, message } => {
                            let account = &donors[donor];
                            let receipt = ledger
                                .donate(account, Amount::new(amount as u128), &message)
                                .unwrap();
                            model_total += amount as u128;
                            model_balance += amount as u128;
                            prop_assert_eq!(
                                receipt.first_donation,
                                model_donors.insert(account.clone())
                            );
                        }
                        Op::Withdraw => match ledger.withdraw(&owner) {
                            Ok(receipt) => {
                                prop_assert_eq!(receipt.amount.base_units(), model_balance);
                                model_withdrawn += model_balance;
                                model_balance = 0;
                            }
                            Err(err) => {
                                prop_assert_eq!(err, LedgerError::NothingToWithdraw);
                                prop_assert_eq!(model_balance, 0);
                            }
                        },
                    }
                }

                let totals = ledger.totals().unwrap();
                prop_assert_eq!(totals.total_amount.base_units(), model_total);
                prop_assert_eq!(totals.balance.base_units(), model_balance);
                prop_assert_eq!(totals.donor_count, model_donors.len() as u64);
                prop_assert_eq!(sink.total_to(&owner).base_units(), model_withdrawn);
            }

            #[test]
            fn histories_replay_inputs(
                seq in prop::collection::vec((0..3usize, 1..1_000u64, "[ -~]{0,16}"), 1..40)
            ) {
                let owner = AccountId::from_label("owner");
                let ledger = InMemoryLedger::new(owner).with_config(LedgerConfig {
                    minimum_donation: Amount::ZERO,
                });

                let donors: Vec<AccountId> = (0..3)
                    .map(|i| AccountId::from_label(&format!("donor-{i}")))
                    .collect();

                let mut model: Vec<Vec<(u64, String)>> = vec![Vec::new(); 3];
                for (idx, amount, message) in &seq {
                    ledger
                        .donate(&donors[*idx], Amount::new(*amount as u128), message)
                        .unwrap();
                    model[*idx].push((*amount, message.clone()));
                }

                for (idx, expected) in model.iter().enumerate() {
                    let history = ledger.donor_history(&donors[idx]).unwrap();
                    prop_assert_eq!(history.len(), expected.len());
                    for (contribution, (amount, message)) in history.iter().zip(expected) {
                        prop_assert_eq!(contribution.amount.base_units(), *amount as u128);
                        prop_assert_eq!(&contribution.message, message);
                    }
                    prop_assert!(history
                        .windows(2)
                        .all(|w| w[0].timestamp <= w[1].timestamp));

                    let summary = ledger.donor(&donors[idx]).unwrap();
                    match expected.last() {
                        Some((_, message)) => {
                            prop_assert_eq!(&summary.latest_message, message)
                        }
                        None => prop_assert_eq!(summary, DonorSummary::empty()),
                    }
                }
            }
        }
    }
}
