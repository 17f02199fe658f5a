//! Ledger
//!
//! Custodial balance ledger. Owns the per-account balances and the owner
//! identity, validates every deposit and withdrawal, and emits one event per
//! successful mutation.

pub mod settlement;

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AccountId, Amount, Balance, LedgerEvent};
use crate::error::{LedgerError, LedgerResult};

pub use settlement::{Payout, PayoutQueue, Settlement, SettlementError};

/// Receives ledger events synchronously, in emission order.
pub trait EventListener {
    fn on_event(&self, event: &LedgerEvent);
}

impl<F> EventListener for F
where
    F: Fn(&LedgerEvent),
{
    fn on_event(&self, event: &LedgerEvent) {
        self(event)
    }
}

/// Serializable ledger state: owner plus the full event journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub ledger_id: Uuid,
    pub owner: AccountId,
    pub created_at: DateTime<Utc>,
    pub events: Vec<LedgerEvent>,
}

impl LedgerSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Custodial Ledger
///
/// # Invariants
/// - Every balance is non-negative (enforced by `Balance`)
/// - The sum of all balances equals `total_held()`
/// - `owner()` never changes after creation
/// - A failed call leaves balances, journal and listeners untouched
pub struct Ledger<S = PayoutQueue> {
    id: Uuid,
    owner: AccountId,
    created_at: DateTime<Utc>,
    balances: HashMap<AccountId, Balance>,
    total_held: Balance,
    events: Vec<LedgerEvent>,
    listeners: Vec<Box<dyn EventListener>>,
    settlement: S,
}

impl Ledger<PayoutQueue> {
    /// Create a ledger owned by `owner`, queueing payouts for the host.
    pub fn create(owner: AccountId) -> Self {
        Self::with_settlement(owner, PayoutQueue::new())
    }
}

impl<S: Settlement> Ledger<S> {
    /// Create a ledger owned by `owner` that releases value through `settlement`.
    pub fn with_settlement(owner: AccountId, settlement: S) -> Self {
        let ledger = Self::empty(Uuid::new_v4(), owner, Utc::now(), settlement);
        tracing::info!(ledger_id = %ledger.id, owner = %owner, "Ledger created");
        ledger
    }

    fn empty(id: Uuid, owner: AccountId, created_at: DateTime<Utc>, settlement: S) -> Self {
        Self {
            id,
            owner,
            created_at,
            balances: HashMap::new(),
            total_held: Balance::zero(),
            events: Vec::new(),
            listeners: Vec::new(),
            settlement,
        }
    }

    /// Rebuild a ledger from a previously emitted journal.
    ///
    /// Every event is re-validated; a journal that would overdraw an account,
    /// overflow a balance or contain a zero deposit is rejected, as is one
    /// whose sequence numbers are not exactly 1, 2, 3, ... Withdrawals are
    /// not released again through `settlement`.
    pub fn replay(owner: AccountId, events: Vec<LedgerEvent>, settlement: S) -> LedgerResult<Self> {
        Self::empty(Uuid::new_v4(), owner, Utc::now(), settlement).apply_journal(events)
    }

    /// Restore a ledger from a snapshot, keeping its id and creation time.
    pub fn restore(snapshot: LedgerSnapshot, settlement: S) -> LedgerResult<Self> {
        Self::empty(snapshot.ledger_id, snapshot.owner, snapshot.created_at, settlement)
            .apply_journal(snapshot.events)
    }

    fn apply_journal(mut self, events: Vec<LedgerEvent>) -> LedgerResult<Self> {
        for event in events {
            let expected = self.events.len() as u64 + 1;
            if event.sequence() != expected {
                tracing::warn!(
                    ledger_id = %self.id,
                    expected,
                    found = event.sequence(),
                    "Journal sequence gap"
                );
                return Err(LedgerError::SequenceMismatch {
                    expected,
                    found: event.sequence(),
                });
            }

            match &event {
                LedgerEvent::Deposited { amount, account, .. } => {
                    self.credit(*account, *amount)?;
                }
                LedgerEvent::Withdrawn { amount, account, .. } => {
                    self.debit(*account, *amount)?;
                }
            }
            self.events.push(event);
        }

        tracing::info!(
            ledger_id = %self.id,
            owner = %self.owner,
            events = self.events.len(),
            total_held = %self.total_held,
            "Ledger replayed"
        );
        Ok(self)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Credit `amount` (already escrowed by the host) to `caller`.
    ///
    /// # Errors
    /// - `LedgerError::ZeroDeposit` if `amount` is zero
    /// - `LedgerError::BalanceOverflow` if the balance cannot hold the result
    pub fn deposit(&mut self, caller: AccountId, amount: Amount) -> LedgerResult<&LedgerEvent> {
        if amount.is_zero() {
            tracing::warn!(ledger_id = %self.id, account = %caller, "Rejected zero deposit");
            return Err(LedgerError::ZeroDeposit);
        }

        let sequence = self.next_sequence()?;
        if let Err(e) = self.credit(caller, amount) {
            tracing::warn!(ledger_id = %self.id, account = %caller, amount = %amount, error = %e, "Deposit rejected");
            return Err(e);
        }

        tracing::debug!(
            ledger_id = %self.id,
            account = %caller,
            amount = %amount,
            balance = %self.balance_of(caller),
            "Deposited"
        );

        Ok(self.emit(LedgerEvent::Deposited {
            amount,
            account: caller,
            sequence,
            occurred_at: Utc::now(),
        }))
    }

    /// Debit `amount` from `caller` and ask the settlement layer to release it.
    ///
    /// The balance is decremented before `Settlement::release` runs. If the
    /// release fails the decrement is undone and no event is emitted.
    /// Withdrawing zero succeeds without changing any balance.
    ///
    /// # Errors
    /// - `LedgerError::InsufficientBalance` if `amount` exceeds the balance
    /// - `LedgerError::Settlement` if the release was refused
    pub fn withdraw(&mut self, caller: AccountId, amount: Amount) -> LedgerResult<&LedgerEvent> {
        let sequence = self.next_sequence()?;
        let before = self.balance_of(caller);
        let total_before = self.total_held;

        if let Err(e) = self.debit(caller, amount) {
            tracing::warn!(
                ledger_id = %self.id,
                account = %caller,
                amount = %amount,
                balance = %before,
                error = %e,
                "Withdrawal rejected"
            );
            return Err(e);
        }

        if let Err(e) = self.settlement.release(caller, amount) {
            tracing::error!(
                ledger_id = %self.id,
                account = %caller,
                amount = %amount,
                error = %e,
                "Settlement failed, rolling back withdrawal"
            );
            self.balances.insert(caller, before);
            self.total_held = total_before;
            return Err(e.into());
        }

        tracing::debug!(
            ledger_id = %self.id,
            account = %caller,
            amount = %amount,
            balance = %self.balance_of(caller),
            "Withdrawn"
        );

        Ok(self.emit(LedgerEvent::Withdrawn {
            amount,
            account: caller,
            sequence,
            occurred_at: Utc::now(),
        }))
    }

    /// Register a listener notified after every successful mutation.
    pub fn subscribe<L>(&mut self, listener: L)
    where
        L: EventListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current balance of `account`; zero for accounts never seen.
    pub fn balance_of(&self, account: AccountId) -> Balance {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Total value held in custody across all accounts
    pub fn total_held(&self) -> Balance {
        self.total_held
    }

    /// Every event emitted so far, in order
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn settlement(&self) -> &S {
        &self.settlement
    }

    pub fn settlement_mut(&mut self) -> &mut S {
        &mut self.settlement
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            ledger_id: self.id,
            owner: self.owner,
            created_at: self.created_at,
            events: self.events.clone(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Checked credit of balance and custody total; nothing is written on error.
    fn credit(&mut self, account: AccountId, amount: Amount) -> LedgerResult<()> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroDeposit);
        }

        let balance = self
            .balance_of(account)
            .credit(&amount)
            .ok_or(LedgerError::BalanceOverflow { account })?;
        let total = self
            .total_held
            .credit(&amount)
            .ok_or(LedgerError::BalanceOverflow { account })?;

        self.balances.insert(account, balance);
        self.total_held = total;
        Ok(())
    }

    /// Checked debit of balance and custody total; nothing is written on error.
    fn debit(&mut self, account: AccountId, amount: Amount) -> LedgerResult<()> {
        let available = self.balance_of(account);
        if !available.is_sufficient_for(&amount) {
            return Err(LedgerError::InsufficientBalance {
                account,
                requested: amount,
                available,
            });
        }
        if amount.is_zero() {
            return Ok(());
        }

        let balance = available
            .debit(&amount)
            .ok_or(LedgerError::BalanceUnderflow { account })?;
        let total = self
            .total_held
            .debit(&amount)
            .ok_or(LedgerError::BalanceUnderflow { account })?;

        self.balances.insert(account, balance);
        self.total_held = total;
        Ok(())
    }

    fn next_sequence(&self) -> LedgerResult<u64> {
        match self.events.last() {
            None => Ok(1),
            Some(last) => last
                .sequence()
                .checked_add(1)
                .ok_or(LedgerError::SequenceOverflow),
        }
    }

    fn emit(&mut self, event: LedgerEvent) -> &LedgerEvent {
        for listener in &self.listeners {
            listener.on_event(&event);
        }
        self.events.push(event);
        // Just pushed.
        &self.events[self.events.len() - 1]
    }
}

impl<S: fmt::Debug> fmt::Debug for Ledger<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("accounts", &self.balances.len())
            .field("total_held", &self.total_held)
            .field("events", &self.events.len())
            .field("listeners", &self.listeners.len())
            .field("settlement", &self.settlement)
            .finish()
    }
}
