//! Domain Events
//!
//! Notifications emitted by the ledger. Each event is an immutable fact about
//! one successful balance mutation; replaying them in order reproduces every
//! account's balance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, Amount};

/// Ledger events, in the order they were emitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LedgerEvent {
    /// Value was deposited by the account (balance increased)
    Deposited {
        amount: Amount,
        account: AccountId,
        sequence: u64,
        occurred_at: DateTime<Utc>,
    },

    /// Value was withdrawn by the account (balance decreased)
    Withdrawn {
        amount: Amount,
        account: AccountId,
        sequence: u64,
        occurred_at: DateTime<Utc>,
    },
}

impl LedgerEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::Deposited { .. } => "Deposited",
            LedgerEvent::Withdrawn { .. } => "Withdrawn",
        }
    }

    /// Get the account this event relates to
    pub fn account(&self) -> AccountId {
        match self {
            LedgerEvent::Deposited { account, .. } => *account,
            LedgerEvent::Withdrawn { account, .. } => *account,
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            LedgerEvent::Deposited { amount, .. } => *amount,
            LedgerEvent::Withdrawn { amount, .. } => *amount,
        }
    }

    /// Position of the event in the ledger's journal, starting at 1
    pub fn sequence(&self) -> u64 {
        match self {
            LedgerEvent::Deposited { sequence, .. } => *sequence,
            LedgerEvent::Withdrawn { sequence, .. } => *sequence,
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::Deposited { occurred_at, .. } => *occurred_at,
            LedgerEvent::Withdrawn { occurred_at, .. } => *occurred_at,
        }
    }

    /// The `(amount, account)` arguments carried by the notification
    pub fn args(&self) -> (Amount, AccountId) {
        (self.amount(), self.account())
    }
}
