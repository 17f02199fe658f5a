//! Settlement layer
//!
//! The ledger only keeps the books. Moving value out of custody is delegated
//! to a `Settlement` implementation supplied by the host.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount};

/// Errors reported by a settlement layer when it cannot release value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettlementError {
    #[error("release rejected: {0}")]
    Rejected(String),

    #[error("settlement layer unavailable")]
    Unavailable,
}

/// Host-side value release.
///
/// Called by `Ledger::withdraw` after the caller's balance has already been
/// decremented. Returning an error rolls the withdrawal back.
pub trait Settlement {
    fn release(&mut self, to: AccountId, amount: Amount) -> Result<(), SettlementError>;
}

/// A single value-release request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub to: AccountId,
    pub amount: Amount,
}

/// Settlement that queues payouts in request order for the host to deliver.
#[derive(Debug, Clone, Default)]
pub struct PayoutQueue {
    payouts: Vec<Payout>,
}

impl PayoutQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payouts(&self) -> &[Payout] {
        &self.payouts
    }

    /// Take all queued payouts, leaving the queue empty
    pub fn drain(&mut self) -> Vec<Payout> {
        std::mem::take(&mut self.payouts)
    }

    pub fn is_empty(&self) -> bool {
        self.payouts.is_empty()
    }
}

impl Settlement for PayoutQueue {
    fn release(&mut self, to: AccountId, amount: Amount) -> Result<(), SettlementError> {
        self.payouts.push(Payout { to, amount });
        Ok(())
    }
}
