//! Error handling module
//!
//! Centralized ledger error types. Every error aborts the call that raised it
//! with no balance mutation and no notification.

use crate::domain::{AccountId, Amount, Balance};
use crate::ledger::SettlementError;

/// Ledger-wide Result type
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Broad category of a ledger failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The call's inputs violate a business rule
    Validation,
    /// Checked balance arithmetic failed
    Arithmetic,
    /// The settlement layer refused to release value
    Settlement,
    /// A replayed journal is inconsistent
    Journal,
}

/// Ledger error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    // Validation errors
    #[error("deposit amount must be greater than zero")]
    ZeroDeposit,

    #[error("insufficient balance")]
    InsufficientBalance {
        account: AccountId,
        requested: Amount,
        available: Balance,
    },

    // Arithmetic errors
    #[error("balance overflow")]
    BalanceOverflow { account: AccountId },

    #[error("balance underflow")]
    BalanceUnderflow { account: AccountId },

    #[error("event sequence exhausted")]
    SequenceOverflow,

    // Journal errors
    #[error("journal out of sequence: expected {expected}, found {found}")]
    SequenceMismatch { expected: u64, found: u64 },

    // Settlement errors
    #[error("settlement failed: {0}")]
    Settlement(#[from] SettlementError),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::ZeroDeposit | LedgerError::InsufficientBalance { .. } => {
                ErrorKind::Validation
            }
            LedgerError::BalanceOverflow { .. }
            | LedgerError::BalanceUnderflow { .. }
            | LedgerError::SequenceOverflow => ErrorKind::Arithmetic,
            LedgerError::SequenceMismatch { .. } => ErrorKind::Journal,
            LedgerError::Settlement(_) => ErrorKind::Settlement,
        }
    }

    /// Stable machine-readable code for matching on cause
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::ZeroDeposit => "zero_deposit",
            LedgerError::InsufficientBalance { .. } => "insufficient_balance",
            LedgerError::BalanceOverflow { .. } => "balance_overflow",
            LedgerError::BalanceUnderflow { .. } => "balance_underflow",
            LedgerError::SequenceOverflow => "sequence_overflow",
            LedgerError::SequenceMismatch { .. } => "sequence_mismatch",
            LedgerError::Settlement(_) => "settlement_failed",
        }
    }

    /// Check if this is a client error (caller's fault)
    pub fn is_client_error(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
