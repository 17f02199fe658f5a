//! Amount type
//!
//! Domain primitives for native-currency values, counted in the smallest
//! indivisible unit (wei). Arithmetic on balances is always checked so an
//! overflow or underflow surfaces as an error instead of wrapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amount represents a value attached to (or requested by) a ledger call.
///
/// Zero is a representable amount: whether a zero amount is acceptable is a
/// decision of the operation receiving it, not of the type.
///
/// # Example
/// ```
/// use custodial_ledger::domain::Amount;
///
/// let amount = Amount::from_wei(10_000_000_000_000_000);
/// assert_eq!(amount.wei(), 10_000_000_000_000_000);
/// assert!(!amount.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u128);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must not be negative (got {0})")]
    Negative(String),

    #[error("Amount has too many decimal places (max {max}, got {got})")]
    TooManyDecimals { max: u32, got: u32 },

    #[error("Amount exceeds the representable range")]
    Overflow,

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from a raw wei value.
    pub const fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    /// Get the underlying wei value.
    pub fn wei(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('-') {
            return Err(AmountError::Negative(trimmed.to_string()));
        }
        trimmed
            .parse::<u128>()
            .map(Amount)
            .map_err(|e| AmountError::ParseError(e.to_string()))
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Amount::from_str(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

/// Balance represents the spendable value held for one account.
///
/// A balance can never go below zero: `debit` refuses to produce a negative
/// value and `credit` refuses to wrap past `u128::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Balance(u128);

impl Balance {
    /// Create a zero balance
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    /// Get the underlying wei value
    pub fn wei(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if balance covers the requested amount
    pub fn is_sufficient_for(&self, amount: &Amount) -> bool {
        self.0 >= amount.wei()
    }

    /// Add amount to balance, `None` on overflow
    pub fn credit(&self, amount: &Amount) -> Option<Balance> {
        self.0.checked_add(amount.wei()).map(Balance)
    }

    /// Subtract amount from balance, `None` if the result would be negative
    pub fn debit(&self, amount: &Amount) -> Option<Balance> {
        self.0.checked_sub(amount.wei()).map(Balance)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Balance {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Amount::from_str(&value).map(|amount| Balance(amount.wei()))
    }
}

impl From<Balance> for String {
    fn from(balance: Balance) -> Self {
        balance.0.to_string()
    }
}

impl From<Balance> for Amount {
    fn from(balance: Balance) -> Self {
        Amount(balance.0)
    }
}
