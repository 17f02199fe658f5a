//! Domain module
//!
//! Value types and events shared by the ledger.

pub mod account;
pub mod amount;
pub mod events;
pub mod units;

pub use account::{AccountId, AccountIdError};
pub use amount::{Amount, AmountError, Balance};
pub use events::LedgerEvent;
