//! Custodial Ledger Library
//!
//! Per-account native-currency balances with checked deposit/withdraw rules
//! and an ordered event journal.

pub mod config;
pub mod domain;
pub mod ledger;
pub mod telemetry;

mod error;

pub use config::Config;
pub use domain::{AccountId, Amount, AmountError, Balance, LedgerEvent};
pub use error::{ErrorKind, LedgerError, LedgerResult};
pub use ledger::{EventListener, Ledger, LedgerSnapshot, Payout, PayoutQueue, Settlement, SettlementError};
