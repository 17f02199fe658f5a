//! Account identity
//!
//! Opaque 20-byte address identifying a balance holder.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ADDRESS_LEN: usize = 20;

/// Address of an account holder, printed as `0x`-prefixed lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId([u8; ADDRESS_LEN]);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountIdError {
    #[error("Invalid address hex: {0}")]
    InvalidHex(String),

    #[error("Address must be {ADDRESS_LEN} bytes (got {0})")]
    InvalidLength(usize),
}

impl AccountId {
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Generate a fresh random address (provisioning for hosts and tests).
    pub fn random() -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self)
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let bytes = hex::decode(digits).map_err(|e| AccountIdError::InvalidHex(e.to_string()))?;
        let bytes: [u8; ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| AccountIdError::InvalidLength(b.len()))?;

        Ok(Self(bytes))
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AccountId::from_str(&value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";

    #[test]
    fn test_parse_and_display() {
        let id: AccountId = ADDR.parse().unwrap();
        assert_eq!(id.to_string(), ADDR);
    }

    #[test]
    fn test_parse_accepts_mixed_case_and_no_prefix() {
        let upper: AccountId = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse().unwrap();
        let bare: AccountId = ADDR.trim_start_matches("0x").parse().unwrap();
        assert_eq!(upper, bare);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let result: Result<AccountId, _> = "0xdeadbeef".parse();
        assert_eq!(result, Err(AccountIdError::InvalidLength(4)));
    }

    #[test]
    fn test_parse_rejects_bad_hex() {
        let result: Result<AccountId, _> = "0xzz".parse();
        assert!(matches!(result, Err(AccountIdError::InvalidHex(_))));
    }

    #[test]
    fn test_random_ids_differ() {
        assert_ne!(AccountId::random(), AccountId::random());
    }

    #[test]
    fn test_serde_roundtrip_as_string() {
        let id: AccountId = ADDR.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", ADDR));
    }
}
