//! Configuration module
//!
//! Loads host configuration from environment variables.

use std::env;

use crate::domain::AccountId;

/// Host configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Ledger owner; a random address is provisioned when unset
    pub owner: Option<AccountId>,

    /// Environment (development, production)
    pub environment: String,

    /// Display symbol of the native unit
    pub native_symbol: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value if set
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let owner = match lookup("LEDGER_OWNER") {
            Some(value) if !value.trim().is_empty() => Some(
                value
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("LEDGER_OWNER"))?,
            ),
            _ => None,
        };

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let native_symbol = lookup("LEDGER_NATIVE_SYMBOL").unwrap_or_else(|| "ETH".to_string());

        Ok(Self {
            owner,
            environment,
            native_symbol,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: None,
            environment: "development".to_string(),
            native_symbol: "ETH".to_string(),
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
