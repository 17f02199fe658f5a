//! Unit conversion
//!
//! Converts between human-readable decimal strings ("0.01" ether) and wei
//! amounts. Parsing goes through `rust_decimal` so malformed input and
//! excess precision are rejected instead of silently rounded.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::amount::{Amount, AmountError};

/// Number of fractional digits of the native unit (1 ether = 10^18 wei).
pub const ETHER_DECIMALS: u32 = 18;

/// Parse a decimal string expressed in units with `decimals` fractional digits.
///
/// # Errors
/// - `AmountError::ParseError` if the string is not a decimal number
/// - `AmountError::Negative` if the value is below zero
/// - `AmountError::TooManyDecimals` if it is more precise than one wei
/// - `AmountError::Overflow` if it does not fit in a wei amount
pub fn parse_units(value: &str, decimals: u32) -> Result<Amount, AmountError> {
    let decimal = Decimal::from_str(value.trim())
        .map_err(|e| AmountError::ParseError(e.to_string()))?;

    if decimal.is_sign_negative() && !decimal.is_zero() {
        return Err(AmountError::Negative(value.trim().to_string()));
    }

    let normalized = decimal.normalize();
    if normalized.scale() > decimals {
        return Err(AmountError::TooManyDecimals {
            max: decimals,
            got: normalized.scale(),
        });
    }

    let unit = 10u128.checked_pow(decimals).ok_or(AmountError::Overflow)?;

    // Whole and fractional parts are scaled separately; scaling the decimal
    // itself would exceed its 96-bit mantissa for large ether values.
    let whole = normalized
        .trunc()
        .to_u128()
        .ok_or(AmountError::Overflow)?;
    let fract = normalized.fract();
    let fract_mantissa = fract.mantissa().unsigned_abs();
    let fract_wei = 10u128
        .checked_pow(decimals - fract.scale())
        .and_then(|scale| fract_mantissa.checked_mul(scale))
        .ok_or(AmountError::Overflow)?;

    whole
        .checked_mul(unit)
        .and_then(|wei| wei.checked_add(fract_wei))
        .map(Amount::from_wei)
        .ok_or(AmountError::Overflow)
}

/// Parse an ether-denominated string into wei.
///
/// ```
/// use custodial_ledger::domain::units::parse_ether;
///
/// assert_eq!(parse_ether("0.01").unwrap().wei(), 10_000_000_000_000_000);
/// ```
pub fn parse_ether(value: &str) -> Result<Amount, AmountError> {
    parse_units(value, ETHER_DECIMALS)
}

/// Format a wei value with `decimals` fractional digits, trailing zeros trimmed.
pub fn format_units(wei: u128, decimals: u32) -> String {
    let Some(unit) = 10u128.checked_pow(decimals) else {
        return wei.to_string();
    };
    if decimals == 0 {
        return wei.to_string();
    }

    let whole = wei / unit;
    let fract = wei % unit;
    if fract == 0 {
        return whole.to_string();
    }

    let digits = format!("{:0width$}", fract, width = decimals as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Format a wei amount as ether.
pub fn format_ether(amount: Amount) -> String {
    format_units(amount.wei(), ETHER_DECIMALS)
}
