//! Token amounts in USDT's smallest unit (6 decimals)

use std::fmt;

use alloy::primitives::{
    utils::{format_units, parse_units},
    U256,
};
use eyre::{bail, Result};
use serde::{Deserialize, Serialize};

/// USDT has 6 decimals
pub const USDT_DECIMALS: u8 = 6;

/// A non-negative token quantity in USDT's smallest unit.
///
/// Conversions to and from decimal strings are exact within the token's
/// 6-decimal precision; no floating point is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// Zero tokens
    pub const ZERO: Self = Self(U256::ZERO);

    /// Wrap a raw smallest-unit value
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// The raw smallest-unit value
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Parse a positive decimal string into smallest units.
    ///
    /// Rejects empty, zero, negative, malformed, and over-precise input
    /// (more than 6 fractional digits) before any scaling happens.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            bail!("Amount is empty");
        }
        if let Some((_, fraction)) = input.split_once('.') {
            if fraction.len() > USDT_DECIMALS as usize {
                bail!("Amount has more than {USDT_DECIMALS} decimal places");
            }
        }

        let parsed = parse_units(input, USDT_DECIMALS)?;
        if parsed.is_negative() {
            bail!("Amount must be positive");
        }
        let raw = parsed.get_absolute();
        if raw.is_zero() {
            bail!("Amount must be positive");
        }

        Ok(Self(raw))
    }

    /// Render as a decimal string with trailing zeros trimmed.
    ///
    /// Exact inverse of [`TokenAmount::parse`] within the token's precision.
    pub fn to_decimal_string(&self) -> String {
        let formatted =
            format_units(self.0, USDT_DECIMALS).expect("token decimal count is a valid unit");
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Render with exactly two decimal places for display, rounding half up
    /// at the dropped digits.
    pub fn format_display(&self) -> String {
        let hundredths = (self.0 + U256::from(5_000u64)) / U256::from(10_000u64);
        let whole = hundredths / U256::from(100u64);
        let cents = hundredths % U256::from(100u64);
        format!("{whole}.{:02}", cents.to::<u64>())
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}
