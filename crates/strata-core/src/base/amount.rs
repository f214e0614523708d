//! Token amounts in base units.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

/// Decimals used by the ERC-20 tokens created through the StrataForge factory.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// Largest `decimals` value whose unit (`10^decimals`) still fits in 256 bits.
const MAX_DECIMALS: u8 = 77;

/// Errors raised while parsing a token amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// No digits were supplied.
    #[error("Amount is empty")]
    Empty,
    /// The input contains something other than digits and a single decimal point.
    #[error("Invalid amount `{0}`: expected an unsigned decimal number")]
    InvalidDigits(String),
    /// More fractional digits than the token supports.
    #[error("Amount `{amount}` has more than {decimals} fractional digits")]
    TooPrecise {
        /// The rejected input.
        amount: String,
        /// The token's decimals.
        decimals: u8,
    },
    /// Token decimals beyond what a 256-bit amount can represent.
    #[error("Unsupported token decimals {0} (maximum is 77)")]
    UnsupportedDecimals(u8),
    /// The value does not fit into 256 bits.
    #[error("Amount `{0}` overflows uint256")]
    Overflow(String),
}

/// An unsigned token amount expressed in the token's smallest unit (Solidity `uint256`).
///
/// The serialized form is the base-unit integer in decimal, so a persisted amount never
/// depends on the decimals it was parsed with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// The zero amount.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Wrap a base-unit value.
    #[must_use]
    pub const fn from_base_units(value: U256) -> Self {
        Self(value)
    }

    /// The base-unit value.
    #[must_use]
    pub const fn base_units(&self) -> U256 {
        self.0
    }

    /// Whether this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == U256::ZERO
    }

    /// Parse a human decimal amount (`"100"`, `"1.5"`) into base units for a token with
    /// `decimals` decimals.
    ///
    /// # Errors
    /// Returns an error for empty or non-numeric input, excess precision, unsupported
    /// decimals, or a value that overflows 256 bits.
    pub fn parse_units(text: &str, decimals: u8) -> Result<Self, AmountError> {
        if decimals > MAX_DECIMALS {
            return Err(AmountError::UnsupportedDecimals(decimals));
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction)
        {
            return Err(AmountError::InvalidDigits(trimmed.to_owned()));
        }

        let fraction = fraction.trim_end_matches('0');
        let scale = usize::from(decimals);
        if fraction.len() > scale {
            return Err(AmountError::TooPrecise {
                amount: trimmed.to_owned(),
                decimals,
            });
        }

        let mut digits = String::with_capacity(whole.len().saturating_add(scale));
        digits.push_str(whole);
        digits.push_str(fraction);
        digits.extend(std::iter::repeat_n('0', scale.saturating_sub(fraction.len())));

        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::ZERO);
        }
        U256::from_str_radix(digits, 10)
            .map(Self)
            .map_err(|_| AmountError::Overflow(trimmed.to_owned()))
    }

    /// Render the amount as a human decimal string for a token with `decimals` decimals.
    #[must_use]
    pub fn format_units(&self, decimals: u8) -> String {
        let digits = self.0.to_string();
        let scale = usize::from(decimals);
        if scale == 0 {
            return digits;
        }
        let padded = format!("{digits:0>width$}", width = scale.saturating_add(1));
        let (whole, fraction) = padded.split_at(padded.len().saturating_sub(scale));
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            whole.to_owned()
        } else {
            format!("{whole}.{fraction}")
        }
    }

    /// Big-endian 32-byte encoding, as laid out by `abi.encodePacked(uint256)`.
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes::<32>()
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked multiplication by a recipient count. Returns `None` on overflow.
    #[must_use]
    pub fn checked_mul_count(self, count: usize) -> Option<Self> {
        let count = u64::try_from(count).ok()?;
        self.0.checked_mul(U256::from(count)).map(Self)
    }
}

impl FromStr for TokenAmount {
    type Err = AmountError;

    /// Parse a base-unit integer (the serialized form).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_units(s, 0)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
