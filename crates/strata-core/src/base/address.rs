//! Canonical EVM wallet address.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::Address;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

use super::utils::{decode_prefixed, encode_prefixed};

/// Size of an EVM address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Errors raised while parsing a wallet address.
#[derive(Debug, Error, PartialEq)]
pub enum AddressError {
    /// The input is not 40 hex characters (optionally `0x`-prefixed).
    #[error("Invalid address `{input}`: {source}")]
    InvalidHex {
        /// The rejected input.
        input: String,
        /// The underlying decoding error.
        source: hex::FromHexError,
    },
    /// The zero address cannot receive an airdrop.
    #[error("Zero address not allowed")]
    ZeroAddress,
}

/// A wallet address in canonical form.
///
/// Parsing is case-insensitive and the textual form is always lowercase, so two spellings of
/// the same account compare equal and hash to the same leaf.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct WalletAddress(Address);

impl WalletAddress {
    /// Wrap raw address bytes.
    ///
    /// # Errors
    /// Returns [`AddressError::ZeroAddress`] for the all-zero address.
    pub fn from_bytes(bytes: [u8; ADDRESS_SIZE]) -> Result<Self, AddressError> {
        let address = Address::from(bytes);
        if address.is_zero() {
            return Err(AddressError::ZeroAddress);
        }
        Ok(Self(address))
    }

    /// The raw 20 address bytes, as used in leaf encoding.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0.0.0
    }
}

impl FromStr for WalletAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_prefixed::<ADDRESS_SIZE>(s).map_err(|source| AddressError::InvalidHex {
            input: s.trim().to_owned(),
            source,
        })?;
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_prefixed(self.0.as_slice()))
    }
}
