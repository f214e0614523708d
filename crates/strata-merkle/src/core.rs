//! Shared airdrop tree types and helpers.

use strata_core::base::WalletAddress;
use thiserror::Error;

/// The distributor contract stores the recipient count as `uint32`.
pub const MAX_RECIPIENTS: u32 = u32::MAX;

/// Validation errors raised while building an airdrop tree.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MerkleError {
    /// No recipients were supplied.
    #[error("Recipient list is empty")]
    EmptyRecipients,

    /// The same canonical address appears more than once.
    #[error("Duplicate recipient address {0}")]
    DuplicateAddress(WalletAddress),

    /// A custom distribution entry has no amount.
    #[error("Custom distribution requires an amount for recipient {0}")]
    MissingAmount(WalletAddress),

    /// A custom distribution entry has a zero amount.
    #[error("Recipient {0} has a zero amount")]
    ZeroAmount(WalletAddress),

    /// The shared amount of an equal distribution is zero.
    #[error("Equal distribution amount must be greater than zero")]
    ZeroDefaultAmount,

    /// More recipients than the distributor contract can count.
    #[error("Recipients {0} exceeds maximum supported recipients (2^32 - 1)")]
    TooManyRecipients(usize),

    /// The summed allocation does not fit into `uint256`.
    #[error("Total distribution amount overflows uint256")]
    TotalOverflow,
}

/// Validate that a recipient count is valid for a distribution.
///
/// Returns the count as the contract's `uint32`.
///
/// # Errors
/// Returns an error if the count is zero or exceeds what the contract can record.
pub fn validate_recipient_count(count: usize) -> Result<u32, MerkleError> {
    if count == 0 {
        return Err(MerkleError::EmptyRecipients);
    }
    u32::try_from(count).map_err(|_| MerkleError::TooManyRecipients(count))
}
