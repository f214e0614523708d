use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::base::{MerkleProof, TokenAmount, WalletAddress};

/// One airdrop recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Recipient {
    /// Canonical (lowercase) wallet address.
    #[schemars(with = "String")]
    pub address: WalletAddress,
    /// Per-recipient amount in base units. Only present for custom distributions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub amount: Option<TokenAmount>,
}

impl Recipient {
    /// A recipient entitled to the distribution's shared amount.
    #[must_use]
    pub const fn new(address: WalletAddress) -> Self {
        Self {
            address,
            amount: None,
        }
    }

    /// A recipient with its own amount.
    #[must_use]
    pub const fn with_amount(address: WalletAddress, amount: TokenAmount) -> Self {
        Self {
            address,
            amount: Some(amount),
        }
    }
}

/// A recipient paired with the proof persisted for it at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientWithProof {
    /// The recipient entry.
    #[serde(flatten)]
    pub recipient: Recipient,
    /// Sibling hashes from the recipient's leaf to the root.
    pub proof: MerkleProof,
}
