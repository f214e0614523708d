use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::recipient::{Recipient, RecipientWithProof};
use crate::base::{MerkleHash, MerkleProof, TokenAmount, WalletAddress};

/// How tokens are split between recipients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DistributionMode {
    /// Every recipient is entitled to the same amount.
    Equal {
        /// Shared per-recipient amount in base units.
        #[schemars(with = "String")]
        amount: TokenAmount,
    },
    /// Every recipient carries its own amount.
    Custom,
}

impl DistributionMode {
    /// Amount the given recipient is entitled to under this mode.
    ///
    /// Returns `None` for a custom-mode recipient without an amount.
    #[must_use]
    pub const fn amount_for(&self, recipient: &Recipient) -> Option<TokenAmount> {
        match self {
            Self::Equal { amount } => Some(*amount),
            Self::Custom => recipient.amount,
        }
    }

    /// Short name used in logs and on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Equal { .. } => "equal",
            Self::Custom => "custom",
        }
    }
}

/// A built airdrop distribution: the recipient set, its Merkle root and one proof per recipient.
///
/// Records are immutable once built. Binding a record to a deployed distributor contract
/// happens in the store, not on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DistributionRecord {
    /// Identifier of the recipient list (usually the source file name).
    pub id: String,
    /// Token decimals the human amounts were parsed with.
    pub decimals: u8,
    /// Distribution mode.
    pub mode: DistributionMode,
    /// Canonical recipients, in input order.
    pub recipients: Vec<Recipient>,
    /// Merkle root to submit to the distributor contract.
    #[schemars(with = "String")]
    pub merkle_root: MerkleHash,
    /// Total tokens the distributor contract must hold, in base units.
    #[schemars(with = "String")]
    pub total_amount: TokenAmount,
    /// Proof for every recipient, keyed by canonical address.
    #[schemars(with = "BTreeMap<String, Vec<String>>")]
    pub proofs: BTreeMap<WalletAddress, MerkleProof>,
}

impl DistributionRecord {
    /// Stored proof for an address.
    #[must_use]
    pub fn proof(&self, address: &WalletAddress) -> Option<&MerkleProof> {
        self.proofs.get(address)
    }

    /// Pair every recipient with its stored proof.
    ///
    /// A recipient without a stored proof gets an empty one, which only verifies for a
    /// single-recipient tree.
    #[must_use]
    pub fn recipients_with_proofs(&self) -> Vec<RecipientWithProof> {
        self.recipients
            .iter()
            .map(|recipient| RecipientWithProof {
                recipient: recipient.clone(),
                proof: self.proof(&recipient.address).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// Number of recipients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// Whether the record has no recipients.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}
