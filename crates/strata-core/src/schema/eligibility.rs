use serde::{Deserialize, Serialize};

use crate::base::{MerkleProof, TokenAmount, WalletAddress};

/// Why an address cannot claim from a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibilityReason {
    /// The address is not in the recipient list.
    NotListed,
    /// Custom distribution entry without an amount, so no leaf can be computed.
    MissingAmount,
    /// The proof does not lead to the expected root (wrong or stale distribution).
    RootMismatch,
}

/// Outcome of a claim-time eligibility check.
///
/// Not being on the list is a routine outcome, so it is data rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Eligibility {
    /// The address is in the tree; `proof` is what the claim transaction submits.
    Eligible {
        /// Canonical claimant address.
        address: WalletAddress,
        /// Claimable amount in base units.
        amount: TokenAmount,
        /// Proof to pass to `claim(bytes32[])`.
        proof: MerkleProof,
    },
    /// The address cannot claim.
    Ineligible {
        /// Canonical claimant address.
        address: WalletAddress,
        /// Why the check failed.
        reason: IneligibilityReason,
    },
}

impl Eligibility {
    /// Whether the address may claim.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible { .. })
    }

    /// The proof to submit, if eligible.
    #[must_use]
    pub const fn proof(&self) -> Option<&MerkleProof> {
        match self {
            Self::Eligible { proof, .. } => Some(proof),
            Self::Ineligible { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ineligible_json_format() {
        let address: WalletAddress = "0xcccccccccccccccccccccccccccccccccccccc03"
            .parse()
            .expect("address should parse");
        let outcome = Eligibility::Ineligible {
            address,
            reason: IneligibilityReason::NotListed,
        };
        assert!(!outcome.is_eligible());
        assert!(outcome.proof().is_none());

        let json = serde_json::to_value(&outcome).expect("outcome should serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "status": "ineligible",
                "address": "0xcccccccccccccccccccccccccccccccccccccc03",
                "reason": "not_listed",
            })
        );
    }
}
