//! Claim-time proof verification.

use strata_core::base::{MerkleHash, MerkleProof, WalletAddress};
use strata_core::schema::distribution::{DistributionMode, DistributionRecord};
use strata_core::schema::eligibility::{Eligibility, IneligibilityReason};
use strata_core::schema::recipient::RecipientWithProof;

use crate::node::{hash_pair, leaf_hash};

/// Fold a proof over a leaf, the same way the distributor contract does.
#[must_use]
pub fn compute_root(leaf: &MerkleHash, proof: &MerkleProof) -> MerkleHash {
    proof
        .siblings()
        .iter()
        .fold(*leaf, |node, sibling| hash_pair(&node, sibling))
}

/// Check that `proof` leads from `leaf` to `root`.
#[must_use]
pub fn verify_proof(leaf: &MerkleHash, proof: &MerkleProof, root: &MerkleHash) -> bool {
    compute_root(leaf, proof) == *root
}

/// Decide whether `address` can claim from the distribution with root `expected_root`.
///
/// `recipients` is the recipient list with the proofs produced when the tree was built.
/// The expected root is whatever the caller trusts, typically the one read from the
/// deployed contract, so a stale or foreign recipient list results in
/// [`IneligibilityReason::RootMismatch`] rather than a proof the contract would reject.
#[must_use]
pub fn verify_address_eligibility(
    address: &WalletAddress,
    recipients: &[RecipientWithProof],
    expected_root: &MerkleHash,
    mode: &DistributionMode,
) -> Eligibility {
    let ineligible = |reason| Eligibility::Ineligible {
        address: *address,
        reason,
    };

    let Some(entry) = recipients
        .iter()
        .find(|entry| entry.recipient.address == *address)
    else {
        return ineligible(IneligibilityReason::NotListed);
    };
    let Some(amount) = mode.amount_for(&entry.recipient) else {
        return ineligible(IneligibilityReason::MissingAmount);
    };

    let leaf = leaf_hash(address, &amount);
    if !verify_proof(&leaf, &entry.proof, expected_root) {
        return ineligible(IneligibilityReason::RootMismatch);
    }

    Eligibility::Eligible {
        address: *address,
        amount,
        proof: entry.proof.clone(),
    }
}

/// [`verify_address_eligibility`] against a stored distribution record.
#[must_use]
pub fn verify_record_eligibility(
    address: &WalletAddress,
    record: &DistributionRecord,
    expected_root: &MerkleHash,
) -> Eligibility {
    verify_address_eligibility(
        address,
        &record.recipients_with_proofs(),
        expected_root,
        &record.mode,
    )
}
