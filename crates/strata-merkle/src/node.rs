//! Leaf and node hashing.
//!
//! Both use Keccak-256, matching the distributor contract:
//! a leaf is `keccak256(abi.encodePacked(account, amount))` and an internal node is
//! `keccak256(min(a, b) || max(a, b))`.

use alloy_primitives::keccak256;
use strata_core::base::{MerkleHash, TokenAmount, WalletAddress};

/// Hash a recipient's claim into a leaf.
///
/// The 52-byte leaf preimage (20-byte address, 32-byte big-endian amount) can never be
/// mistaken for a 64-byte node preimage.
#[must_use]
pub fn leaf_hash(address: &WalletAddress, amount: &TokenAmount) -> MerkleHash {
    let preimage = [address.as_bytes().as_slice(), amount.to_be_bytes().as_slice()].concat();
    MerkleHash::new(keccak256(preimage).0)
}

/// Combine two sibling nodes.
///
/// The pair is sorted before hashing, so a proof does not need to record whether each
/// sibling sits on the left or the right.
#[must_use]
pub fn hash_pair(a: &MerkleHash, b: &MerkleHash) -> MerkleHash {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let preimage = [low.as_bytes().as_slice(), high.as_bytes().as_slice()].concat();
    MerkleHash::new(keccak256(preimage).0)
}
