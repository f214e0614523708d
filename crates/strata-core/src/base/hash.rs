//! 32-byte Merkle hashes and proofs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use super::utils::{decode_prefixed, encode_prefixed};

/// Size of a Merkle hash in bytes.
pub const HASH_SIZE: usize = 32;

/// A Merkle tree node or root (`bytes32` on-chain).
///
/// Ordering is lexicographic over the bytes, which is the same order the on-chain verifier uses
/// when it sorts sibling pairs.
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
pub struct MerkleHash([u8; HASH_SIZE]);

impl MerkleHash {
    /// Create a hash from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; HASH_SIZE] {
        self.0
    }

    /// Borrow the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl From<[u8; HASH_SIZE]> for MerkleHash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<MerkleHash> for [u8; HASH_SIZE] {
    fn from(hash: MerkleHash) -> Self {
        hash.0
    }
}

impl FromStr for MerkleHash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_prefixed(s).map(Self)
    }
}

impl fmt::Display for MerkleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_prefixed(&self.0))
    }
}

/// Sibling hashes from a leaf up to the root, in the order they are applied.
///
/// Serializes as a plain JSON array of hex strings, ready to be passed as `bytes32[]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof(Vec<MerkleHash>);

impl MerkleProof {
    /// Create a proof from its sibling hashes.
    #[must_use]
    pub const fn new(siblings: Vec<MerkleHash>) -> Self {
        Self(siblings)
    }

    /// The sibling hashes.
    #[must_use]
    pub fn siblings(&self) -> &[MerkleHash] {
        &self.0
    }

    /// Number of siblings (tree height above the leaf).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the proof is empty (single-leaf tree).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the proof, returning its sibling hashes.
    #[must_use]
    pub fn into_inner(self) -> Vec<MerkleHash> {
        self.0
    }
}

impl From<Vec<MerkleHash>> for MerkleProof {
    fn from(siblings: Vec<MerkleHash>) -> Self {
        Self(siblings)
    }
}
