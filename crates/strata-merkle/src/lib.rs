//! Merkle airdrop engine.
//!
//! Builds the canonical Merkle tree over a recipient list and verifies claimant eligibility
//! against a published root, using the same leaf encoding and sorted-pair hashing as the
//! on-chain distributor (`OpenZeppelin` `MerkleProof`).

mod core;
mod node;
mod tree;
mod verify;

pub use core::{MAX_RECIPIENTS, MerkleError};

pub use node::{hash_pair, leaf_hash};
pub use tree::{AirdropTree, MerkleDistribution, create_merkle_tree};
pub use verify::{compute_root, verify_address_eligibility, verify_proof, verify_record_eligibility};
