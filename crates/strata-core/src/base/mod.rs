//! Foundational primitive types and byte/serde helpers.

mod address;
mod amount;
mod hash;
mod utils;

pub use address::{ADDRESS_SIZE, AddressError, WalletAddress};
pub use amount::{AmountError, DEFAULT_TOKEN_DECIMALS, TokenAmount};
pub use hash::{HASH_SIZE, MerkleHash, MerkleProof};
