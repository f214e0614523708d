//! CLI-independent configuration types.

use std::path::PathBuf;

use strata_core::base::{MerkleHash, WalletAddress};

/// Configuration shared by every command that touches the distribution store.
#[derive(Debug, Clone)]
pub struct CommonConfig {
    /// JSON file holding pending and deployed distributions.
    pub store_file: PathBuf,
}

/// Selects a pending distribution record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelector {
    /// By recipient list id.
    Id(String),
    /// By Merkle root.
    Root(MerkleHash),
}

/// Selects any stored distribution record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionLookup {
    /// By deployed distributor contract address.
    Distributor(WalletAddress),
    /// By Merkle root.
    Root(MerkleHash),
    /// By recipient list id.
    Id(String),
}

impl From<RecordSelector> for DistributionLookup {
    fn from(selector: RecordSelector) -> Self {
        match selector {
            RecordSelector::Id(id) => Self::Id(id),
            RecordSelector::Root(root) => Self::Root(root),
        }
    }
}

/// Where the distributor contract address of a deployment comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributorSource {
    /// Address given directly.
    Address(WalletAddress),
    /// Address decoded from an exported creation transaction receipt.
    Receipt {
        /// Receipt JSON file.
        file: PathBuf,
        /// Factory event signature, e.g. `AirdropCreated(address,address)`.
        event_signature: Option<String>,
    },
}

/// Distribution mode as selected on the command line, before amounts are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSelection {
    /// Every recipient receives `--amount`.
    Equal,
    /// Every recipient carries its own amount column.
    Custom,
}

/// Inputs of `distribution build`.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Recipient list files, merged in order.
    pub recipient_files: Vec<PathBuf>,
    /// Distribution mode.
    pub mode: ModeSelection,
    /// Human-readable shared amount for equal distributions.
    pub amount: Option<String>,
    /// Token decimals amounts are parsed with.
    pub decimals: u8,
    /// Record id; derived from the file names when absent.
    pub id: Option<String>,
    /// Where to write the record JSON.
    pub out: Option<PathBuf>,
}
