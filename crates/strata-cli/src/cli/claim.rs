//! Claim subcommands.

use std::path::PathBuf;

use strata_core::base::{MerkleHash, WalletAddress};
use strata_sdk::common::DistributionLookup;

use super::constants::{STRATA_DISTRIBUTOR, STRATA_ELIGIBILITY_OUT, STRATA_ONCHAIN_ROOT};
use super::{StoreArgs, parse_address, parse_root};

/// Claim subcommands.
#[derive(Debug, clap::Subcommand)]
pub enum ClaimCommands {
    /// Check whether an address can claim and print its proof.
    Check {
        /// Check arguments.
        #[command(flatten)]
        args: ClaimCheckArgs,
    },
}

/// Distribution the claim is made against.
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct ClaimDistributionArgs {
    /// Distributor contract address.
    #[arg(long, env = STRATA_DISTRIBUTOR, value_parser = parse_address)]
    pub distributor: Option<WalletAddress>,
    /// Merkle root of the distribution.
    #[arg(long, value_parser = parse_root)]
    pub root: Option<MerkleHash>,
}

impl From<ClaimDistributionArgs> for DistributionLookup {
    fn from(args: ClaimDistributionArgs) -> Self {
        match (args.distributor, args.root) {
            (Some(distributor), _) => Self::Distributor(distributor),
            (None, root) => Self::Root(root.unwrap_or_default()),
        }
    }
}

/// Arguments for `claim check`.
#[derive(Debug, clap::Args)]
pub struct ClaimCheckArgs {
    /// Claimant wallet address.
    #[arg(long, value_parser = parse_address)]
    pub address: WalletAddress,
    /// Distribution to check against.
    #[command(flatten)]
    pub distribution: ClaimDistributionArgs,
    /// Merkle root read from the deployed distributor. Proofs are verified against it.
    #[arg(long, env = STRATA_ONCHAIN_ROOT, value_parser = parse_root)]
    pub onchain_root: Option<MerkleHash>,
    /// Write the eligibility JSON to this file instead of stdout.
    #[arg(long, env = STRATA_ELIGIBILITY_OUT)]
    pub out: Option<PathBuf>,
    /// Store arguments.
    #[command(flatten)]
    pub store: StoreArgs,
}
