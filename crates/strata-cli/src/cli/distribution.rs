//! Distribution subcommands.

use std::path::PathBuf;

use strata_core::base::{DEFAULT_TOKEN_DECIMALS, MerkleHash, WalletAddress};
use strata_sdk::common::{
    BuildConfig, DistributionLookup, DistributorSource, ModeSelection, RecordSelector,
};

use super::constants::{
    DEFAULT_MODE, STRATA_AMOUNT, STRATA_DECIMALS, STRATA_DISTRIBUTION_ID,
    STRATA_DISTRIBUTION_OUT, STRATA_DISTRIBUTOR, STRATA_EVENT_SIGNATURE, STRATA_MODE,
    STRATA_RECIPIENTS,
};
use super::{StoreArgs, parse_address, parse_mode, parse_root};

/// Distribution subcommands.
#[derive(Debug, clap::Subcommand)]
pub enum DistributionCommands {
    /// Build the Merkle tree for one or more recipient files and store the distribution.
    Build {
        /// Build arguments.
        #[command(flatten)]
        args: DistributionBuildArgs,
    },
    /// Bind a deployed distributor contract to a built distribution.
    Register {
        /// Register arguments.
        #[command(flatten)]
        args: DistributionRegisterArgs,
    },
    /// Print a stored distribution.
    Show {
        /// Show arguments.
        #[command(flatten)]
        args: DistributionShowArgs,
    },
}

/// Arguments for `distribution build`.
#[derive(Debug, clap::Args)]
pub struct DistributionBuildArgs {
    /// Recipient files (`address[,amount]` per line), merged in the given order.
    #[arg(
        long,
        env = STRATA_RECIPIENTS,
        required = true,
        num_args = 1..,
        value_delimiter = ','
    )]
    pub recipients: Vec<PathBuf>,
    /// Distribution mode: `equal` or `custom`.
    #[arg(long, env = STRATA_MODE, default_value = DEFAULT_MODE, value_parser = parse_mode)]
    pub mode: ModeSelection,
    /// Per-recipient amount for equal distributions, in whole tokens.
    #[arg(long, env = STRATA_AMOUNT)]
    pub amount: Option<String>,
    /// Token decimals.
    #[arg(long, env = STRATA_DECIMALS, default_value_t = DEFAULT_TOKEN_DECIMALS)]
    pub decimals: u8,
    /// Distribution id. Defaults to the recipient file names.
    #[arg(long, env = STRATA_DISTRIBUTION_ID)]
    pub id: Option<String>,
    /// Also write the distribution record to this file.
    #[arg(long, env = STRATA_DISTRIBUTION_OUT)]
    pub out: Option<PathBuf>,
    /// Store arguments.
    #[command(flatten)]
    pub store: StoreArgs,
}

impl DistributionBuildArgs {
    /// Split into the store location and the build inputs.
    #[must_use]
    pub fn into_parts(self) -> (StoreArgs, BuildConfig) {
        let build = BuildConfig {
            recipient_files: self.recipients,
            mode: self.mode,
            amount: self.amount,
            decimals: self.decimals,
            id: self.id,
            out: self.out,
        };
        (self.store, build)
    }
}

/// Selects a built distribution.
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct RecordSelectorArgs {
    /// Distribution id.
    #[arg(long)]
    pub id: Option<String>,
    /// Merkle root of the distribution.
    #[arg(long, value_parser = parse_root)]
    pub root: Option<MerkleHash>,
}

impl From<RecordSelectorArgs> for RecordSelector {
    fn from(args: RecordSelectorArgs) -> Self {
        match (args.id, args.root) {
            (_, Some(root)) => Self::Root(root),
            (id, None) => Self::Id(id.unwrap_or_default()),
        }
    }
}

/// Where the distributor address comes from.
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct DistributorArgs {
    /// Distributor contract address.
    #[arg(long, env = STRATA_DISTRIBUTOR, value_parser = parse_address)]
    pub distributor: Option<WalletAddress>,
    /// Creation transaction receipt JSON to read the distributor address from.
    #[arg(long)]
    pub receipt: Option<PathBuf>,
}

/// Arguments for `distribution register`.
#[derive(Debug, clap::Args)]
pub struct DistributionRegisterArgs {
    /// Distribution to register.
    #[command(flatten)]
    pub selector: RecordSelectorArgs,
    /// Distributor source.
    #[command(flatten)]
    pub distributor: DistributorArgs,
    /// Factory event signature whose first indexed argument is the distributor,
    /// e.g. `AirdropCreated(address,address)`.
    #[arg(
        long,
        env = STRATA_EVENT_SIGNATURE,
        requires = "receipt",
        conflicts_with = "distributor"
    )]
    pub event_signature: Option<String>,
    /// Store arguments.
    #[command(flatten)]
    pub store: StoreArgs,
}

impl DistributionRegisterArgs {
    /// Split into the selected record and the distributor source.
    #[must_use]
    pub fn into_parts(self) -> (StoreArgs, RecordSelector, DistributorSource) {
        let source = match (self.distributor.distributor, self.distributor.receipt) {
            (Some(address), _) => DistributorSource::Address(address),
            (None, receipt) => DistributorSource::Receipt {
                file: receipt.unwrap_or_default(),
                event_signature: self.event_signature,
            },
        };
        (self.store, self.selector.into(), source)
    }
}

/// Arguments for `distribution show`.
#[derive(Debug, clap::Args)]
pub struct DistributionShowArgs {
    /// Lookup key.
    #[command(flatten)]
    pub lookup: LookupArgs,
    /// Store arguments.
    #[command(flatten)]
    pub store: StoreArgs,
}

/// Looks up any stored distribution.
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct LookupArgs {
    /// Distributor contract address.
    #[arg(long, value_parser = parse_address)]
    pub distributor: Option<WalletAddress>,
    /// Merkle root.
    #[arg(long, value_parser = parse_root)]
    pub root: Option<MerkleHash>,
    /// Distribution id.
    #[arg(long)]
    pub id: Option<String>,
}

impl From<LookupArgs> for DistributionLookup {
    fn from(args: LookupArgs) -> Self {
        match (args.distributor, args.root, args.id) {
            (Some(distributor), _, _) => Self::Distributor(distributor),
            (None, Some(root), _) => Self::Root(root),
            (None, None, id) => Self::Id(id.unwrap_or_default()),
        }
    }
}
