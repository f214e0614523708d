//! Command-line interface for the `strata` CLI application.

mod claim;
pub mod constants;
mod distribution;

use std::path::PathBuf;

use clap::Parser;
use eyre::{Result, eyre};
use strata_core::base::{MerkleHash, WalletAddress};
use strata_sdk::common::{CommonConfig, ModeSelection};

pub use self::claim::ClaimCommands;
use self::constants::{DEFAULT_STORE_FILE, STRATA_STORE_FILE};
pub use self::distribution::DistributionCommands;

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "strata")]
#[command(about = "StrataForge Merkle airdrop tools")]
pub struct Cli {
    /// CLI top-level command group.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Distribution building and deployment bookkeeping.
    Distribution {
        /// Distribution subcommands.
        #[command(subcommand)]
        command: DistributionCommands,
    },
    /// Claim-time commands.
    Claim {
        /// Claim subcommands.
        #[command(subcommand)]
        command: ClaimCommands,
    },
    /// Prints the JSON schema of the distribution record file.
    Schema,
}

/// Distribution store location.
#[derive(Debug, clap::Args)]
pub struct StoreArgs {
    /// JSON file holding built and deployed distributions.
    #[arg(long, env = STRATA_STORE_FILE, default_value = DEFAULT_STORE_FILE)]
    pub store: PathBuf,
}

impl From<StoreArgs> for CommonConfig {
    fn from(args: StoreArgs) -> Self {
        Self {
            store_file: args.store,
        }
    }
}

pub fn parse_mode(s: &str) -> Result<ModeSelection> {
    match s {
        "equal" => Ok(ModeSelection::Equal),
        "custom" => Ok(ModeSelection::Custom),
        other => Err(eyre!(
            "Invalid distribution mode: {other}. Expected 'equal' or 'custom'."
        )),
    }
}

pub fn parse_address(s: &str) -> Result<WalletAddress> {
    s.parse()
        .map_err(|e| eyre!("Invalid wallet address {s}: {e}"))
}

pub fn parse_root(s: &str) -> Result<MerkleHash> {
    s.parse()
        .map_err(|e| eyre!("Invalid Merkle root {s}: {e}"))
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    const ADDRESS: &str = "0x1111111111111111111111111111111111111111";
    const ROOT: &str = "0x2222222222222222222222222222222222222222222222222222222222222222";

    #[test]
    fn mode_parse() {
        assert_eq!(
            parse_mode("equal").expect("equal should parse"),
            ModeSelection::Equal
        );
        assert_eq!(
            parse_mode("custom").expect("custom should parse"),
            ModeSelection::Custom
        );
        assert!(parse_mode("weighted").is_err());
    }

    #[test]
    fn address_and_root_parse() {
        assert!(parse_address(ADDRESS).is_ok());
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("0x0000000000000000000000000000000000000000").is_err());
        assert!(parse_root(ROOT).is_ok());
        assert!(parse_root("0x22").is_err());
    }

    #[test]
    fn register_requires_exactly_one_record_selector() {
        let cli = Cli::try_parse_from([
            "strata",
            "distribution",
            "register",
            "--distributor",
            ADDRESS,
        ]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "strata",
            "distribution",
            "register",
            "--id",
            "list.csv",
            "--root",
            ROOT,
            "--distributor",
            ADDRESS,
        ]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "strata",
            "distribution",
            "register",
            "--id",
            "list.csv",
            "--distributor",
            ADDRESS,
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn event_signature_requires_receipt() {
        let cli = Cli::try_parse_from([
            "strata",
            "distribution",
            "register",
            "--id",
            "list.csv",
            "--distributor",
            ADDRESS,
            "--event-signature",
            "AirdropCreated(address,address)",
        ]);
        assert_eq!(
            cli.map(|_| ()).map_err(|err| err.kind()),
            Err(clap::error::ErrorKind::ArgumentConflict)
        );

        let cli = Cli::try_parse_from([
            "strata",
            "distribution",
            "register",
            "--id",
            "list.csv",
            "--receipt",
            "receipt.json",
            "--event-signature",
            "AirdropCreated(address,address)",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn claim_check_requires_distribution() {
        let cli = Cli::try_parse_from(["strata", "claim", "check", "--address", ADDRESS]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "strata", "claim", "check", "--address", ADDRESS, "--root", ROOT,
        ]);
        assert!(cli.is_ok());
    }
}
