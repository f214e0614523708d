//! StrataForge airdrop CLI application

mod cli;

use clap::Parser as _;
use cli::{ClaimCommands, Cli, Commands, DistributionCommands};

fn init_tracing() -> eyre::Result<()> {
    // Command output is JSON on stdout, logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;

    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> eyre::Result<()> {
    // Load .env file (fails silently if not found)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();

    let res = match cli.command {
        Commands::Distribution { command } => match command {
            DistributionCommands::Build { args } => {
                let (store, build) = args.into_parts();
                strata_sdk::commands::distribution_build(store.into(), build)
                    .await
                    .map(|_| ())
            }
            DistributionCommands::Register { args } => {
                let (store, selector, source) = args.into_parts();
                strata_sdk::commands::distribution_register(store.into(), selector, source)
                    .await
                    .map(|_| ())
            }
            DistributionCommands::Show { args } => {
                strata_sdk::commands::distribution_show(args.store.into(), args.lookup.into())
                    .await
            }
        },
        Commands::Claim { command } => match command {
            ClaimCommands::Check { args } => strata_sdk::commands::claim_check(
                args.store.into(),
                args.address,
                args.distribution.into(),
                args.onchain_root,
                args.out,
            )
            .await
            .map(|_| ()),
        },
        Commands::Schema => strata_sdk::commands::distribution_schema(),
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
