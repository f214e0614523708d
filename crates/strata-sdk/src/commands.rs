//! Application command implementations.
//!
//! This module contains the core logic for each CLI subcommand.

mod claim_check;
mod distribution_build;
mod distribution_register;
mod distribution_show;

use std::path::Path;

use eyre::Context as _;
use serde::Serialize;
use tracing::info;

pub use claim_check::claim_check;
pub use distribution_build::distribution_build;
pub use distribution_register::distribution_register;
pub use distribution_show::distribution_show;

/// Generates and prints the JSON schema for the `DistributionRecord` struct.
///
/// # Errors
/// Returns an error if serialization to JSON fails.
#[allow(clippy::print_stdout, reason = "Prints schema to stdout")]
pub fn distribution_schema() -> eyre::Result<()> {
    let schema = schemars::schema_for!(strata_core::schema::distribution::DistributionRecord);
    let schema_str = serde_json::to_string_pretty(&schema)?;
    println!("{schema_str}");
    Ok(())
}

/// Write `value` as pretty JSON to `out`, or to stdout when no file is given.
#[allow(clippy::print_stdout, reason = "Command output goes to stdout")]
async fn emit_json<T: Serialize + Sync>(value: &T, out: Option<&Path>) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(file = %path.display(), "Exported result");
        }
        None => println!("{json}"),
    }
    Ok(())
}
