use std::path::PathBuf;

use eyre::{Context as _, ensure};
use strata_core::base::TokenAmount;
use strata_core::schema::distribution::{DistributionMode, DistributionRecord};
use strata_core::schema::recipient::Recipient;
use strata_merkle::create_merkle_tree;
use tracing::{info, instrument, warn};

use crate::common::{BuildConfig, CommonConfig, ModeSelection};
use crate::recipients::parse_recipients;
use crate::store::DistributionStore;

/// Build a distribution from recipient files, store it as pending and optionally export it.
///
/// # Errors
/// Returns an error if a recipient file cannot be read or parsed, the recipients fail
/// validation, or the store cannot be updated.
#[instrument(skip_all, fields(mode = ?build.mode, files = build.recipient_files.len()))]
pub async fn distribution_build(
    config: CommonConfig,
    build: BuildConfig,
) -> eyre::Result<DistributionRecord> {
    ensure!(
        !build.recipient_files.is_empty(),
        "At least one recipient file is required"
    );

    let mode = resolve_mode(build.mode, build.amount.as_deref(), build.decimals)?;
    let recipients = read_recipients(&build.recipient_files, build.decimals).await?;
    info!(count = recipients.len(), "Loaded recipients");

    let id = build
        .id
        .unwrap_or_else(|| default_id(&build.recipient_files));
    let tree_recipients = recipients.clone();
    let distribution =
        tokio::task::spawn_blocking(move || create_merkle_tree(&tree_recipients, &mode))
            .await?
            .context("Invalid recipient list")?;
    let record = distribution.into_record(id, build.decimals, mode, recipients);
    let drop_amount = drop_amount(&record.mode, record.decimals)?;

    info!(
        id = %record.id,
        root = %record.merkle_root,
        recipients = record.len(),
        total = %record.total_amount.format_units(record.decimals),
        drop_amount = %drop_amount.format_units(record.decimals),
        "Built distribution"
    );

    let mut store = DistributionStore::load(&config.store_file).await?;
    store.create(record.clone())?;
    store.save(&config.store_file).await?;
    info!(store = %config.store_file.display(), "Stored pending distribution");

    if let Some(out) = &build.out {
        let json = serde_json::to_string_pretty(&record)?;
        tokio::fs::write(out, json)
            .await
            .with_context(|| format!("Failed to write {}", out.display()))?;
        info!(file = %out.display(), "Exported distribution");
    }

    Ok(record)
}

fn resolve_mode(
    selection: ModeSelection,
    amount: Option<&str>,
    decimals: u8,
) -> eyre::Result<DistributionMode> {
    match selection {
        ModeSelection::Equal => {
            let amount =
                amount.ok_or_else(|| eyre::eyre!("Equal distribution requires --amount"))?;
            let amount = TokenAmount::parse_units(amount, decimals)
                .with_context(|| format!("Invalid amount {amount}"))?;
            Ok(DistributionMode::Equal { amount })
        }
        ModeSelection::Custom => {
            if amount.is_some() {
                warn!("Ignoring --amount for a custom distribution");
            }
            Ok(DistributionMode::Custom)
        }
    }
}

async fn read_recipients(files: &[PathBuf], decimals: u8) -> eyre::Result<Vec<Recipient>> {
    let mut recipients = Vec::new();
    for file in files {
        let text = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read recipient file {}", file.display()))?;
        let parsed = parse_recipients(&text, decimals, &file.display().to_string())?;
        if parsed.is_empty() {
            warn!(file = %file.display(), "Recipient file has no entries");
        }
        recipients.extend(parsed);
    }
    Ok(recipients)
}

/// File names of the recipient lists, joined with `+`.
fn default_id(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|file| {
            file.file_name().map_or_else(
                || file.display().to_string(),
                |name| name.to_string_lossy().into_owned(),
            )
        })
        .collect::<Vec<_>>()
        .join("+")
}

/// The factory's `dropAmount` argument. Custom distributions pass one whole token, which
/// the distributor ignores in favour of the per-leaf amounts.
fn drop_amount(mode: &DistributionMode, decimals: u8) -> eyre::Result<TokenAmount> {
    match mode {
        DistributionMode::Equal { amount } => Ok(*amount),
        DistributionMode::Custom => Ok(TokenAmount::parse_units("1", decimals)?),
    }
}
