use eyre::Context as _;
use strata_core::base::WalletAddress;
use tracing::{info, instrument};

use crate::common::{CommonConfig, DistributorSource, RecordSelector};
use crate::receipt::{EventShape, decode_creation_address};
use crate::store::DistributionStore;

/// Bind a deployed distributor contract to a pending distribution.
///
/// # Errors
/// Returns an error if the distributor cannot be resolved from the receipt, no pending
/// distribution matches, or the distributor is already bound to another distribution.
#[instrument(skip_all, fields(selector = ?selector))]
pub async fn distribution_register(
    config: CommonConfig,
    selector: RecordSelector,
    source: DistributorSource,
) -> eyre::Result<WalletAddress> {
    let distributor = resolve_distributor(source).await?;

    let mut store = DistributionStore::load(&config.store_file).await?;
    let record = store.register(&selector, distributor)?;
    info!(
        %distributor,
        id = %record.id,
        root = %record.merkle_root,
        "Registered distributor"
    );
    store.save(&config.store_file).await?;

    Ok(distributor)
}

async fn resolve_distributor(source: DistributorSource) -> eyre::Result<WalletAddress> {
    match source {
        DistributorSource::Address(address) => Ok(address),
        DistributorSource::Receipt {
            file,
            event_signature,
        } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read receipt {}", file.display()))?;
            let receipt: serde_json::Value = serde_json::from_slice(&bytes)
                .with_context(|| format!("Receipt {} is not valid JSON", file.display()))?;
            let shapes = EventShape::defaults(event_signature.as_deref());
            let address = decode_creation_address(&receipt, &shapes)
                .with_context(|| format!("Failed to decode receipt {}", file.display()))?;
            info!(%address, file = %file.display(), "Decoded distributor from receipt");
            Ok(address)
        }
    }
}
