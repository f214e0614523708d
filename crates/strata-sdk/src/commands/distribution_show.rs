use tracing::instrument;

use super::emit_json;
use crate::common::{CommonConfig, DistributionLookup};
use crate::store::DistributionStore;

/// Print a stored distribution as JSON.
///
/// # Errors
/// Returns an error if the store cannot be read or nothing matches the lookup.
#[instrument(skip_all, fields(lookup = ?lookup))]
pub async fn distribution_show(
    config: CommonConfig,
    lookup: DistributionLookup,
) -> eyre::Result<()> {
    let store = DistributionStore::load(&config.store_file).await?;
    let record = store.lookup(&lookup)?;
    emit_json(record, None).await
}
