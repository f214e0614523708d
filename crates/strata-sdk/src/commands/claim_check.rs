use std::path::PathBuf;

use strata_core::base::{MerkleHash, WalletAddress};
use strata_core::schema::eligibility::Eligibility;
use strata_merkle::verify_record_eligibility;
use tracing::{info, instrument, warn};

use super::emit_json;
use crate::common::{CommonConfig, DistributionLookup};
use crate::store::{DistributionStore, StoreError};

/// Check whether `address` can claim and output the eligibility with its proof.
///
/// The distribution is looked up by `lookup`. A distributor that was never registered
/// falls back to the distribution published under `onchain_root`. The proof is verified
/// against `onchain_root` when given, otherwise against the stored root.
///
/// # Errors
/// Returns an error if the store cannot be read, no distribution matches or the output
/// cannot be written. An ineligible address is not an error.
#[instrument(skip_all, fields(%address, lookup = ?lookup))]
pub async fn claim_check(
    config: CommonConfig,
    address: WalletAddress,
    lookup: DistributionLookup,
    onchain_root: Option<MerkleHash>,
    out: Option<PathBuf>,
) -> eyre::Result<Eligibility> {
    let store = DistributionStore::load(&config.store_file).await?;
    let record = match (store.lookup(&lookup), onchain_root, &lookup) {
        (Ok(record), _, _) => record,
        (Err(StoreError::NotFound(_)), Some(root), DistributionLookup::Distributor(_)) => {
            warn!(%root, "Distributor not registered, looking up by on-chain root");
            store.lookup(&DistributionLookup::Root(root))?
        }
        (Err(err), _, _) => return Err(err.into()),
    };

    let expected_root = onchain_root.unwrap_or(record.merkle_root);
    if expected_root != record.merkle_root {
        warn!(
            stored = %record.merkle_root,
            onchain = %expected_root,
            "Stored distribution does not match the on-chain root"
        );
    }

    let eligibility = verify_record_eligibility(&address, record, &expected_root);
    match &eligibility {
        Eligibility::Eligible { amount, proof, .. } => info!(
            amount = %amount.format_units(record.decimals),
            proof_len = proof.len(),
            "Address is eligible"
        ),
        Eligibility::Ineligible { reason, .. } => info!(?reason, "Address is not eligible"),
    }

    emit_json(&eligibility, out.as_deref()).await?;
    Ok(eligibility)
}

#[cfg(test)]
mod tests {
    use strata_core::base::TokenAmount;
    use strata_core::schema::distribution::{DistributionMode, DistributionRecord};
    use strata_core::schema::eligibility::IneligibilityReason;
    use strata_core::schema::recipient::Recipient;
    use strata_merkle::create_merkle_tree;

    use super::*;
    use crate::common::RecordSelector;

    fn address(byte: u8) -> WalletAddress {
        WalletAddress::from_bytes([byte; 20]).expect("non-zero address")
    }

    fn record(bytes: &[u8]) -> DistributionRecord {
        let mode = DistributionMode::Equal {
            amount: TokenAmount::parse_units("100", 18).expect("amount should parse"),
        };
        let recipients: Vec<Recipient> =
            bytes.iter().map(|b| Recipient::new(address(*b))).collect();
        create_merkle_tree(&recipients, &mode)
            .expect("tree should build")
            .into_record("list.csv".to_owned(), 18, mode, recipients)
    }

    async fn store_with(
        dir: &tempfile::TempDir,
        record: &DistributionRecord,
        distributor: Option<WalletAddress>,
    ) -> CommonConfig {
        let config = CommonConfig {
            store_file: dir.path().join("store.json"),
        };
        let mut store = DistributionStore::default();
        store.create(record.clone()).expect("create");
        if let Some(distributor) = distributor {
            store
                .register(&RecordSelector::Id(record.id.clone()), distributor)
                .expect("register");
        }
        store.save(&config.store_file).await.expect("save");
        config
    }

    #[tokio::test]
    async fn eligible_by_distributor() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let record = record(&[1, 2, 3]);
        let config = store_with(&dir, &record, Some(address(0xd1))).await;
        let out = dir.path().join("eligibility.json");

        let eligibility = claim_check(
            config,
            address(2),
            DistributionLookup::Distributor(address(0xd1)),
            None,
            Some(out.clone()),
        )
        .await
        .expect("check should succeed");

        assert!(eligibility.is_eligible());
        let written: Eligibility = serde_json::from_slice(
            &tokio::fs::read(&out).await.expect("output should exist"),
        )
        .expect("output should parse");
        assert_eq!(written, eligibility);
    }

    #[tokio::test]
    async fn unregistered_distributor_falls_back_to_onchain_root() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let record = record(&[1, 2]);
        let config = store_with(&dir, &record, None).await;
        let out = dir.path().join("eligibility.json");

        let eligibility = claim_check(
            config,
            address(1),
            DistributionLookup::Distributor(address(0xd9)),
            Some(record.merkle_root),
            Some(out),
        )
        .await
        .expect("root fallback should succeed");

        assert!(eligibility.is_eligible());
    }

    #[tokio::test]
    async fn stale_root_is_root_mismatch() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let record = record(&[1, 2]);
        let config = store_with(&dir, &record, Some(address(0xd1))).await;
        let out = dir.path().join("eligibility.json");

        let eligibility = claim_check(
            config,
            address(1),
            DistributionLookup::Distributor(address(0xd1)),
            Some(MerkleHash::new([0x42; 32])),
            Some(out),
        )
        .await
        .expect("check should succeed");

        assert_eq!(
            eligibility,
            Eligibility::Ineligible {
                address: address(1),
                reason: IneligibilityReason::RootMismatch,
            }
        );
    }

    #[tokio::test]
    async fn unknown_distribution_is_an_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let record = record(&[1]);
        let config = store_with(&dir, &record, None).await;

        let result = claim_check(
            config,
            address(1),
            DistributionLookup::Distributor(address(0xd1)),
            None,
            None,
        )
        .await;

        assert!(result.is_err());
    }
}
