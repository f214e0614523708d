//! JSON-file store of built and deployed distributions.
//!
//! A built record waits under its recipient list id until the distributor contract is
//! deployed; registering copies it, unchanged, under the distributor address. Claim-time
//! lookups go by distributor address first and by Merkle root second.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_core::base::{MerkleHash, WalletAddress};
use strata_core::schema::distribution::DistributionRecord;
use thiserror::Error;
use tracing::debug;

use crate::common::{DistributionLookup, RecordSelector};

/// Store and lookup errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A different record is already stored under this id.
    #[error("Distribution {0} already exists with different contents")]
    DuplicateId(String),

    /// The distributor is already bound to a different record.
    #[error("Distributor {0} is already registered for another distribution")]
    DistributorAlreadyRegistered(WalletAddress),

    /// No record matches the lookup.
    #[error("No distribution found for {0}")]
    NotFound(String),

    /// The store file cannot be read or written.
    #[error("Store file {path} I/O failed: {source}")]
    Io {
        /// Store file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The store file is not valid store JSON.
    #[error("Store file {path} is malformed: {source}")]
    Format {
        /// Store file path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Pending and deployed distribution records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionStore {
    /// Built records keyed by recipient list id.
    #[serde(default)]
    pending: BTreeMap<String, DistributionRecord>,
    /// Deployed records keyed by distributor contract address.
    #[serde(default)]
    deployed: BTreeMap<WalletAddress, DistributionRecord>,
}

impl DistributionStore {
    /// Read a store file. A missing file is an empty store.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(file = %path.display(), "Store file missing, starting empty");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the store file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(self).map_err(|source| StoreError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        tokio::fs::write(path, json)
            .await
            .map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Add a built record. Storing an identical record again is a no-op.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateId`] if the id holds a different record.
    pub fn create(&mut self, record: DistributionRecord) -> Result<(), StoreError> {
        match self.pending.get(&record.id) {
            Some(existing) if *existing == record => Ok(()),
            Some(_) => Err(StoreError::DuplicateId(record.id)),
            None => {
                self.pending.insert(record.id.clone(), record);
                Ok(())
            }
        }
    }

    /// Bind a deployed distributor contract to a pending record.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] if no pending record matches.
    /// - [`StoreError::DistributorAlreadyRegistered`] if the distributor holds another record.
    pub fn register(
        &mut self,
        selector: &RecordSelector,
        distributor: WalletAddress,
    ) -> Result<&DistributionRecord, StoreError> {
        let record = match selector {
            RecordSelector::Id(id) => self.pending.get(id),
            RecordSelector::Root(root) => self.pending.values().find(|r| r.merkle_root == *root),
        }
        .ok_or_else(|| StoreError::NotFound(describe_selector(selector)))?
        .clone();

        if let Some(existing) = self.deployed.get(&distributor)
            && *existing != record
        {
            return Err(StoreError::DistributorAlreadyRegistered(distributor));
        }
        Ok(self.deployed.entry(distributor).or_insert(record))
    }

    /// Record deployed at a distributor address.
    #[must_use]
    pub fn get(&self, distributor: &WalletAddress) -> Option<&DistributionRecord> {
        self.deployed.get(distributor)
    }

    /// Record with the given Merkle root, deployed records first.
    #[must_use]
    pub fn find_by_root(&self, root: &MerkleHash) -> Option<&DistributionRecord> {
        self.deployed
            .values()
            .chain(self.pending.values())
            .find(|record| record.merkle_root == *root)
    }

    /// Pending record with the given id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&DistributionRecord> {
        self.pending.get(id)
    }

    /// Resolve a lookup.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if nothing matches.
    pub fn lookup(&self, lookup: &DistributionLookup) -> Result<&DistributionRecord, StoreError> {
        match lookup {
            DistributionLookup::Distributor(distributor) => self.get(distributor),
            DistributionLookup::Root(root) => self.find_by_root(root),
            DistributionLookup::Id(id) => self.get_by_id(id),
        }
        .ok_or_else(|| StoreError::NotFound(describe_lookup(lookup)))
    }

    /// Distributor addresses with a deployed record.
    pub fn distributors(&self) -> impl Iterator<Item = &WalletAddress> {
        self.deployed.keys()
    }
}

fn describe_selector(selector: &RecordSelector) -> String {
    match selector {
        RecordSelector::Id(id) => format!("id {id}"),
        RecordSelector::Root(root) => format!("root {root}"),
    }
}

fn describe_lookup(lookup: &DistributionLookup) -> String {
    match lookup {
        DistributionLookup::Distributor(distributor) => format!("distributor {distributor}"),
        DistributionLookup::Root(root) => format!("root {root}"),
        DistributionLookup::Id(id) => format!("id {id}"),
    }
}
