//! Layered Merkle tree over a recipient list.
//!
//! Every layer is kept in memory, so a proof for any recipient can be read straight off the
//! tree. Leaves are sorted by hash before the first layer is built, which makes the root a
//! function of the recipient *set* and mode: reordering the input file does not change it.

#![allow(
    clippy::arithmetic_side_effects,
    reason = "Layer index math only halves indices that are bounded by the layer width"
)]

use std::collections::{BTreeMap, BTreeSet};

use strata_core::base::{MerkleHash, MerkleProof, TokenAmount, WalletAddress};
use strata_core::schema::distribution::{DistributionMode, DistributionRecord};
use strata_core::schema::recipient::Recipient;

use crate::core::{MerkleError, validate_recipient_count};
use crate::node::{hash_pair, leaf_hash};

/// A fully materialized airdrop tree.
#[derive(Debug, Clone)]
pub struct AirdropTree {
    /// `layers[0]` holds the sorted leaves, the last layer holds the root alone.
    layers: Vec<Vec<MerkleHash>>,
    /// Leaf position of every recipient in `layers[0]`.
    positions: BTreeMap<WalletAddress, usize>,
    /// Sum of all claimable amounts.
    total_amount: TokenAmount,
    /// Number of recipients, as recorded by the contract.
    recipient_count: u32,
}

impl AirdropTree {
    /// Validate the recipients and build the tree.
    ///
    /// In equal mode every leaf uses the mode's shared amount; any per-recipient amount is
    /// ignored. In custom mode every recipient must carry its own non-zero amount.
    ///
    /// # Errors
    /// - [`MerkleError::EmptyRecipients`] or [`MerkleError::TooManyRecipients`] for a bad count.
    /// - [`MerkleError::DuplicateAddress`] if an address appears twice.
    /// - [`MerkleError::ZeroDefaultAmount`] for an equal distribution of zero.
    /// - [`MerkleError::MissingAmount`] or [`MerkleError::ZeroAmount`] for custom entries.
    /// - [`MerkleError::TotalOverflow`] if the allocations do not fit into `uint256`.
    pub fn build(recipients: &[Recipient], mode: &DistributionMode) -> Result<Self, MerkleError> {
        let recipient_count = validate_recipient_count(recipients.len())?;
        if let DistributionMode::Equal { amount } = mode
            && amount.is_zero()
        {
            return Err(MerkleError::ZeroDefaultAmount);
        }

        let mut seen = BTreeSet::new();
        let mut leaves = Vec::with_capacity(recipients.len());
        let mut total_amount = TokenAmount::ZERO;
        for recipient in recipients {
            if !seen.insert(recipient.address) {
                return Err(MerkleError::DuplicateAddress(recipient.address));
            }
            let amount = mode
                .amount_for(recipient)
                .ok_or(MerkleError::MissingAmount(recipient.address))?;
            if amount.is_zero() {
                return Err(MerkleError::ZeroAmount(recipient.address));
            }
            if matches!(mode, DistributionMode::Custom) {
                total_amount = total_amount
                    .checked_add(amount)
                    .ok_or(MerkleError::TotalOverflow)?;
            }
            leaves.push((leaf_hash(&recipient.address, &amount), recipient.address));
        }
        if let DistributionMode::Equal { amount } = mode {
            total_amount = amount
                .checked_mul_count(recipients.len())
                .ok_or(MerkleError::TotalOverflow)?;
        }

        leaves.sort_unstable();
        let positions = leaves
            .iter()
            .enumerate()
            .map(|(position, (_, address))| (*address, position))
            .collect();
        let layers = build_layers(leaves.into_iter().map(|(leaf, _)| leaf).collect());

        Ok(Self {
            layers,
            positions,
            total_amount,
            recipient_count,
        })
    }

    /// The Merkle root.
    #[must_use]
    pub fn root(&self) -> MerkleHash {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .unwrap_or_default()
    }

    /// The leaf hash of a recipient, if listed.
    #[must_use]
    pub fn leaf(&self, address: &WalletAddress) -> Option<MerkleHash> {
        let position = *self.positions.get(address)?;
        self.layers.first()?.get(position).copied()
    }

    /// The proof for a recipient, if listed.
    #[must_use]
    pub fn proof(&self, address: &WalletAddress) -> Option<MerkleProof> {
        self.positions
            .get(address)
            .map(|position| self.proof_at(*position))
    }

    /// Sum of all claimable amounts.
    #[must_use]
    pub const fn total_amount(&self) -> TokenAmount {
        self.total_amount
    }

    /// Number of layers including leaves and root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Collect the root and every proof.
    #[must_use]
    pub fn into_distribution(self) -> MerkleDistribution {
        let proofs = self
            .positions
            .iter()
            .map(|(address, position)| (*address, self.proof_at(*position)))
            .collect();
        MerkleDistribution {
            merkle_root: self.root(),
            proofs,
            total_amount: self.total_amount,
            recipient_count: self.recipient_count,
        }
    }

    /// Siblings encountered walking from a leaf to the root.
    ///
    /// A node promoted unpaired contributes no sibling for that layer.
    fn proof_at(&self, mut index: usize) -> MerkleProof {
        let below_root = self.layers.len().saturating_sub(1);
        let mut siblings = Vec::with_capacity(below_root);
        for layer in self.layers.iter().take(below_root) {
            if let Some(sibling) = layer.get(index ^ 1) {
                siblings.push(*sibling);
            }
            index /= 2;
        }
        MerkleProof::new(siblings)
    }
}

/// Hash layer by layer until one node is left. An unpaired last node moves up unchanged.
fn build_layers(leaves: Vec<MerkleHash>) -> Vec<Vec<MerkleHash>> {
    let mut layers = vec![leaves];
    while let Some(current) = layers.last().filter(|layer| layer.len() > 1) {
        let next = current
            .chunks(2)
            .filter_map(|pair| match pair {
                [left, right] => Some(hash_pair(left, right)),
                [single] => Some(*single),
                _ => None,
            })
            .collect();
        layers.push(next);
    }
    layers
}

/// Root and per-recipient proofs of a built tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleDistribution {
    /// Root to submit to the distributor contract.
    pub merkle_root: MerkleHash,
    /// Exactly one proof per recipient, keyed by canonical address.
    pub proofs: BTreeMap<WalletAddress, MerkleProof>,
    /// Sum of all claimable amounts.
    pub total_amount: TokenAmount,
    /// Number of recipients.
    pub recipient_count: u32,
}

impl MerkleDistribution {
    /// Package the distribution with its inputs into a persistable record.
    #[must_use]
    pub fn into_record(
        self,
        id: String,
        decimals: u8,
        mode: DistributionMode,
        recipients: Vec<Recipient>,
    ) -> DistributionRecord {
        DistributionRecord {
            id,
            decimals,
            mode,
            recipients,
            merkle_root: self.merkle_root,
            total_amount: self.total_amount,
            proofs: self.proofs,
        }
    }
}

/// Build the Merkle tree for a recipient list and return its root and proofs.
///
/// # Errors
/// Returns a [`MerkleError`] if the recipients fail validation; see [`AirdropTree::build`].
pub fn create_merkle_tree(
    recipients: &[Recipient],
    mode: &DistributionMode,
) -> Result<MerkleDistribution, MerkleError> {
    AirdropTree::build(recipients, mode).map(AirdropTree::into_distribution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::verify_proof;

    fn address(byte: u8) -> WalletAddress {
        WalletAddress::from_bytes([byte; 20]).expect("non-zero address")
    }

    fn amount(text: &str) -> TokenAmount {
        TokenAmount::parse_units(text, 18).expect("amount should parse")
    }

    fn equal(text: &str) -> DistributionMode {
        DistributionMode::Equal {
            amount: amount(text),
        }
    }

    fn recipients(count: u8) -> Vec<Recipient> {
        (1..=count).map(|b| Recipient::new(address(b))).collect()
    }

    #[test]
    fn single_recipient_root_is_its_leaf() {
        let tree = AirdropTree::build(&recipients(1), &equal("100")).expect("tree should build");

        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.root(), leaf_hash(&address(1), &amount("100")));
        assert_eq!(tree.proof(&address(1)), Some(MerkleProof::default()));
    }

    #[test]
    fn two_recipients_prove_against_each_other() {
        let tree = AirdropTree::build(&recipients(2), &equal("100")).expect("tree should build");
        let leaf_1 = leaf_hash(&address(1), &amount("100"));
        let leaf_2 = leaf_hash(&address(2), &amount("100"));

        assert_eq!(tree.root(), hash_pair(&leaf_1, &leaf_2));
        assert_eq!(
            tree.proof(&address(1)),
            Some(MerkleProof::new(vec![leaf_2]))
        );
        assert_eq!(
            tree.proof(&address(2)),
            Some(MerkleProof::new(vec![leaf_1]))
        );
    }

    #[test]
    fn odd_node_is_promoted_unchanged() {
        let tree = AirdropTree::build(&recipients(3), &equal("1")).expect("tree should build");
        let mut leaves: Vec<MerkleHash> = (1..=3)
            .map(|b| leaf_hash(&address(b), &amount("1")))
            .collect();
        leaves.sort_unstable();
        let [first, second, third] = leaves.as_slice() else {
            panic!("three leaves expected");
        };

        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.root(), hash_pair(&hash_pair(first, second), third));

        // The promoted leaf only needs the hash of the other subtree.
        let promoted = (1..=3)
            .map(address)
            .find(|a| tree.leaf(a) == Some(*third))
            .expect("promoted leaf should be listed");
        assert_eq!(
            tree.proof(&promoted),
            Some(MerkleProof::new(vec![hash_pair(first, second)]))
        );
    }

    #[test]
    fn every_proof_verifies_for_many_sizes() {
        for count in 1..=17 {
            let list = recipients(count);
            let distribution =
                create_merkle_tree(&list, &equal("2.5")).expect("tree should build");
            assert_eq!(distribution.proofs.len(), list.len());
            for recipient in &list {
                let proof = distribution
                    .proofs
                    .get(&recipient.address)
                    .expect("proof should exist");
                let leaf = leaf_hash(&recipient.address, &amount("2.5"));
                assert!(verify_proof(&leaf, proof, &distribution.merkle_root));
            }
        }
    }

    #[test]
    fn root_ignores_input_order() {
        let forward = recipients(9);
        let mut backward = forward.clone();
        backward.reverse();

        let a = create_merkle_tree(&forward, &equal("5")).expect("tree should build");
        let b = create_merkle_tree(&backward, &equal("5")).expect("tree should build");
        assert_eq!(a, b);
    }

    #[test]
    fn equal_total_is_amount_times_count() {
        let distribution = create_merkle_tree(&recipients(4), &equal("2.5")).expect("tree");
        assert_eq!(distribution.total_amount, amount("10"));
        assert_eq!(distribution.recipient_count, 4);
    }

    #[test]
    fn custom_total_is_sum_of_amounts() {
        let list = vec![
            Recipient::with_amount(address(1), amount("1.5")),
            Recipient::with_amount(address(2), amount("2")),
        ];
        let distribution =
            create_merkle_tree(&list, &DistributionMode::Custom).expect("tree should build");
        assert_eq!(distribution.total_amount, amount("3.5"));
    }

    #[test]
    fn validation_errors() {
        assert_eq!(
            create_merkle_tree(&[], &equal("1")),
            Err(MerkleError::EmptyRecipients)
        );
        assert_eq!(
            create_merkle_tree(&recipients(2), &equal("0")),
            Err(MerkleError::ZeroDefaultAmount)
        );

        let duplicated = vec![Recipient::new(address(7)), Recipient::new(address(7))];
        assert_eq!(
            create_merkle_tree(&duplicated, &equal("1")),
            Err(MerkleError::DuplicateAddress(address(7)))
        );

        let missing = vec![
            Recipient::with_amount(address(1), amount("1")),
            Recipient::new(address(2)),
        ];
        assert_eq!(
            create_merkle_tree(&missing, &DistributionMode::Custom),
            Err(MerkleError::MissingAmount(address(2)))
        );

        let zero = vec![Recipient::with_amount(address(3), TokenAmount::ZERO)];
        assert_eq!(
            create_merkle_tree(&zero, &DistributionMode::Custom),
            Err(MerkleError::ZeroAmount(address(3)))
        );
    }

    #[test]
    fn total_overflow_is_rejected() {
        let max = TokenAmount::from_base_units(alloy_primitives::U256::MAX);
        let list = vec![
            Recipient::with_amount(address(1), max),
            Recipient::with_amount(address(2), amount("1")),
        ];
        assert_eq!(
            create_merkle_tree(&list, &DistributionMode::Custom),
            Err(MerkleError::TotalOverflow)
        );
        assert_eq!(
            create_merkle_tree(&recipients(2), &DistributionMode::Equal { amount: max }),
            Err(MerkleError::TotalOverflow)
        );
    }

    #[test]
    fn equal_mode_ignores_listed_amounts() {
        let with_amounts = vec![
            Recipient::with_amount(address(1), amount("9")),
            Recipient::with_amount(address(2), amount("8")),
        ];
        let a = create_merkle_tree(&with_amounts, &equal("3")).expect("tree should build");
        let b = create_merkle_tree(&recipients(2), &equal("3")).expect("tree should build");
        assert_eq!(a.merkle_root, b.merkle_root);
    }
}
