#![allow(missing_docs)]
#![allow(clippy::indexing_slicing, reason = "Tests")]

use alloy_primitives::U256;
use strata_core::base::{MerkleHash, MerkleProof, TokenAmount, WalletAddress};
use strata_core::schema::distribution::DistributionMode;
use strata_core::schema::eligibility::{Eligibility, IneligibilityReason};
use strata_core::schema::recipient::Recipient;
use strata_merkle::{
    MerkleError, create_merkle_tree, leaf_hash, verify_proof, verify_record_eligibility,
};

fn random_address() -> WalletAddress {
    loop {
        if let Ok(address) = WalletAddress::from_bytes(rand::random()) {
            return address;
        }
    }
}

fn random_amount() -> TokenAmount {
    let units: u64 = rand::random();
    TokenAmount::from_base_units(U256::from(units.max(1)))
}

fn random_custom_recipients(count: usize) -> Vec<Recipient> {
    (0..count)
        .map(|_| Recipient::with_amount(random_address(), random_amount()))
        .collect()
}

fn flip_first_bit(hash: MerkleHash) -> MerkleHash {
    let mut bytes = hash.to_bytes();
    bytes[0] ^= 1;
    MerkleHash::new(bytes)
}

#[test]
fn construction_is_deterministic() {
    let recipients = random_custom_recipients(33);

    let first = create_merkle_tree(&recipients, &DistributionMode::Custom)
        .expect("tree should build");
    let second = create_merkle_tree(&recipients, &DistributionMode::Custom)
        .expect("tree should build");

    assert_eq!(first, second);
}

#[test]
fn every_recipient_verifies_and_strangers_do_not() {
    for count in [1, 2, 3, 8, 31, 64, 100] {
        let recipients = random_custom_recipients(count);
        let record = create_merkle_tree(&recipients, &DistributionMode::Custom)
            .expect("tree should build")
            .into_record(
                format!("random-{count}"),
                18,
                DistributionMode::Custom,
                recipients.clone(),
            );

        for recipient in &recipients {
            let outcome =
                verify_record_eligibility(&recipient.address, &record, &record.merkle_root);
            assert!(outcome.is_eligible(), "{} should be eligible", recipient.address);

            let proof = outcome.proof().expect("eligible outcome carries a proof");
            let amount = recipient.amount.expect("custom recipients carry amounts");
            let leaf = leaf_hash(&recipient.address, &amount);
            assert!(verify_proof(&leaf, proof, &record.merkle_root));
        }

        let stranger = random_address();
        assert_eq!(
            verify_record_eligibility(&stranger, &record, &record.merkle_root),
            Eligibility::Ineligible {
                address: stranger,
                reason: IneligibilityReason::NotListed,
            }
        );
    }
}

#[test]
fn tampering_breaks_verification() {
    let recipients = random_custom_recipients(20);
    let distribution = create_merkle_tree(&recipients, &DistributionMode::Custom)
        .expect("tree should build");
    let target = &recipients[7];
    let amount = target.amount.expect("custom recipients carry amounts");
    let leaf = leaf_hash(&target.address, &amount);
    let proof = distribution
        .proofs
        .get(&target.address)
        .expect("proof should exist")
        .clone();

    assert!(verify_proof(&leaf, &proof, &distribution.merkle_root));

    let other_root = flip_first_bit(distribution.merkle_root);
    assert!(!verify_proof(&leaf, &proof, &other_root));

    let mut siblings = proof.into_inner();
    siblings[0] = flip_first_bit(siblings[0]);
    assert!(!verify_proof(
        &leaf,
        &MerkleProof::new(siblings),
        &distribution.merkle_root
    ));

    let inflated = amount
        .checked_add(TokenAmount::from_base_units(U256::from(1_u8)))
        .expect("no overflow");
    let inflated_leaf = leaf_hash(&target.address, &inflated);
    let original_proof = &distribution.proofs[&target.address];
    assert!(!verify_proof(
        &inflated_leaf,
        original_proof,
        &distribution.merkle_root
    ));
}

#[test]
fn single_recipient_tree() {
    let recipients = random_custom_recipients(1);
    let distribution = create_merkle_tree(&recipients, &DistributionMode::Custom)
        .expect("tree should build");
    let only = &recipients[0];

    assert_eq!(
        distribution.merkle_root,
        leaf_hash(&only.address, &only.amount.expect("amount"))
    );
    assert!(distribution.proofs[&only.address].is_empty());
}

#[test]
fn two_recipient_equal_distribution() {
    let a: WalletAddress = "0xAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaA1"
        .parse()
        .expect("address should parse");
    let b: WalletAddress = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb2"
        .parse()
        .expect("address should parse");
    let amount = TokenAmount::parse_units("100", 18).expect("amount should parse");
    let mode = DistributionMode::Equal { amount };

    let distribution = create_merkle_tree(&[Recipient::new(a), Recipient::new(b)], &mode)
        .expect("tree should build");

    assert_eq!(distribution.recipient_count, 2);
    assert_eq!(
        distribution.total_amount,
        TokenAmount::parse_units("200", 18).expect("amount should parse")
    );
    assert_eq!(
        distribution.proofs[&a],
        MerkleProof::new(vec![leaf_hash(&b, &amount)])
    );
    assert_eq!(
        distribution.proofs[&b],
        MerkleProof::new(vec![leaf_hash(&a, &amount)])
    );
}

#[test]
fn shuffled_input_has_the_same_root() {
    let recipients = random_custom_recipients(50);
    let mut rotated = recipients.clone();
    rotated.rotate_left(17);

    let original = create_merkle_tree(&recipients, &DistributionMode::Custom)
        .expect("tree should build");
    let reordered = create_merkle_tree(&rotated, &DistributionMode::Custom)
        .expect("tree should build");

    assert_eq!(original.merkle_root, reordered.merkle_root);
    assert_eq!(original.proofs, reordered.proofs);
}

#[test]
fn custom_mode_requires_every_amount() {
    let mut recipients = random_custom_recipients(5);
    let missing = recipients[3].address;
    recipients[3].amount = None;

    assert_eq!(
        create_merkle_tree(&recipients, &DistributionMode::Custom),
        Err(MerkleError::MissingAmount(missing))
    );
}
