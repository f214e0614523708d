//! Serialized schema/data contracts.

/// Distribution mode and persisted distribution records.
pub mod distribution;
/// Claim-time eligibility outcomes.
pub mod eligibility;
/// Airdrop recipient entries.
pub mod recipient;
