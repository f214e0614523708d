//! Shared constants for CLI.

// -------------------------
// Environment variables
// -------------------------

// Common
pub const STRATA_STORE_FILE: &str = "STRATA_STORE_FILE";

// Distribution
pub const STRATA_RECIPIENTS: &str = "STRATA_RECIPIENTS";
pub const STRATA_MODE: &str = "STRATA_MODE";
pub const STRATA_AMOUNT: &str = "STRATA_AMOUNT";
pub const STRATA_DECIMALS: &str = "STRATA_DECIMALS";
pub const STRATA_DISTRIBUTION_ID: &str = "STRATA_DISTRIBUTION_ID";
pub const STRATA_DISTRIBUTION_OUT: &str = "STRATA_DISTRIBUTION_OUT";
pub const STRATA_EVENT_SIGNATURE: &str = "STRATA_EVENT_SIGNATURE";

// Claim
pub const STRATA_DISTRIBUTOR: &str = "STRATA_DISTRIBUTOR";
pub const STRATA_ONCHAIN_ROOT: &str = "STRATA_ONCHAIN_ROOT";
pub const STRATA_ELIGIBILITY_OUT: &str = "STRATA_ELIGIBILITY_OUT";

// -------------------------
// Default values
// -------------------------

// File paths
pub const DEFAULT_STORE_FILE: &str = "strata-distributions.json";

// Parsed values
pub const DEFAULT_MODE: &str = "equal";
