//! Workflow logic behind the `strata` CLI.

/// Application command implementations.
pub mod commands;
/// CLI-independent configuration types.
pub mod common;
/// Transaction receipt decoding.
pub mod receipt;
/// Recipient list parsing.
pub mod recipients;
/// Distribution persistence.
pub mod store;
