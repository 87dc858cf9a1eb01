//! Shared test infrastructure.

/// Test context for running instructions against a register file.
pub mod harness;
