//! Common types shared across the engine.
//!
//! This module provides the error and fault types returned by the public API:
//! the SIMD floating-point fault, MXCSR write errors, execution errors and
//! configuration errors.

/// Error types and fault definitions.
pub mod error;

pub use error::{ConfigError, ExecError, MxcsrError, SimdFpException};
