//! Error and fault definitions.
//!
//! This module defines the error handling of the engine. It provides:
//! 1. **Fault Representation:** [`SimdFpException`], the structured SIMD
//!    floating-point fault handed to the fault-delivery collaborator.
//! 2. **Register Errors:** [`MxcsrError`] for writes touching reserved bits.
//! 3. **Execution and Configuration Errors:** [`ExecError`] and [`ConfigError`].

use thiserror::Error;

use crate::core::units::fpu::exception_flags::FpFlags;
use crate::core::units::vpu::width::VectorWidth;

/// An unmasked SIMD floating-point exception (#XM).
///
/// Produced after the lane loop has completed and the flags have been merged
/// into MXCSR. The destination register is left unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("SIMD floating-point exception: unmasked {unmasked} (reported {flags})")]
pub struct SimdFpException {
    /// Flags merged into MXCSR by the faulting instruction.
    pub flags: FpFlags,
    /// Subset of `flags` whose mask bit is clear.
    pub unmasked: FpFlags,
}

/// Errors from writing the MXCSR register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MxcsrError {
    /// A reserved bit was set (the #GP condition of LDMXCSR).
    #[error("MXCSR value {value:#010x} sets reserved bits outside {mask:#06x}")]
    ReservedBits {
        /// The rejected value.
        value: u32,
        /// Mask of implemented bits.
        mask: u32,
    },
}

/// Errors from executing one vector instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ExecError {
    /// An unmasked floating-point exception occurred.
    #[error(transparent)]
    SimdFp(#[from] SimdFpException),

    /// The instruction's vector width exceeds what the engine was configured for.
    #[error("vector width {requested:?} exceeds the configured maximum {max:?}")]
    UnsupportedWidth {
        /// Width encoded by the instruction.
        requested: VectorWidth,
        /// Configured maximum.
        max: VectorWidth,
    },
}

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The initial MXCSR value is not writable.
    #[error("invalid initial MXCSR: {0}")]
    Mxcsr(#[from] MxcsrError),
}
