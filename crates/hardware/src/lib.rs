//! Masked vector floating-point execution engine.
//!
//! This crate implements the x86 SSE/AVX/AVX-512 floating-point instruction
//! family bit-exactly, with the following:
//! 1. **FPU:** Generic soft-float element semantics (arithmetic, FMA, conversions,
//!    comparisons, classification and the AVX-512 special transforms).
//! 2. **Status:** MXCSR, the per-instruction status context and exception precedence.
//! 3. **VPU:** Lane iteration over 128/256/512-bit vectors with merge or zero masking.
//! 4. **Execute:** The facade that runs one decoded instruction against a register file.

/// Common types (faults and errors).
pub mod common;
/// Engine configuration (defaults and JSON loading).
pub mod config;
/// Architectural state, execution units and the dispatch facade.
pub mod core;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Control/status register.
pub use crate::core::arch::mxcsr::Mxcsr;
/// Vector register value, register file trait and in-memory register file.
pub use crate::core::arch::vreg::{VectorReg, VectorRegisterFile, VectorRegs};
/// Instruction types.
pub use crate::core::execute::{
    EmbeddedControl, FmaOrder, Form, Precision, VecInstruction, VecOp, Vpu,
};
/// Element-level types.
pub use crate::core::units::fpu::{
    exception_flags::FpFlags, rounding_modes::RoundingMode, softfloat::FmaSign,
    status::StatusContext, value::{F32, F64, Float},
};
/// Lane engine types.
pub use crate::core::units::vpu::{LaneMask, MaskPolicy, Masking, VectorWidth};
/// Error types.
pub use crate::common::error::{ConfigError, ExecError, MxcsrError, SimdFpException};
