//! Core vector floating-point implementation.
//!
//! This module contains the architectural state, the per-element execution
//! units and the facade that executes one decoded instruction.

/// Architectural state (MXCSR, vector and opmask registers).
pub mod arch;

/// Operation dispatch facade.
pub mod execute;

/// Execution units (FPU element semantics, VPU lane engine).
pub mod units;

pub use self::execute::Vpu;
