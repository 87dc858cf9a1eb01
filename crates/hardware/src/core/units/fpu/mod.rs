//! Floating-Point Unit (FPU).
//!
//! This module implements the per-element floating-point semantics executed
//! inside every vector lane. It handles binary32 and binary64 values through a
//! single generic soft-float implementation, so results and exception flags
//! are bit-exact regardless of the host FPU.
//!
//! Operations are organized into submodules:
//! - [`value`]: the [`Float`](value::Float) trait and the `F32`/`F64` bit patterns.
//! - [`softfloat`]: correctly rounded arithmetic, FMA, conversions and round-to-integral.
//! - [`nan_handling`]: x86 NaN propagation, DAZ and the MIN/MAX selection rule.
//! - [`compare`]: relations and the 32 comparison predicates.
//! - [`classify`], [`fixup`], [`special`]: the AVX-512 special-value transforms.
//! - [`status`], [`rounding_modes`], [`exception_flags`]: the per-instruction
//!   environment threaded through every lane.

/// Value classification and the VFPCLASS category test.
pub mod classify;

/// Comparison relations and predicate tables.
pub mod compare;

/// Floating-point exception flag types.
pub mod exception_flags;

/// VFIXUPIMM token table.
pub mod fixup;

/// NaN propagation, DAZ and MIN/MAX.
pub mod nan_handling;

/// Rounding mode definitions and support.
pub mod rounding_modes;

/// Bit-exact IEEE 754 arithmetic.
pub mod softfloat;

/// GETEXP, GETMANT, RANGE, REDUCE, RNDSCALE and SCALEF.
pub mod special;

/// Per-instruction status context.
pub mod status;

/// Typed IEEE 754 bit patterns.
pub mod value;

use self::status::StatusContext;
use self::value::Float;

/// Two-operand element operations without immediate control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a + b`.
    Add,
    /// `a - b`.
    Sub,
    /// `a * b`.
    Mul,
    /// `a / b`.
    Div,
    /// x86 MIN.
    Min,
    /// x86 MAX.
    Max,
    /// `a * 2^floor(b)`.
    ScaleF,
}

/// One-operand element operations without immediate control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Square root.
    Sqrt,
    /// Unbiased exponent.
    GetExp,
}

/// Floating-Point Unit for per-element operations.
///
/// Dispatches an operation selector to the generic implementation for the
/// element type `F`. Every call threads the instruction's
/// [`StatusContext`], which accumulates the raised flags.
#[derive(Debug)]
pub struct Fpu;

impl Fpu {
    /// Executes a two-operand element operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use vxsim_core::core::units::fpu::status::StatusContext;
    /// use vxsim_core::core::units::fpu::value::F32;
    /// use vxsim_core::core::units::fpu::{BinaryOp, Fpu};
    ///
    /// let mut status = StatusContext::default();
    /// let sum = Fpu::binary(BinaryOp::Add, F32::from(1.0_f32), F32::from(1.0_f32), &mut status);
    /// assert_eq!(sum, F32::from(2.0_f32));
    /// assert!(status.sticky_flags.is_empty());
    /// ```
    pub fn binary<F: Float>(op: BinaryOp, a: F, b: F, status: &mut StatusContext) -> F {
        match op {
            BinaryOp::Add => softfloat::add(a, b, status),
            BinaryOp::Sub => softfloat::sub(a, b, status),
            BinaryOp::Mul => softfloat::mul(a, b, status),
            BinaryOp::Div => softfloat::div(a, b, status),
            BinaryOp::Min => nan_handling::min(a, b, status),
            BinaryOp::Max => nan_handling::max(a, b, status),
            BinaryOp::ScaleF => special::scalef(a, b, status),
        }
    }

    /// Executes a one-operand element operation.
    pub fn unary<F: Float>(op: UnaryOp, a: F, status: &mut StatusContext) -> F {
        match op {
            UnaryOp::Sqrt => softfloat::sqrt(a, status),
            UnaryOp::GetExp => special::getexp(a, status),
        }
    }
}
