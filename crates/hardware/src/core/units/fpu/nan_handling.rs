//! NaN propagation and the x86 MIN/MAX selection rule.
//!
//! x86 does not canonicalize NaN results. Instead:
//!
//! - **Propagation** ([`propagate2`], [`propagate3`]): the first NaN operand in
//!   source order is returned with its quiet bit set. Any signaling NaN among
//!   the operands raises Invalid, even when a different operand is returned.
//! - **Default NaN** ([`Float::default_nan`]): invalid operations without a NaN
//!   input produce the negative "QNaN indefinite" (`0xFFC00000` /
//!   `0xFFF8000000000000`).
//! - **MIN/MAX** ([`min`], [`max`]): a signaling comparison that returns the
//!   second operand whenever the first is not strictly smaller (resp. larger),
//!   which includes every NaN case and `min(+0, -0)`.

use super::compare::{Relation, compare};
use super::exception_flags::FpFlags;
use super::status::StatusContext;
use super::value::Float;

/// Propagates the NaN of a unary operation, raising Invalid for a signaling NaN.
///
/// The caller guarantees `a` is a NaN.
#[inline]
pub fn propagate1<F: Float>(a: F, status: &mut StatusContext) -> F {
    if a.is_snan() {
        status.raise(FpFlags::IE);
    }
    a.quiet()
}

/// Propagates the NaN of a two-operand operation.
///
/// The caller guarantees at least one operand is a NaN.
#[inline]
pub fn propagate2<F: Float>(a: F, b: F, status: &mut StatusContext) -> F {
    if a.is_snan() || b.is_snan() {
        status.raise(FpFlags::IE);
    }
    if a.is_nan() { a.quiet() } else { b.quiet() }
}

/// Propagates the NaN of a fused multiply-add in `a`, `b`, `c` order.
///
/// The caller guarantees at least one operand is a NaN.
#[inline]
pub fn propagate3<F: Float>(a: F, b: F, c: F, status: &mut StatusContext) -> F {
    if a.is_snan() || b.is_snan() || c.is_snan() {
        status.raise(FpFlags::IE);
    }
    if a.is_nan() {
        a.quiet()
    } else if b.is_nan() {
        b.quiet()
    } else {
        c.quiet()
    }
}

/// Applies DAZ to an input operand if the context requests it.
#[inline]
pub fn daz<F: Float>(v: F, status: &StatusContext) -> F {
    if status.denormals_are_zeros { v.flush_denormal() } else { v }
}

/// x86 MINPS/MINSD element rule.
///
/// Returns `a` only when `a < b` under a signaling comparison; otherwise the
/// (possibly DAZ-flushed) `b` is returned unmodified, including NaNs.
pub fn min<F: Float>(a: F, b: F, status: &mut StatusContext) -> F {
    let a = daz(a, status);
    let b = daz(b, status);
    if compare(a, b, true, status) == Relation::Less { a } else { b }
}

/// x86 MAXPS/MAXSD element rule.
///
/// Returns `a` only when `a > b` under a signaling comparison; otherwise `b`.
pub fn max<F: Float>(a: F, b: F, status: &mut StatusContext) -> F {
    let a = daz(a, status);
    let b = daz(b, status);
    if compare(a, b, true, status) == Relation::Greater { a } else { b }
}
