//! Lane iteration and masked write-back.
//!
//! Two packed families exist:
//! - [`map_lanes`]: compute every active lane, then blend the whole register
//!   over the prior destination.
//! - [`map_lanes_with_dst`]: the lane operation itself consumes the prior
//!   destination lane (VFIXUPIMM), and unselected lanes are resolved inside
//!   the loop.
//!
//! Inactive lanes are never computed, so they cannot raise exception flags.
//! Every builder starts from a zeroed register, which clears the bits above
//! the instruction's vector width.

use crate::core::arch::vreg::VectorReg;
use crate::core::units::fpu::value::Float;

use super::mask::{LaneMask, MaskPolicy, Masking, blend};

/// Calls `op(i)` for every active lane in `0..count`, in ascending order.
pub fn for_each_lane(count: usize, mask: LaneMask, mut op: impl FnMut(usize)) {
    for i in (0..count).filter(|&i| mask.is_active(i)) {
        op(i);
    }
}

/// Blends `computed` over `dst` lane by lane for the first `count` lanes.
pub fn blend_register<F: Float>(
    count: usize,
    masking: Masking,
    dst: &VectorReg,
    computed: &VectorReg,
) -> VectorReg {
    let mut out = VectorReg::ZERO;
    for i in 0..count {
        let value = blend(
            dst.lane_bits(F::WIDTH, i),
            computed.lane_bits(F::WIDTH, i),
            masking.mask.is_active(i),
            masking.policy,
        );
        out.set_lane_bits(F::WIDTH, i, value);
    }
    out
}

/// Computes `op(i)` for every active lane and blends the result over `dst`.
pub fn map_lanes<F: Float>(
    count: usize,
    masking: Masking,
    dst: &VectorReg,
    mut op: impl FnMut(usize) -> F,
) -> VectorReg {
    let mut computed = VectorReg::ZERO;
    for_each_lane(count, masking.mask, |i| computed.set_lane(i, op(i)));
    blend_register::<F>(count, masking, dst, &computed)
}

/// Computes `op(i, dst[i])` for every active lane; inactive lanes keep
/// `dst[i]` or become zero per the policy.
pub fn map_lanes_with_dst<F: Float>(
    count: usize,
    masking: Masking,
    dst: &VectorReg,
    mut op: impl FnMut(usize, F) -> F,
) -> VectorReg {
    let mut out = VectorReg::ZERO;
    for i in 0..count {
        let prior: F = dst.lane(i);
        let value = if masking.mask.is_active(i) {
            op(i, prior)
        } else {
            match masking.policy {
                MaskPolicy::Merge => prior,
                MaskPolicy::Zero => F::zero(false),
            }
        };
        out.set_lane(i, value);
    }
    out
}

/// Builds a mask register value: bit `i` is `pred(i)` for active lanes and
/// zero for inactive lanes and lanes at or above `count`.
pub fn collect_mask(count: usize, mask: LaneMask, mut pred: impl FnMut(usize) -> bool) -> u64 {
    let mut bits = 0u64;
    for_each_lane(count, mask, |i| {
        if pred(i) {
            bits |= 1 << i;
        }
    });
    bits
}

/// Scalar write-back: lane 0 is `op()` when mask bit 0 is set, otherwise the
/// prior destination lane (merge) or zero. Every other lane is cleared.
pub fn scalar_lane<F: Float>(masking: Masking, dst: &VectorReg, op: impl FnOnce() -> F) -> VectorReg {
    let mut out = VectorReg::ZERO;
    let value = if masking.mask.is_active(0) {
        op()
    } else {
        match masking.policy {
            MaskPolicy::Merge => dst.lane(0),
            MaskPolicy::Zero => F::zero(false),
        }
    };
    out.set_lane(0, value);
    out
}
