//! Per-precision dispatch of one instruction over its lanes.
//!
//! Everything here is generic over the element type, so packed/scalar and
//! single/double forms of an operation share one code path.

use crate::core::arch::vreg::VectorReg;
use crate::core::units::fpu::classify::fpclass;
use crate::core::units::fpu::compare::{ComparePredicate, compare_for_mask};
use crate::core::units::fpu::fixup::fixup;
use crate::core::units::fpu::softfloat::{self, convert};
use crate::core::units::fpu::special::{MantissaInterval, getmant, range, reduce, rndscale};
use crate::core::units::fpu::status::StatusContext;
use crate::core::units::fpu::value::{F32, F64, Float};
use crate::core::units::fpu::Fpu;
use crate::core::units::vpu::lanes::{collect_mask, map_lanes, map_lanes_with_dst, scalar_lane};
use crate::core::units::vpu::mask::Masking;

use super::instruction::{Form, LaneOp, OpClass, VecInstruction};

/// Register values an instruction reads.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Operands {
    pub dst: VectorReg,
    pub src1: VectorReg,
    pub src2: VectorReg,
}

/// Result of an instruction before write-back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Output {
    /// New value of the destination vector register.
    Vector(VectorReg),
    /// New value of the destination opmask register.
    Mask(u64),
}

/// Sign-extends a `F::WIDTH`-bit integer lane.
fn sign_extend<F: Float>(raw: u64) -> i64 {
    let shift = 64 - F::WIDTH;
    ((raw << shift) as i64) >> shift
}

/// Computes lane `i` of a lane-valued operation.
///
/// `unary` is the source of one-operand operations: `src1` for packed forms,
/// `src2` for scalar forms.
fn lane_value<F: Float>(
    op: LaneOp,
    imm: u8,
    operands: &Operands,
    unary: &VectorReg,
    i: usize,
    prior: F,
    status: &mut StatusContext,
) -> F {
    let a = || operands.src1.lane::<F>(i);
    let b = || operands.src2.lane::<F>(i);
    match op {
        LaneOp::Binary(op) => Fpu::binary(op, a(), b(), status),
        LaneOp::Unary(op) => Fpu::unary(op, unary.lane(i), status),
        LaneOp::Fma(sign, order) => {
            let (x, y, z) = order.operands(prior, a(), b());
            softfloat::fma(x, y, z, sign, status)
        }
        LaneOp::FixupImm => fixup(prior, a(), operands.src2.lane_bits(F::WIDTH, i), imm, status),
        LaneOp::GetMant => getmant(unary.lane(i), (imm >> 2) & 0x3, MantissaInterval::from_imm(imm), status),
        LaneOp::Range => range(a(), b(), imm & 0x3, (imm >> 2) & 0x3, status),
        LaneOp::Reduce => reduce(unary.lane(i), imm >> 4, status),
        LaneOp::RndScale => rndscale(unary.lane(i), imm >> 4, status),
        LaneOp::CmpToVector => {
            if compare_for_mask(a(), b(), ComparePredicate::from_imm(imm), status) {
                F::from_raw(F::WIDTH_MASK)
            } else {
                F::zero(false)
            }
        }
        LaneOp::CvtFromInt => {
            softfloat::from_int(sign_extend::<F>(unary.lane_bits(F::WIDTH, i)), status)
        }
        LaneOp::CvtToInt { truncate } => {
            F::from_raw(softfloat::to_int(unary.lane::<F>(i), F::WIDTH, truncate, status) as u64)
        }
    }
}

/// Runs `inst` with element type `F` and returns the value to write back.
pub(crate) fn run<F: Float>(
    inst: &VecInstruction,
    operands: &Operands,
    masking: Masking,
    status: &mut StatusContext,
) -> Output {
    let (count, scalar) = match inst.form {
        Form::Packed(width) => (width.lanes::<F>(), false),
        Form::Scalar => (1, true),
    };
    let unary = if scalar { &operands.src2 } else { &operands.src1 };
    let dst = &operands.dst;
    let imm = inst.imm;

    match inst.op.class() {
        OpClass::Lane(op) => {
            let reg = if scalar {
                scalar_lane(masking, dst, || lane_value::<F>(op, imm, operands, unary, 0, dst.lane(0), status))
            } else if op == LaneOp::FixupImm || matches!(op, LaneOp::Fma(..)) {
                map_lanes_with_dst::<F>(count, masking, dst, |i, prior| {
                    lane_value(op, imm, operands, unary, i, prior, status)
                })
            } else {
                map_lanes(count, masking, dst, |i| {
                    lane_value::<F>(op, imm, operands, unary, i, dst.lane(i), status)
                })
            };
            Output::Vector(reg)
        }
        OpClass::Compare => {
            let predicate = ComparePredicate::from_imm(imm);
            Output::Mask(collect_mask(count, masking.mask, |i| {
                compare_for_mask(operands.src1.lane::<F>(i), operands.src2.lane::<F>(i), predicate, status)
            }))
        }
        // Category tests ignore DAZ.
        OpClass::Classify => Output::Mask(collect_mask(count, masking.mask, |i| {
            fpclass(operands.src1.lane::<F>(i), imm, false)
        })),
        OpClass::Convert { widen: true } => Output::Vector(scalar_lane(masking, dst, || {
            convert::<F32, F64>(operands.src2.lane(0), status)
        })),
        OpClass::Convert { widen: false } => Output::Vector(scalar_lane(masking, dst, || {
            convert::<F64, F32>(operands.src2.lane(0), status)
        })),
    }
}
