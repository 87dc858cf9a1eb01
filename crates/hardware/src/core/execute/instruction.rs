//! Decoded vector instruction representation.
//!
//! A [`VecInstruction`] is what the (external) decoder hands the engine:
//! the operation, element precision, packed width or scalar form, register
//! indices, the immediate byte, the opmask operand and any EVEX rounding
//! control.

use crate::core::units::fpu::rounding_modes::RoundingMode;
use crate::core::units::fpu::softfloat::FmaSign;
use crate::core::units::fpu::{BinaryOp, UnaryOp};
use crate::core::units::vpu::width::VectorWidth;

/// Element precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Precision {
    /// binary32 lanes (`PS` / `SS`).
    Single,
    /// binary64 lanes (`PD` / `SD`).
    Double,
}

/// Packed or scalar instruction form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Form {
    /// Every lane of a vector of the given width.
    Packed(VectorWidth),
    /// Lane 0 only.
    Scalar,
}

/// Operand order of the FMA encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FmaOrder {
    /// `dst = dst * src2 + src1`.
    O132,
    /// `dst = src1 * dst + src2`.
    O213,
    /// `dst = src1 * src2 + dst`.
    O231,
}

impl FmaOrder {
    /// Orders `(dst, src1, src2)` into the `(a, b, c)` of `a * b + c`.
    pub const fn operands<T: Copy>(self, dst: T, src1: T, src2: T) -> (T, T, T) {
        match self {
            Self::O132 => (dst, src2, src1),
            Self::O213 => (src1, dst, src2),
            Self::O231 => (src1, src2, dst),
        }
    }
}

/// Vector floating-point operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VecOp {
    /// VADD.
    Add,
    /// VSUB.
    Sub,
    /// VMUL.
    Mul,
    /// VDIV.
    Div,
    /// VMIN.
    Min,
    /// VMAX.
    Max,
    /// VSQRT.
    Sqrt,
    /// VFMADD / VFMSUB / VFNMADD / VFNMSUB in one of the three operand orders.
    Fma {
        /// Sign control.
        sign: FmaSign,
        /// Operand order.
        order: FmaOrder,
    },
    /// VFIXUPIMM; `src2` holds the response table, `imm` the fault enables.
    FixupImm,
    /// VGETEXP.
    GetExp,
    /// VGETMANT; `imm[1:0]` interval, `imm[3:2]` sign control.
    GetMant,
    /// VRANGE; `imm[1:0]` operation select, `imm[3:2]` sign control.
    Range,
    /// VREDUCE; `imm[7:4]` scale, `imm[3:0]` rounding control.
    Reduce,
    /// VRNDSCALE; `imm[7:4]` scale, `imm[3:0]` rounding control.
    RndScale,
    /// VSCALEF.
    ScaleF,
    /// VCMP into an opmask register; `imm[4:0]` predicate.
    Cmp,
    /// Legacy CMPPS/CMPPD form writing all-ones / all-zeros lanes.
    CmpToVector,
    /// VFPCLASS into an opmask register; `imm` category selector.
    FpClass,
    /// Signed integer lanes to floating point of the same width (CVTDQ2PS, CVTQQ2PD).
    CvtFromInt,
    /// Floating point to signed integer lanes of the same width (CVT[T]PS2DQ, CVT[T]PD2QQ).
    CvtToInt {
        /// Truncate instead of using the rounding mode.
        truncate: bool,
    },
    /// CVTSS2SD (scalar only; `precision` is ignored).
    CvtSs2Sd,
    /// CVTSD2SS (scalar only; `precision` is ignored).
    CvtSd2Ss,
}

/// Operations producing one floating-point value per lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LaneOp {
    Binary(BinaryOp),
    Unary(UnaryOp),
    Fma(FmaSign, FmaOrder),
    FixupImm,
    GetMant,
    Range,
    Reduce,
    RndScale,
    CmpToVector,
    CvtFromInt,
    CvtToInt { truncate: bool },
}

/// How an operation produces its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OpClass {
    /// A vector register of lane values.
    Lane(LaneOp),
    /// One opmask bit per lane from a comparison.
    Compare,
    /// One opmask bit per lane from a category test.
    Classify,
    /// Scalar format conversion; `true` widens binary32 to binary64.
    Convert { widen: bool },
}

impl VecOp {
    pub(crate) const fn class(self) -> OpClass {
        match self {
            Self::Add => OpClass::Lane(LaneOp::Binary(BinaryOp::Add)),
            Self::Sub => OpClass::Lane(LaneOp::Binary(BinaryOp::Sub)),
            Self::Mul => OpClass::Lane(LaneOp::Binary(BinaryOp::Mul)),
            Self::Div => OpClass::Lane(LaneOp::Binary(BinaryOp::Div)),
            Self::Min => OpClass::Lane(LaneOp::Binary(BinaryOp::Min)),
            Self::Max => OpClass::Lane(LaneOp::Binary(BinaryOp::Max)),
            Self::ScaleF => OpClass::Lane(LaneOp::Binary(BinaryOp::ScaleF)),
            Self::Sqrt => OpClass::Lane(LaneOp::Unary(UnaryOp::Sqrt)),
            Self::GetExp => OpClass::Lane(LaneOp::Unary(UnaryOp::GetExp)),
            Self::Fma { sign, order } => OpClass::Lane(LaneOp::Fma(sign, order)),
            Self::FixupImm => OpClass::Lane(LaneOp::FixupImm),
            Self::GetMant => OpClass::Lane(LaneOp::GetMant),
            Self::Range => OpClass::Lane(LaneOp::Range),
            Self::Reduce => OpClass::Lane(LaneOp::Reduce),
            Self::RndScale => OpClass::Lane(LaneOp::RndScale),
            Self::CmpToVector => OpClass::Lane(LaneOp::CmpToVector),
            Self::CvtFromInt => OpClass::Lane(LaneOp::CvtFromInt),
            Self::CvtToInt { truncate } => OpClass::Lane(LaneOp::CvtToInt { truncate }),
            Self::Cmp => OpClass::Compare,
            Self::FpClass => OpClass::Classify,
            Self::CvtSs2Sd => OpClass::Convert { widen: true },
            Self::CvtSd2Ss => OpClass::Convert { widen: false },
        }
    }

    /// True if `imm[3:0]` overrides rounding and precision reporting.
    pub const fn uses_rounding_immediate(self) -> bool {
        matches!(self, Self::Reduce | Self::RndScale)
    }
}

/// Opmask operand `{k}` / `{k}{z}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaskOperand {
    /// Opmask register index. `k0` means "no masking".
    pub reg: u8,
    /// `{z}`: zero-masking instead of merge-masking.
    pub zeroing: bool,
}

/// EVEX rounding / exception-suppression control of register forms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EmbeddedControl {
    /// MXCSR governs rounding and reporting.
    #[default]
    None,
    /// `{sae}`: suppress all exceptions.
    Sae,
    /// `{rn-sae}` etc.: static rounding mode and suppress all exceptions.
    Round(RoundingMode),
}

/// A decoded vector floating-point instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VecInstruction {
    /// Operation.
    pub op: VecOp,
    /// Element precision.
    pub precision: Precision,
    /// Packed width or scalar.
    pub form: Form,
    /// Destination vector register, or opmask register for `Cmp`/`FpClass`.
    pub dst: u8,
    /// First source register.
    pub src1: u8,
    /// Second source register.
    pub src2: u8,
    /// Immediate control byte (0 when the encoding has none).
    pub imm: u8,
    /// Opmask operand.
    pub mask: Option<MaskOperand>,
    /// EVEX rounding control.
    pub control: EmbeddedControl,
}

impl VecInstruction {
    /// A packed instruction without mask, immediate or rounding control.
    pub const fn packed(
        op: VecOp,
        precision: Precision,
        width: VectorWidth,
        dst: u8,
        src1: u8,
        src2: u8,
    ) -> Self {
        Self {
            op,
            precision,
            form: Form::Packed(width),
            dst,
            src1,
            src2,
            imm: 0,
            mask: None,
            control: EmbeddedControl::None,
        }
    }

    /// A scalar instruction without mask, immediate or rounding control.
    pub const fn scalar(op: VecOp, precision: Precision, dst: u8, src1: u8, src2: u8) -> Self {
        Self {
            op,
            precision,
            form: Form::Scalar,
            dst,
            src1,
            src2,
            imm: 0,
            mask: None,
            control: EmbeddedControl::None,
        }
    }

    /// Sets the immediate byte.
    #[must_use]
    pub const fn with_imm(mut self, imm: u8) -> Self {
        self.imm = imm;
        self
    }

    /// Sets the opmask operand.
    #[must_use]
    pub const fn with_mask(mut self, reg: u8, zeroing: bool) -> Self {
        self.mask = Some(MaskOperand { reg, zeroing });
        self
    }

    /// Sets the EVEX rounding control.
    #[must_use]
    pub const fn with_control(mut self, control: EmbeddedControl) -> Self {
        self.control = control;
        self
    }
}
