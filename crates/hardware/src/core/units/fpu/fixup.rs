//! Special-value fix-up (VFIXUPIMM).
//!
//! The source operand is reduced to one of eight [`FixupToken`]s. The token
//! indexes a 4-bit field of the per-lane response table, and the selected
//! [`FixupResponse`] builds the result. The immediate independently enables
//! Invalid or Divide-by-zero reporting for some tokens; the flags are raised
//! alongside the table result, never instead of it.

use super::exception_flags::FpFlags;
use super::nan_handling::daz;
use super::status::StatusContext;
use super::value::Float;

/// Token index of a source value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FixupToken {
    /// Quiet NaN.
    QNan = 0,
    /// Signaling NaN.
    SNan = 1,
    /// `±0`.
    Zero = 2,
    /// Exactly `+1.0`.
    PosOne = 3,
    /// `-∞`.
    NegInf = 4,
    /// `+∞`.
    PosInf = 5,
    /// Any other negative value.
    NegValue = 6,
    /// Any other positive value.
    PosValue = 7,
}

impl FixupToken {
    /// Classifies an already DAZ-adjusted source.
    pub fn of<F: Float>(v: F) -> Self {
        if v.is_nan() {
            if v.is_snan() { Self::SNan } else { Self::QNan }
        } else if v.is_zero() {
            Self::Zero
        } else if v.is_inf() {
            if v.sign() { Self::NegInf } else { Self::PosInf }
        } else if v == F::one(false) {
            Self::PosOne
        } else if v.sign() {
            Self::NegValue
        } else {
            Self::PosValue
        }
    }

    /// `imm8` bits that enable (ZE, IE) faults for this token.
    const fn fault_bits(self) -> (u8, u8) {
        match self {
            Self::Zero => (1 << 0, 1 << 1),
            Self::PosOne => (1 << 2, 1 << 3),
            Self::SNan => (0, 1 << 4),
            Self::NegInf => (0, 1 << 5),
            Self::NegValue => (0, 1 << 6),
            Self::PosInf => (0, 1 << 7),
            Self::QNan | Self::PosValue => (0, 0),
        }
    }
}

/// Response selected by a 4-bit field of the table operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FixupResponse {
    /// Keep the destination lane.
    Dest = 0,
    /// The (DAZ-adjusted) source.
    Source = 1,
    /// The source quieted if it is a NaN, otherwise the source unchanged.
    QuietSource = 2,
    /// The default NaN.
    DefaultNan = 3,
    /// `-∞`.
    NegInf = 4,
    /// `+∞`.
    PosInf = 5,
    /// `∞` with the source's sign.
    SignedInf = 6,
    /// `-0`.
    NegZero = 7,
    /// `+0`.
    PosZero = 8,
    /// `-1.0`.
    NegOne = 9,
    /// `+1.0`.
    PosOne = 10,
    /// `+0.5`.
    Half = 11,
    /// `+90.0`.
    Ninety = 12,
    /// `+π/2`.
    PiHalf = 13,
    /// Largest positive finite value.
    PosMax = 14,
    /// Largest negative finite value.
    NegMax = 15,
}

const RESPONSES: [FixupResponse; 16] = {
    use FixupResponse::{
        DefaultNan, Dest, Half, NegInf, NegMax, NegOne, NegZero, Ninety, PiHalf, PosInf, PosMax,
        PosOne, PosZero, QuietSource, SignedInf, Source,
    };
    [
        Dest, Source, QuietSource, DefaultNan, NegInf, PosInf, SignedInf, NegZero, PosZero,
        NegOne, PosOne, Half, Ninety, PiHalf, PosMax, NegMax,
    ]
};

impl FixupResponse {
    /// Decodes a 4-bit response field.
    pub const fn from_nibble(code: u32) -> Self {
        RESPONSES[(code & 0xF) as usize]
    }

    /// Builds the response value for `dst` and the adjusted source `src`.
    pub fn apply<F: Float>(self, dst: F, src: F) -> F {
        match self {
            Self::Dest => dst,
            Self::Source => src,
            Self::QuietSource => src.quiet(),
            Self::DefaultNan => F::default_nan(),
            Self::NegInf => F::infinity(true),
            Self::PosInf => F::infinity(false),
            Self::SignedInf => F::infinity(src.sign()),
            Self::NegZero => F::zero(true),
            Self::PosZero => F::zero(false),
            Self::NegOne => F::one(true),
            Self::PosOne => F::one(false),
            Self::Half => F::half(),
            Self::Ninety => F::ninety(),
            Self::PiHalf => F::pi_half(),
            Self::PosMax => F::max_finite(false),
            Self::NegMax => F::max_finite(true),
        }
    }
}

/// Fixes up one lane.
///
/// `table` is the lane of the table operand; only its low 32 bits are used.
/// `imm` enables IE and ZE for the source's token; both may be raised for
/// one lane. The result always comes from the response table, which itself
/// never raises flags, so an unreported signaling NaN is silent.
pub fn fixup<F: Float>(dst: F, src: F, table: u64, imm: u8, status: &mut StatusContext) -> F {
    let src = daz(src, status);
    let token = FixupToken::of(src);
    let (ze_bit, ie_bit) = token.fault_bits();
    if imm & ie_bit != 0 {
        status.raise(FpFlags::IE);
    }
    if imm & ze_bit != 0 {
        status.raise(FpFlags::ZE);
    }
    let code = (table >> (4 * token as u32)) as u32;
    FixupResponse::from_nibble(code).apply(dst, src)
}
