//! Value classification (VFPCLASS).

use super::value::Float;

/// Category of a single value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// `±0` (or a denormal when DAZ is on).
    Zero,
    /// Normal finite number.
    Normal,
    /// Denormal finite number.
    Denormal,
    /// Signaling NaN.
    SignalingNan,
    /// Quiet NaN.
    QuietNan,
    /// `+∞`.
    PositiveInfinity,
    /// `-∞`.
    NegativeInfinity,
}

/// Classifies `v`. With `daz` set a denormal reports [`Category::Zero`].
pub fn classify<F: Float>(v: F, daz: bool) -> Category {
    if v.is_nan() {
        if v.is_snan() { Category::SignalingNan } else { Category::QuietNan }
    } else if v.is_inf() {
        if v.sign() { Category::NegativeInfinity } else { Category::PositiveInfinity }
    } else if v.is_zero() || (daz && v.is_denormal()) {
        Category::Zero
    } else if v.is_denormal() {
        Category::Denormal
    } else {
        Category::Normal
    }
}

/// VFPCLASS category bits.
pub mod class_bits {
    /// Quiet NaN.
    pub const QNAN: u8 = 1 << 0;
    /// `+0`.
    pub const POS_ZERO: u8 = 1 << 1;
    /// `-0`.
    pub const NEG_ZERO: u8 = 1 << 2;
    /// `+∞`.
    pub const POS_INF: u8 = 1 << 3;
    /// `-∞`.
    pub const NEG_INF: u8 = 1 << 4;
    /// Denormal.
    pub const DENORMAL: u8 = 1 << 5;
    /// Negative finite.
    pub const NEG_FINITE: u8 = 1 << 6;
    /// Signaling NaN.
    pub const SNAN: u8 = 1 << 7;
}

/// Category bits that describe `v`. More than one bit may be set, e.g. a
/// negative denormal matches both `DENORMAL` and `NEG_FINITE`.
pub fn class_of<F: Float>(v: F, daz: bool) -> u8 {
    use class_bits::{DENORMAL, NEG_FINITE, NEG_INF, NEG_ZERO, POS_INF, POS_ZERO, QNAN, SNAN};
    match classify(v, daz) {
        Category::QuietNan => QNAN,
        Category::SignalingNan => SNAN,
        Category::PositiveInfinity => POS_INF,
        Category::NegativeInfinity => NEG_INF,
        Category::Zero => {
            if v.sign() { NEG_ZERO } else { POS_ZERO }
        }
        Category::Denormal => DENORMAL | if v.sign() { NEG_FINITE } else { 0 },
        Category::Normal => {
            if v.sign() { NEG_FINITE } else { 0 }
        }
    }
}

/// True if `v` belongs to any category selected by `selector`. Raises no flags.
pub fn fpclass<F: Float>(v: F, selector: u8, daz: bool) -> bool {
    class_of(v, daz) & selector != 0
}
