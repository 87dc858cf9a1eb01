//! Typed IEEE 754 bit patterns.
//!
//! Every lane value travels through the engine as an opaque bit pattern. The
//! [`Float`] trait gives generic code a single view of binary32 and binary64:
//!
//! | Format   | Sign | Exponent | Fraction | Bias |
//! |----------|------|----------|----------|------|
//! | binary32 | 31   | 30..23   | 22..0    | 127  |
//! | binary64 | 63   | 62..52   | 51..0    | 1023 |
//!
//! Raw bits are carried as `u64` regardless of width so that one soft-float
//! implementation serves both formats.

use std::fmt;

/// An IEEE 754 binary interchange format viewed as a raw bit pattern.
///
/// Implementors only supply the field widths, a handful of format-specific
/// constants and the raw conversions; all classification and construction
/// helpers are provided.
pub trait Float: Copy + Clone + fmt::Debug + PartialEq + Eq + Send + Sync + 'static {
    /// Total width in bits (32 or 64).
    const WIDTH: u32;
    /// Number of explicit fraction bits (23 or 52).
    const MANT_BITS: u32;
    /// Number of exponent bits (8 or 11).
    const EXP_BITS: u32;
    /// Raw encoding of pi/2 rounded to nearest.
    const PI_HALF: u64;
    /// Bound applied to `floor(b)` by `scalef` before scaling.
    const SCALEF_CLAMP: i32;

    /// Exponent bias.
    const BIAS: i32 = (1 << (Self::EXP_BITS - 1)) - 1;
    /// All-ones biased exponent (infinity / NaN).
    const EXP_MAX: u32 = (1 << Self::EXP_BITS) - 1;
    /// Mask selecting the fraction field.
    const FRAC_MASK: u64 = (1 << Self::MANT_BITS) - 1;
    /// The implicit integer bit of a normal significand.
    const IMPLICIT_BIT: u64 = 1 << Self::MANT_BITS;
    /// The quiet bit (most significant fraction bit).
    const QUIET_BIT: u64 = 1 << (Self::MANT_BITS - 1);
    /// The sign bit.
    const SIGN_BIT: u64 = 1 << (Self::WIDTH - 1);
    /// Mask of all valid bits for this width.
    const WIDTH_MASK: u64 = if Self::WIDTH == 64 { u64::MAX } else { (1 << Self::WIDTH) - 1 };
    /// Unbiased exponent of the smallest normal number.
    const EMIN: i32 = 1 - Self::BIAS;

    /// Returns the raw bit pattern, zero-extended to 64 bits.
    fn to_raw(self) -> u64;

    /// Builds a value from a raw bit pattern; bits above [`Float::WIDTH`] are ignored.
    fn from_raw(raw: u64) -> Self;

    /// Packs sign, biased exponent and fraction fields.
    #[inline]
    fn pack(sign: bool, biased_exp: u32, frac: u64) -> Self {
        let s = if sign { Self::SIGN_BIT } else { 0 };
        Self::from_raw(s | ((biased_exp as u64) << Self::MANT_BITS) | (frac & Self::FRAC_MASK))
    }

    /// Sign bit (true = negative).
    #[inline]
    fn sign(self) -> bool {
        self.to_raw() & Self::SIGN_BIT != 0
    }

    /// Biased exponent field.
    #[inline]
    fn exponent(self) -> u32 {
        ((self.to_raw() >> Self::MANT_BITS) as u32) & Self::EXP_MAX
    }

    /// Fraction field (without the implicit bit).
    #[inline]
    fn mantissa(self) -> u64 {
        self.to_raw() & Self::FRAC_MASK
    }

    /// Returns the value with its sign bit replaced.
    #[inline]
    fn with_sign(self, sign: bool) -> Self {
        let raw = self.to_raw() & !Self::SIGN_BIT;
        Self::from_raw(if sign { raw | Self::SIGN_BIT } else { raw })
    }

    /// Returns the value with its sign bit flipped.
    #[inline]
    fn negate(self) -> Self {
        Self::from_raw(self.to_raw() ^ Self::SIGN_BIT)
    }

    /// Returns the magnitude bits (sign cleared).
    #[inline]
    fn abs_raw(self) -> u64 {
        self.to_raw() & !Self::SIGN_BIT
    }

    /// True for any NaN.
    #[inline]
    fn is_nan(self) -> bool {
        self.exponent() == Self::EXP_MAX && self.mantissa() != 0
    }

    /// True for a signaling NaN (quiet bit clear, payload non-zero).
    #[inline]
    fn is_snan(self) -> bool {
        self.is_nan() && self.to_raw() & Self::QUIET_BIT == 0
    }

    /// True for a quiet NaN.
    #[inline]
    fn is_qnan(self) -> bool {
        self.is_nan() && self.to_raw() & Self::QUIET_BIT != 0
    }

    /// True for either infinity.
    #[inline]
    fn is_inf(self) -> bool {
        self.exponent() == Self::EXP_MAX && self.mantissa() == 0
    }

    /// True for either zero.
    #[inline]
    fn is_zero(self) -> bool {
        self.abs_raw() == 0
    }

    /// True for a denormal (subnormal) number.
    #[inline]
    fn is_denormal(self) -> bool {
        self.exponent() == 0 && self.mantissa() != 0
    }

    /// Returns the NaN with its quiet bit set; non-NaN values are returned unchanged.
    #[inline]
    fn quiet(self) -> Self {
        if self.is_nan() { Self::from_raw(self.to_raw() | Self::QUIET_BIT) } else { self }
    }

    /// The x86 default NaN ("QNaN floating-point indefinite"): negative, quiet, zero payload.
    #[inline]
    fn default_nan() -> Self {
        Self::pack(true, Self::EXP_MAX, Self::QUIET_BIT)
    }

    /// Signed zero.
    #[inline]
    fn zero(sign: bool) -> Self {
        Self::pack(sign, 0, 0)
    }

    /// Signed infinity.
    #[inline]
    fn infinity(sign: bool) -> Self {
        Self::pack(sign, Self::EXP_MAX, 0)
    }

    /// Signed largest finite magnitude.
    #[inline]
    fn max_finite(sign: bool) -> Self {
        Self::pack(sign, Self::EXP_MAX - 1, Self::FRAC_MASK)
    }

    /// Signed one.
    #[inline]
    fn one(sign: bool) -> Self {
        Self::pack(sign, Self::BIAS as u32, 0)
    }

    /// Positive one half.
    #[inline]
    fn half() -> Self {
        Self::pack(false, (Self::BIAS - 1) as u32, 0)
    }

    /// Positive 90.0 (`1.40625 * 2^6`).
    #[inline]
    fn ninety() -> Self {
        Self::pack(false, (Self::BIAS + 6) as u32, 0b011010 << (Self::MANT_BITS - 6))
    }

    /// Positive pi/2.
    #[inline]
    fn pi_half() -> Self {
        Self::from_raw(Self::PI_HALF)
    }

    /// Replaces a denormal with a zero of the same sign (DAZ); other values pass through.
    #[inline]
    fn flush_denormal(self) -> Self {
        if self.is_denormal() { Self::zero(self.sign()) } else { self }
    }
}

/// IEEE 754 binary32 bit pattern.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct F32(pub u32);

/// IEEE 754 binary64 bit pattern.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct F64(pub u64);

impl Float for F32 {
    const WIDTH: u32 = 32;
    const MANT_BITS: u32 = 23;
    const EXP_BITS: u32 = 8;
    const PI_HALF: u64 = 0x3FC9_0FDB;
    const SCALEF_CLAMP: i32 = 0x200;

    #[inline]
    fn to_raw(self) -> u64 {
        self.0 as u64
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        Self(raw as u32)
    }
}

impl Float for F64 {
    const WIDTH: u32 = 64;
    const MANT_BITS: u32 = 52;
    const EXP_BITS: u32 = 11;
    const PI_HALF: u64 = 0x3FF9_21FB_5444_2D18;
    const SCALEF_CLAMP: i32 = 0x1000;

    #[inline]
    fn to_raw(self) -> u64 {
        self.0
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<f32> for F32 {
    fn from(v: f32) -> Self {
        Self(v.to_bits())
    }
}

impl From<F32> for f32 {
    fn from(v: F32) -> Self {
        Self::from_bits(v.0)
    }
}

impl From<f64> for F64 {
    fn from(v: f64) -> Self {
        Self(v.to_bits())
    }
}

impl From<F64> for f64 {
    fn from(v: F64) -> Self {
        Self::from_bits(v.0)
    }
}

impl fmt::Debug for F32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F32({:#010x} = {:e})", self.0, f32::from_bits(self.0))
    }
}

impl fmt::Debug for F64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F64({:#018x} = {:e})", self.0, f64::from_bits(self.0))
    }
}
