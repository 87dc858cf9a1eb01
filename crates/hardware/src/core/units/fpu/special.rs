//! AVX-512 special transforms: VGETEXP, VGETMANT, VRANGE, VREDUCE,
//! VRNDSCALE and VSCALEF.
//!
//! Immediate decoding is done by the caller; these functions take the
//! already split control fields. The rounding override of VREDUCE and
//! VRNDSCALE is applied to the [`StatusContext`] by the caller before the
//! first lane runs.

use super::exception_flags::FpFlags;
use super::nan_handling::{daz, propagate1, propagate2};
use super::softfloat::{from_int, round_pack, round_to_int, sub};
use super::status::StatusContext;
use super::value::Float;

/// Leading-one index of a non-zero fraction field.
fn frac_msb(frac: u64) -> i32 {
    63 - frac.leading_zeros() as i32
}

/// Unbiased exponent of `v` as a floating-point value.
///
/// `±∞ → +∞`, `±0 → -∞`. Denormals raise DE and report the exponent of
/// their normalized form.
pub fn getexp<F: Float>(v: F, status: &mut StatusContext) -> F {
    if v.is_nan() {
        return propagate1(v, status);
    }
    if v.is_inf() {
        return F::infinity(false);
    }
    let v = daz(v, status);
    if v.is_zero() {
        return F::infinity(true);
    }
    let exp = if v.is_denormal() {
        status.raise(FpFlags::DE);
        frac_msb(v.mantissa()) + F::EMIN - F::MANT_BITS as i32
    } else {
        v.exponent() as i32 - F::BIAS
    };
    // Exponents fit well inside the significand, so the conversion is exact.
    from_int(i64::from(exp), status)
}

/// Normalization interval of VGETMANT (`imm8[1:0]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MantissaInterval {
    /// `[1, 2)`.
    OneToTwo,
    /// `[1/2, 2)`.
    HalfToTwo,
    /// `[1/2, 1)`.
    HalfToOne,
    /// `[3/4, 3/2)`.
    ThreeQuartersToThreeHalves,
}

impl MantissaInterval {
    /// Decodes `imm8[1:0]`.
    pub const fn from_imm(imm: u8) -> Self {
        match imm & 0x3 {
            0 => Self::OneToTwo,
            1 => Self::HalfToTwo,
            2 => Self::HalfToOne,
            _ => Self::ThreeQuartersToThreeHalves,
        }
    }
}

/// Normalized mantissa of `v`.
///
/// `sign_ctrl` is `imm8[3:2]`: bit 0 forces a positive result, bit 1 makes a
/// negative source invalid.
pub fn getmant<F: Float>(
    v: F,
    sign_ctrl: u8,
    interval: MantissaInterval,
    status: &mut StatusContext,
) -> F {
    let force_positive = sign_ctrl & 0x1 != 0;
    let negative_invalid = sign_ctrl & 0x2 != 0;
    if v.is_nan() {
        return propagate1(v, status);
    }
    let v = daz(v, status);
    let sign = v.sign();
    let out_sign = sign && !force_positive;

    if v.is_inf() {
        if sign && negative_invalid {
            status.raise(FpFlags::IE);
            return F::default_nan();
        }
        return F::one(out_sign);
    }
    if v.is_zero() {
        return F::one(out_sign);
    }
    if sign && negative_invalid {
        status.raise(FpFlags::IE);
        return F::default_nan();
    }

    let (frac, biased) = if v.is_denormal() {
        status.raise(FpFlags::DE);
        let shift = F::MANT_BITS as i32 - frac_msb(v.mantissa());
        (v.mantissa() << shift, 1 - shift)
    } else {
        (v.mantissa(), v.exponent() as i32)
    };
    let exp = match interval {
        MantissaInterval::OneToTwo => F::BIAS,
        MantissaInterval::HalfToTwo => F::BIAS - ((biased - F::BIAS) & 1),
        MantissaInterval::HalfToOne => F::BIAS - 1,
        MantissaInterval::ThreeQuartersToThreeHalves => {
            F::BIAS - ((frac >> (F::MANT_BITS - 1)) & 1) as i32
        }
    };
    F::pack(out_sign, exp as u32, frac)
}

/// Total order on non-NaN values with `-0 < +0`.
fn signed_key<F: Float>(v: F) -> i128 {
    let mag = i128::from(v.abs_raw());
    if v.sign() { -mag - 1 } else { mag }
}

/// VRANGE for one lane.
///
/// `opselect` is `imm8[1:0]`: bit 0 selects max over min, bit 1 compares
/// absolute values. `sign_ctrl` is `imm8[3:2]`: 0 takes the sign of `a`,
/// 1 keeps the selected value's sign, 2 clears it and 3 sets it.
pub fn range<F: Float>(a: F, b: F, opselect: u8, sign_ctrl: u8, status: &mut StatusContext) -> F {
    if a.is_snan() {
        status.raise(FpFlags::IE);
        return a.quiet();
    }
    if b.is_snan() {
        status.raise(FpFlags::IE);
        return b.quiet();
    }

    let a_nan = a.is_qnan();
    let b_nan = b.is_qnan();
    let a = adjust_denormal(a, b_nan, status);
    let b = adjust_denormal(b, a_nan, status);

    let selected = match (a_nan, b_nan) {
        (true, false) => b,
        (true, true) | (false, true) => a,
        (false, false) => {
            let a_first = if opselect & 0x2 == 0 {
                signed_key(a) <= signed_key(b)
            } else {
                a.abs_raw() <= b.abs_raw()
            };
            let pick_a = if opselect & 0x1 == 0 { a_first } else { !a_first };
            if pick_a { a } else { b }
        }
    };

    match sign_ctrl & 0x3 {
        0 => selected.with_sign(a.sign()),
        1 => selected,
        2 => selected.with_sign(false),
        _ => selected.with_sign(true),
    }
}

/// Applies DAZ to a VRANGE operand or raises DE for it. DE is only reported
/// when the other operand is not a quiet NaN.
fn adjust_denormal<F: Float>(v: F, other_is_qnan: bool, status: &mut StatusContext) -> F {
    if !v.is_denormal() {
        return v;
    }
    if status.denormals_are_zeros {
        return v.flush_denormal();
    }
    if !other_is_qnan {
        status.raise(FpFlags::DE);
    }
    v
}

/// VRNDSCALE: rounds `a` to a multiple of `2^-scale`.
pub fn rndscale<F: Float>(a: F, scale: u8, status: &mut StatusContext) -> F {
    round_to_int(a, scale, status)
}

/// VREDUCE: `a - round_to_int(a, scale)`.
///
/// Both steps share `status`, so flags of the rounding step and the
/// subtraction accumulate together. `±∞` reduces to `+0`.
pub fn reduce<F: Float>(a: F, scale: u8, status: &mut StatusContext) -> F {
    if a.is_nan() {
        return propagate1(a, status);
    }
    if a.is_inf() {
        return F::zero(false);
    }
    let rounded = round_to_int(a, scale, status);
    sub(a, rounded, status)
}

/// `floor(b)` for finite non-zero `b`, clamped to `±F::SCALEF_CLAMP`.
fn scale_exponent<F: Float>(b: F) -> i32 {
    let clamp = F::SCALEF_CLAMP;
    let negative = b.sign();
    let field = b.exponent() as i32;
    let unbiased = field - F::BIAS;
    if field == 0 || unbiased < 0 {
        return if negative { -1 } else { 0 };
    }
    if unbiased >= 31 {
        return if negative { -clamp } else { clamp };
    }
    let sig = b.mantissa() | F::IMPLICIT_BIT;
    let frac_bits = F::MANT_BITS as i32 - unbiased;
    let (int_part, has_frac) = if frac_bits > 0 {
        (sig >> frac_bits, sig & ((1u64 << frac_bits) - 1) != 0)
    } else {
        (sig << -frac_bits, false)
    };
    let int_part = int_part as i64;
    let floor = if negative { -int_part - i64::from(has_frac) } else { int_part };
    floor.clamp(-i64::from(clamp), i64::from(clamp)) as i32
}

/// VSCALEF: `a * 2^floor(b)` with a single rounding.
pub fn scalef<F: Float>(a: F, b: F, status: &mut StatusContext) -> F {
    let a = daz(a, status);
    let b = daz(b, status);
    if b.is_nan() {
        return propagate2(a, b, status);
    }
    if a.is_nan() {
        if a.is_snan() || !b.is_inf() {
            return propagate2(a, b, status);
        }
        return if b.sign() { F::zero(false) } else { F::infinity(false) };
    }
    if a.is_inf() {
        if b.is_inf() && b.sign() {
            status.raise(FpFlags::IE);
            return F::default_nan();
        }
        return a;
    }
    if a.is_zero() {
        if b.is_inf() && !b.sign() {
            status.raise(FpFlags::IE);
            return F::default_nan();
        }
        return a;
    }
    if a.is_denormal() {
        status.raise(FpFlags::DE);
    }
    if b.is_zero() {
        return a;
    }
    if b.is_inf() {
        return if b.sign() { F::zero(a.sign()) } else { F::infinity(a.sign()) };
    }
    if b.is_denormal() {
        status.raise(FpFlags::DE);
    }

    let scale = scale_exponent(b);
    let (sig, exp) = if a.exponent() == 0 {
        (a.mantissa(), F::EMIN - F::MANT_BITS as i32)
    } else {
        (a.mantissa() | F::IMPLICIT_BIT, a.exponent() as i32 - F::BIAS - F::MANT_BITS as i32)
    };
    round_pack(a.sign(), u128::from(sig), exp + scale, status)
}
