//! Bit-exact IEEE 754 arithmetic.
//!
//! All operations work on an unpacked magnitude `sig * 2^exp` held in a
//! `u128`, which is wide enough to carry a binary64 product exactly. Each
//! result is rounded exactly once by [`round_pack`], which is also where
//! overflow, underflow, flush-to-zero and inexact are decided.
//!
//! Exception detection order follows the x86 precedence rules:
//! 1. NaN operands (Invalid if any is signaling) → propagated NaN.
//! 2. Invalid operations (∞−∞, 0×∞, 0/0, ∞/∞, √−x) and divide-by-zero.
//! 3. Denormal operand.
//! 4. Overflow / underflow / precision from rounding.

use std::cmp::Ordering;

use super::exception_flags::FpFlags;
use super::nan_handling::{daz, propagate1, propagate2, propagate3};
use super::rounding_modes::RoundingMode;
use super::status::StatusContext;
use super::value::Float;

/// Leading-bit position used to line up addends before an exact sum.
const ALIGN_MSB: u32 = 125;

/// Sign-control variants of the fused multiply-add primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FmaSign {
    /// `a*b + c` (VFMADD).
    None,
    /// `a*b - c` (VFMSUB).
    NegateAddend,
    /// `-(a*b) + c` (VFNMADD).
    NegateProduct,
    /// `-(a*b) - c` (VFNMSUB). Both terms are negated before the single
    /// rounding, so directed rounding modes see the negated exact value.
    NegateResult,
}

impl FmaSign {
    const fn negates_product(self) -> bool {
        matches!(self, Self::NegateProduct | Self::NegateResult)
    }

    const fn negates_addend(self) -> bool {
        matches!(self, Self::NegateAddend | Self::NegateResult)
    }
}

/// A finite magnitude `(-1)^sign * sig * 2^exp`. `sig == 0` encodes zero.
#[derive(Clone, Copy, Debug)]
struct Unpacked {
    sign: bool,
    exp: i32,
    sig: u128,
}

impl Unpacked {
    fn of<F: Float>(v: F) -> Self {
        let field = v.exponent();
        if field == 0 {
            Self { sign: v.sign(), exp: F::EMIN - F::MANT_BITS as i32, sig: v.mantissa() as u128 }
        } else {
            Self {
                sign: v.sign(),
                exp: field as i32 - F::BIAS - F::MANT_BITS as i32,
                sig: (v.mantissa() | F::IMPLICIT_BIT) as u128,
            }
        }
    }

    /// Index of the leading one; `sig` must be non-zero.
    fn msb(self) -> u32 {
        127 - self.sig.leading_zeros()
    }

    /// Shifts the significand left so its leading one sits at `target`.
    fn normalized(self, target: u32) -> Self {
        let shift = target - self.msb();
        Self { sign: self.sign, exp: self.exp - shift as i32, sig: self.sig << shift }
    }
}

/// Shifts right by `shift` bits, ORing every discarded bit into bit 0.
fn shift_right_jam(sig: u128, shift: i32) -> u128 {
    if shift <= 0 {
        sig
    } else if shift >= 128 {
        u128::from(sig != 0)
    } else {
        let s = shift as u32;
        (sig >> s) | u128::from(sig & ((1u128 << s) - 1) != 0)
    }
}

/// Shifts right by `shift` bits and rounds the discarded part away per `rm`.
///
/// A non-positive `shift` is an exact left shift. Returns the rounded value
/// and whether anything non-zero was discarded.
fn shift_round(sig: u128, shift: i32, sign: bool, rm: RoundingMode) -> (u128, bool) {
    if shift <= 0 {
        return (sig << shift.unsigned_abs(), false);
    }
    let (kept, rem, half) = if shift > 128 {
        (0, sig, None)
    } else if shift == 128 {
        (0, sig, Some(1u128 << 127))
    } else {
        let s = shift as u32;
        (sig >> s, sig & ((1u128 << s) - 1), Some(1u128 << (s - 1)))
    };
    let inexact = rem != 0;
    let half_cmp = half.map_or(Ordering::Less, |h| rem.cmp(&h));
    let up = rm.rounds_up(sign, half_cmp, kept & 1 == 1, inexact);
    (kept + u128::from(up), inexact)
}

/// Result delivered on overflow for each rounding direction.
fn overflow_result<F: Float>(sign: bool, rm: RoundingMode) -> F {
    match rm {
        RoundingMode::Rne => F::infinity(sign),
        RoundingMode::Rtz => F::max_finite(sign),
        RoundingMode::Rdn => {
            if sign { F::infinity(true) } else { F::max_finite(false) }
        }
        RoundingMode::Rup => {
            if sign { F::max_finite(true) } else { F::infinity(false) }
        }
    }
}

/// Rounds `(-1)^sign * sig * 2^exp` into `F`.
///
/// Tininess is detected after rounding. A tiny result raises UE when it is
/// also inexact, or unconditionally when underflow is unmasked. With FTZ a
/// tiny result is replaced by a signed zero and UE|PE are raised.
pub(crate) fn round_pack<F: Float>(sign: bool, sig: u128, exp: i32, status: &mut StatusContext) -> F {
    if sig == 0 {
        return F::zero(sign);
    }
    let rm = status.rounding_mode;
    let p = F::MANT_BITS as i32;
    let msb = 127 - sig.leading_zeros() as i32;
    let mut e = msb + exp;
    let normal_shift = msb - p;

    if e >= F::EMIN {
        let (mut m, inexact) = shift_round(sig, normal_shift, sign, rm);
        if m >> (p + 1) != 0 {
            m >>= 1;
            e += 1;
        }
        if e > F::BIAS {
            status.raise(FpFlags::OE | FpFlags::PE);
            return overflow_result(sign, rm);
        }
        if inexact {
            status.raise(FpFlags::PE);
        }
        return F::pack(sign, (e + F::BIAS) as u32, m as u64);
    }

    let (unbounded, _) = shift_round(sig, normal_shift, sign, rm);
    let carried = unbounded >> (p + 1) != 0;
    let tiny = !(carried && e + 1 >= F::EMIN);

    let (m, inexact) = shift_round(sig, F::EMIN - p - exp, sign, rm);
    if tiny && status.flush_underflow_to_zero {
        status.raise(FpFlags::UE | FpFlags::PE);
        return F::zero(sign);
    }
    if tiny && (inexact || !status.is_masked(FpFlags::UE)) {
        status.raise(FpFlags::UE);
    }
    if inexact {
        status.raise(FpFlags::PE);
    }
    // A carry into bit MANT_BITS lands in the exponent field as the smallest normal.
    F::from_raw(if sign { F::SIGN_BIT } else { 0 } | m as u64)
}

/// Raises DE if any operand is still denormal (DAZ already applied).
fn check_denormal<F: Float>(operands: &[F], status: &mut StatusContext) {
    if operands.iter().any(|v| v.is_denormal()) {
        status.raise(FpFlags::DE);
    }
}

/// Sign of an exact zero sum: the common sign, or `+0` unless rounding down.
const fn zero_sum_sign(x: bool, y: bool, rm: RoundingMode) -> bool {
    if x == y { x } else { matches!(rm, RoundingMode::Rdn) }
}

/// Exact sum of two finite terms, rounded once.
fn add_terms<F: Float>(x: Unpacked, y: Unpacked, status: &mut StatusContext) -> F {
    let rm = status.rounding_mode;
    match (x.sig == 0, y.sig == 0) {
        (true, true) => return F::zero(zero_sum_sign(x.sign, y.sign, rm)),
        (true, false) => return round_pack(y.sign, y.sig, y.exp, status),
        (false, true) => return round_pack(x.sign, x.sig, x.exp, status),
        (false, false) => {}
    }

    let x = x.normalized(ALIGN_MSB);
    let y = y.normalized(ALIGN_MSB);
    let (big, small) = if (x.exp, x.sig) >= (y.exp, y.sig) { (x, y) } else { (y, x) };
    let small_sig = shift_right_jam(small.sig, big.exp - small.exp);

    if big.sign == small.sign {
        return round_pack(big.sign, big.sig + small_sig, big.exp, status);
    }
    let diff = big.sig - small_sig;
    if diff == 0 {
        return F::zero(rm == RoundingMode::Rdn);
    }
    round_pack(big.sign, diff, big.exp, status)
}

fn add_signed<F: Float>(a: F, b: F, negate_b: bool, status: &mut StatusContext) -> F {
    let a = daz(a, status);
    let b = daz(b, status);
    if a.is_nan() || b.is_nan() {
        return propagate2(a, b, status);
    }
    let b_sign = b.sign() ^ negate_b;
    if a.is_inf() || b.is_inf() {
        if a.is_inf() && b.is_inf() && a.sign() != b_sign {
            status.raise(FpFlags::IE);
            return F::default_nan();
        }
        check_denormal(&[a, b], status);
        return if a.is_inf() { a } else { F::infinity(b_sign) };
    }
    check_denormal(&[a, b], status);
    let mut ub = Unpacked::of(b);
    ub.sign = b_sign;
    add_terms(Unpacked::of(a), ub, status)
}

/// `a + b`.
pub fn add<F: Float>(a: F, b: F, status: &mut StatusContext) -> F {
    add_signed(a, b, false, status)
}

/// `a - b`.
pub fn sub<F: Float>(a: F, b: F, status: &mut StatusContext) -> F {
    add_signed(a, b, true, status)
}

/// `a * b`.
pub fn mul<F: Float>(a: F, b: F, status: &mut StatusContext) -> F {
    let a = daz(a, status);
    let b = daz(b, status);
    if a.is_nan() || b.is_nan() {
        return propagate2(a, b, status);
    }
    let sign = a.sign() ^ b.sign();
    if a.is_inf() || b.is_inf() {
        if a.is_zero() || b.is_zero() {
            status.raise(FpFlags::IE);
            return F::default_nan();
        }
        check_denormal(&[a, b], status);
        return F::infinity(sign);
    }
    check_denormal(&[a, b], status);
    if a.is_zero() || b.is_zero() {
        return F::zero(sign);
    }
    let ua = Unpacked::of(a);
    let ub = Unpacked::of(b);
    round_pack(sign, ua.sig * ub.sig, ua.exp + ub.exp, status)
}

/// `a / b`.
pub fn div<F: Float>(a: F, b: F, status: &mut StatusContext) -> F {
    let a = daz(a, status);
    let b = daz(b, status);
    if a.is_nan() || b.is_nan() {
        return propagate2(a, b, status);
    }
    let sign = a.sign() ^ b.sign();
    if a.is_inf() {
        if b.is_inf() {
            status.raise(FpFlags::IE);
            return F::default_nan();
        }
        check_denormal(&[b], status);
        return F::infinity(sign);
    }
    if b.is_inf() {
        check_denormal(&[a], status);
        return F::zero(sign);
    }
    if b.is_zero() {
        if a.is_zero() {
            status.raise(FpFlags::IE);
            return F::default_nan();
        }
        status.raise(FpFlags::ZE);
        return F::infinity(sign);
    }
    check_denormal(&[a, b], status);
    if a.is_zero() {
        return F::zero(sign);
    }
    let ua = Unpacked::of(a).normalized(63);
    let ub = Unpacked::of(b).normalized(63);
    let num = ua.sig << 64;
    let q = num / ub.sig;
    let sticky = u128::from(num % ub.sig != 0);
    round_pack(sign, q | sticky, ua.exp - ub.exp - 64, status)
}

/// Integer square root of a `u128`; returns the floor and whether it is exact.
fn isqrt(n: u128) -> (u128, bool) {
    let mut rem = n;
    let mut root = 0u128;
    let mut bit = 1u128 << 126;
    while bit > n {
        bit >>= 2;
    }
    while bit != 0 {
        if rem >= root + bit {
            rem -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }
    (root, rem == 0)
}

/// `sqrt(a)`. `sqrt(-0) = -0`; any other negative operand is invalid.
pub fn sqrt<F: Float>(a: F, status: &mut StatusContext) -> F {
    let a = daz(a, status);
    if a.is_nan() {
        return propagate1(a, status);
    }
    if a.is_zero() {
        return a;
    }
    if a.sign() {
        status.raise(FpFlags::IE);
        return F::default_nan();
    }
    if a.is_inf() {
        return a;
    }
    check_denormal(&[a], status);
    let mut u = Unpacked::of(a).normalized(124);
    if u.exp & 1 != 0 {
        u.sig <<= 1;
        u.exp -= 1;
    }
    let (root, exact) = isqrt(u.sig);
    round_pack(false, root | u128::from(!exact), u.exp / 2, status)
}

/// Fused `±(a*b) ± c` with a single rounding.
pub fn fma<F: Float>(a: F, b: F, c: F, kind: FmaSign, status: &mut StatusContext) -> F {
    let a = daz(a, status);
    let b = daz(b, status);
    let c = daz(c, status);
    if a.is_nan() || b.is_nan() || c.is_nan() {
        return propagate3(a, b, c, status);
    }
    let psign = a.sign() ^ b.sign() ^ kind.negates_product();
    let csign = c.sign() ^ kind.negates_addend();

    if (a.is_inf() && b.is_zero()) || (a.is_zero() && b.is_inf()) {
        status.raise(FpFlags::IE);
        return F::default_nan();
    }
    if a.is_inf() || b.is_inf() {
        if c.is_inf() && csign != psign {
            status.raise(FpFlags::IE);
            return F::default_nan();
        }
        check_denormal(&[a, b, c], status);
        return F::infinity(psign);
    }
    check_denormal(&[a, b, c], status);
    if c.is_inf() {
        return F::infinity(csign);
    }

    let ua = Unpacked::of(a);
    let ub = Unpacked::of(b);
    let mut uc = Unpacked::of(c);
    uc.sign = csign;
    let product = Unpacked { sign: psign, exp: ua.exp + ub.exp, sig: ua.sig * ub.sig };
    add_terms(product, uc, status)
}

/// Converts between formats (CVTSS2SD / CVTSD2SS).
///
/// NaN payloads keep their most significant bits and are quieted.
pub fn convert<S: Float, D: Float>(a: S, status: &mut StatusContext) -> D {
    let a = daz(a, status);
    if a.is_nan() {
        if a.is_snan() {
            status.raise(FpFlags::IE);
        }
        let shift = D::MANT_BITS as i32 - S::MANT_BITS as i32;
        let frac = if shift >= 0 {
            a.mantissa() << shift.unsigned_abs()
        } else {
            a.mantissa() >> shift.unsigned_abs()
        };
        return D::pack(a.sign(), D::EXP_MAX, frac | D::QUIET_BIT);
    }
    if a.is_inf() {
        return D::infinity(a.sign());
    }
    if a.is_zero() {
        return D::zero(a.sign());
    }
    check_denormal(&[a], status);
    let u = Unpacked::of(a);
    round_pack(u.sign, u.sig, u.exp, status)
}

/// Converts a signed integer to `F` under the current rounding mode.
pub fn from_int<F: Float>(v: i64, status: &mut StatusContext) -> F {
    if v == 0 {
        return F::zero(false);
    }
    round_pack(v < 0, v.unsigned_abs() as u128, 0, status)
}

/// The "integer indefinite" value for a `bits`-wide destination.
pub const fn integer_indefinite(bits: u32) -> i64 {
    i64::MIN >> (64 - bits)
}

/// Converts `a` to a `bits`-wide signed integer (32 or 64), sign-extended to `i64`.
///
/// `truncate` selects the CVTT* forms; otherwise the context's rounding mode
/// applies. NaN, infinity and out-of-range values raise IE and return
/// [`integer_indefinite`].
pub fn to_int<F: Float>(a: F, bits: u32, truncate: bool, status: &mut StatusContext) -> i64 {
    let rm = if truncate { RoundingMode::Rtz } else { status.rounding_mode };
    let a = daz(a, status);
    if a.is_nan() || a.is_inf() {
        status.raise(FpFlags::IE);
        return integer_indefinite(bits);
    }
    if a.is_zero() {
        return 0;
    }
    let u = Unpacked::of(a);
    if u.exp > 63 {
        status.raise(FpFlags::IE);
        return integer_indefinite(bits);
    }
    let (mag, inexact) = if u.exp >= 0 {
        (u.sig << u.exp.unsigned_abs(), false)
    } else {
        shift_round(u.sig, -u.exp, u.sign, rm)
    };
    let limit = 1u128 << (bits - 1);
    let in_range = if u.sign { mag <= limit } else { mag < limit };
    if !in_range {
        status.raise(FpFlags::IE);
        return integer_indefinite(bits);
    }
    if inexact {
        status.raise(FpFlags::PE);
    }
    let mag = mag as i128;
    (if u.sign { -mag } else { mag }) as i64
}

/// Rounds `a` to a multiple of `2^-scale` (`scale` in 0..=15) using the
/// context's rounding mode.
///
/// Values already representable at that granularity are returned unchanged.
/// PE is raised whenever the result differs from the input.
pub fn round_to_int<F: Float>(a: F, scale: u8, status: &mut StatusContext) -> F {
    let scale = i32::from(scale & 0xF);
    if a.is_nan() {
        return propagate1(a, status);
    }
    let a = daz(a, status);
    if a.is_inf() || a.is_zero() {
        return a;
    }
    let field = a.exponent() as i32;
    let scaled_exp = field - F::BIAS + scale;
    if field != 0 && scaled_exp >= F::MANT_BITS as i32 {
        return a;
    }

    let rm = status.rounding_mode;
    let sign = a.sign();
    if field == 0 || scaled_exp < 0 {
        // |a| * 2^scale < 1: the result is zero or one unit of 2^-scale.
        status.raise(FpFlags::PE);
        let unit = F::pack(sign, (F::BIAS - scale) as u32, 0);
        return match rm {
            RoundingMode::Rne => {
                if field != 0 && scaled_exp == -1 && a.mantissa() != 0 { unit } else { F::zero(sign) }
            }
            RoundingMode::Rdn => {
                if sign { unit } else { F::zero(false) }
            }
            RoundingMode::Rup => {
                if sign { F::zero(true) } else { unit }
            }
            RoundingMode::Rtz => F::zero(sign),
        };
    }

    let last = 1u64 << (F::MANT_BITS as i32 - scaled_exp);
    let round_mask = last - 1;
    let raw = a.to_raw();
    let mut z = raw;
    match rm {
        RoundingMode::Rne => {
            z += last >> 1;
            if z & round_mask == 0 {
                z &= !last;
            }
        }
        RoundingMode::Rdn | RoundingMode::Rup => {
            if sign ^ (rm == RoundingMode::Rup) {
                z += round_mask;
            }
        }
        RoundingMode::Rtz => {}
    }
    z &= !round_mask;
    if z != raw {
        status.raise(FpFlags::PE);
    }
    F::from_raw(z)
}
