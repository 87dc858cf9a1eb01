//! Rounding mode tests.
//!
//! Each case checks a result whose last bit depends on the rounding
//! direction, for both signs and both precisions.

use pretty_assertions::assert_eq;
use rstest::rstest;
use vxsim_core::core::units::fpu::softfloat::{add, div, from_int, round_to_int};
use vxsim_core::core::units::fpu::value::{F32, F64};
use vxsim_core::{FpFlags, RoundingMode};

use crate::common::harness::status;

#[test]
fn test_encoding_round_trips() {
    for bits in 0u8..4 {
        assert_eq!(RoundingMode::from_bits(bits).bits(), bits);
    }
    assert_eq!(RoundingMode::from_bits(0b110), RoundingMode::Rup, "only two bits are decoded");
    assert_eq!(RoundingMode::default(), RoundingMode::Rne);
}

#[rstest]
#[case(RoundingMode::Rne, 0x3FF0_0000_0000_0000)]
#[case(RoundingMode::Rdn, 0x3FF0_0000_0000_0000)]
#[case(RoundingMode::Rup, 0x3FF0_0000_0000_0001)]
#[case(RoundingMode::Rtz, 0x3FF0_0000_0000_0000)]
fn test_add_tiny_to_one_f64(#[case] rm: RoundingMode, #[case] expected: u64) {
    // 1 + 2^-60 lies far below the half-way point of the last place.
    let mut st = status(rm);
    let r = add(F64::from(1.0), F64::from(2.0_f64.powi(-60)), &mut st);
    assert_eq!(r, F64(expected), "{rm:?}");
    assert_eq!(st.sticky_flags, FpFlags::PE);
}

#[rstest]
#[case(RoundingMode::Rne, 0x3F80_0000)]
#[case(RoundingMode::Rdn, 0x3F80_0000)]
#[case(RoundingMode::Rup, 0x3F80_0001)]
#[case(RoundingMode::Rtz, 0x3F80_0000)]
fn test_tie_rounds_to_even_f32(#[case] rm: RoundingMode, #[case] expected: u32) {
    // 1 + 2^-24 is exactly half-way between 1.0 and its successor.
    let mut st = status(rm);
    let r = add(F32::from(1.0), F32::from(2.0_f32.powi(-24)), &mut st);
    assert_eq!(r, F32(expected), "{rm:?}");
}

#[test]
fn test_tie_rounds_to_odd_neighbour_up() {
    // (1 + 2^-23) + 2^-24 ties between an odd and an even significand.
    let mut st = status(RoundingMode::Rne);
    let r = add(F32(0x3F80_0001), F32::from(2.0_f32.powi(-24)), &mut st);
    assert_eq!(r, F32(0x3F80_0002));
}

#[rstest]
#[case(RoundingMode::Rne, 0xBF80_0000)]
#[case(RoundingMode::Rdn, 0xBF80_0001)]
#[case(RoundingMode::Rup, 0xBF80_0000)]
#[case(RoundingMode::Rtz, 0xBF80_0000)]
fn test_negative_directed_rounding(#[case] rm: RoundingMode, #[case] expected: u32) {
    let mut st = status(rm);
    let r = add(F32::from(-1.0), F32::from(-(2.0_f32.powi(-30))), &mut st);
    assert_eq!(r, F32(expected), "{rm:?}");
}

#[rstest]
#[case(RoundingMode::Rne, 16_777_216.0)]
#[case(RoundingMode::Rdn, 16_777_216.0)]
#[case(RoundingMode::Rup, 16_777_218.0)]
#[case(RoundingMode::Rtz, 16_777_216.0)]
fn test_int_conversion_rounding(#[case] rm: RoundingMode, #[case] expected: f32) {
    // 2^24 + 1 is not representable in binary32.
    let mut st = status(rm);
    let r: F32 = from_int(16_777_217, &mut st);
    assert_eq!(r, F32::from(expected));
    assert_eq!(st.sticky_flags, FpFlags::PE);
}

#[rstest]
#[case(RoundingMode::Rne, 2.5, 2.0)]
#[case(RoundingMode::Rne, 3.5, 4.0)]
#[case(RoundingMode::Rne, -2.5, -2.0)]
#[case(RoundingMode::Rdn, 2.5, 2.0)]
#[case(RoundingMode::Rdn, -2.5, -3.0)]
#[case(RoundingMode::Rup, 2.25, 3.0)]
#[case(RoundingMode::Rup, -2.75, -2.0)]
#[case(RoundingMode::Rtz, -2.75, -2.0)]
#[case(RoundingMode::Rne, 0.5, 0.0)]
#[case(RoundingMode::Rne, 0.75, 1.0)]
#[case(RoundingMode::Rup, 0.1, 1.0)]
#[case(RoundingMode::Rdn, -0.1, -1.0)]
fn test_round_to_integer(#[case] rm: RoundingMode, #[case] x: f64, #[case] expected: f64) {
    let mut st = status(rm);
    let r = round_to_int(F64::from(x), 0, &mut st);
    assert_eq!(r, F64::from(expected), "round({x}) under {rm:?}");
    assert_eq!(st.sticky_flags, FpFlags::PE);
}

#[test]
fn test_round_to_integer_keeps_negative_zero() {
    let mut st = status(RoundingMode::Rne);
    assert_eq!(round_to_int(F32::from(-0.25), 0, &mut st), F32::from(-0.0));
    let mut st = status(RoundingMode::Rup);
    assert_eq!(round_to_int(F32::from(-0.25), 0, &mut st), F32::from(-0.0));
}

#[test]
fn test_round_to_integer_exact_values_raise_nothing() {
    let mut st = status(RoundingMode::Rne);
    assert_eq!(round_to_int(F32::from(7.0), 0, &mut st), F32::from(7.0));
    assert_eq!(round_to_int(F32::from(1.0e20), 0, &mut st), F32::from(1.0e20));
    assert_eq!(round_to_int(F32::from(f32::NEG_INFINITY), 0, &mut st), F32::from(f32::NEG_INFINITY));
    assert!(st.sticky_flags.is_empty());
}

#[test]
fn test_round_to_scaled_fraction() {
    // scale 2 rounds to multiples of 0.25.
    let mut st = status(RoundingMode::Rne);
    assert_eq!(round_to_int(F64::from(1.3), 2, &mut st), F64::from(1.25));
    assert_eq!(round_to_int(F64::from(1.75), 2, &mut st), F64::from(1.75));
    let mut st = status(RoundingMode::Rup);
    assert_eq!(round_to_int(F64::from(0.01), 2, &mut st), F64::from(0.25));
}

#[test]
fn test_directed_division() {
    let mut lo = status(RoundingMode::Rdn);
    let mut hi = status(RoundingMode::Rup);
    let a = div(F64::from(2.0), F64::from(3.0), &mut lo);
    let b = div(F64::from(2.0), F64::from(3.0), &mut hi);
    assert_eq!(b.0 - a.0, 1, "directed results bracket the exact quotient");
}
