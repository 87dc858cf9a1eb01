//! Fix-up (VFIXUPIMM) tests.

use pretty_assertions::assert_eq;
use rstest::rstest;
use vxsim_core::core::units::fpu::fixup::{FixupResponse, FixupToken, fixup};
use vxsim_core::core::units::fpu::status::StatusContext;
use vxsim_core::core::units::fpu::value::{F32, F64, Float};
use vxsim_core::FpFlags;

/// Table with `code` in the nibble of `token`, zeros elsewhere.
fn table(token: FixupToken, code: u64) -> u64 {
    code << (4 * token as u32)
}

#[rstest]
#[case(F32(0x7FC0_0000), FixupToken::QNan)]
#[case(F32(0x7F80_0001), FixupToken::SNan)]
#[case(F32(0x8000_0000), FixupToken::Zero)]
#[case(F32(0x3F80_0000), FixupToken::PosOne)]
#[case(F32(0xBF80_0000), FixupToken::NegValue)]
#[case(F32(0xFF80_0000), FixupToken::NegInf)]
#[case(F32(0x7F80_0000), FixupToken::PosInf)]
#[case(F32(0x4000_0000), FixupToken::PosValue)]
#[case(F32(0x0000_0001), FixupToken::PosValue)]
fn test_tokens(#[case] v: F32, #[case] expected: FixupToken) {
    assert_eq!(FixupToken::of(v), expected);
}

#[rstest]
#[case(0, 7.0)]
#[case(1, 3.0)]
#[case(2, 3.0)]
#[case(4, f32::NEG_INFINITY)]
#[case(5, f32::INFINITY)]
#[case(6, f32::INFINITY)]
#[case(7, -0.0)]
#[case(8, 0.0)]
#[case(9, -1.0)]
#[case(10, 1.0)]
#[case(11, 0.5)]
#[case(12, 90.0)]
#[case(13, std::f32::consts::FRAC_PI_2)]
#[case(14, f32::MAX)]
#[case(15, f32::MIN)]
fn test_responses_for_positive_value(#[case] code: u64, #[case] expected: f32) {
    let mut st = StatusContext::default();
    let r = fixup(F32::from(7.0), F32::from(3.0), table(FixupToken::PosValue, code), 0, &mut st);
    assert_eq!(r, F32::from(expected), "response {code}");
    assert!(st.sticky_flags.is_empty());
}

#[test]
fn test_default_nan_response() {
    let mut st = StatusContext::default();
    let r = fixup(F64::from(1.0), F64::from(-4.0), table(FixupToken::NegValue, 3), 0, &mut st);
    assert_eq!(r, F64::default_nan());
    assert!(st.sticky_flags.is_empty(), "table responses raise nothing");
}

#[test]
fn test_pi_half_double() {
    let mut st = StatusContext::default();
    let r = fixup(F64::from(0.0), F64::from(5.0), table(FixupToken::PosValue, 13), 0, &mut st);
    assert_eq!(r, F64::from(std::f64::consts::FRAC_PI_2));
}

#[test]
fn test_quiet_source_response_for_snan_is_silent() {
    let mut st = StatusContext::default();
    let r = fixup(F32::from(0.0), F32(0x7F80_0001), table(FixupToken::SNan, 2), 0, &mut st);
    assert_eq!(r, F32(0x7FC0_0001));
    assert!(st.sticky_flags.is_empty());
}

#[test]
fn test_signed_inf_takes_source_sign() {
    let mut st = StatusContext::default();
    let r = fixup(F32::from(0.0), F32::from(-0.0), table(FixupToken::Zero, 6), 0, &mut st);
    assert_eq!(r, F32::from(f32::NEG_INFINITY));
}

#[rstest]
#[case(F32::from(0.0), 1 << 1, FixupToken::Zero)]
#[case(F32::from(1.0), 1 << 3, FixupToken::PosOne)]
#[case(F32(0x7F80_0001), 1 << 4, FixupToken::SNan)]
#[case(F32::from(f32::NEG_INFINITY), 1 << 5, FixupToken::NegInf)]
#[case(F32::from(-3.0), 1 << 6, FixupToken::NegValue)]
#[case(F32::from(f32::INFINITY), 1 << 7, FixupToken::PosInf)]
fn test_invalid_raised_with_table_result(
    #[case] src: F32,
    #[case] imm: u8,
    #[case] token: FixupToken,
) {
    let mut st = StatusContext::default();
    let r = fixup(F32::from(5.0), src, table(token, 11), imm, &mut st);
    assert_eq!(r, F32::from(0.5), "the table still selects the result");
    assert_eq!(st.sticky_flags, FpFlags::IE);
}

#[rstest]
#[case(F32::from(-0.0), 1 << 0, FixupToken::Zero)]
#[case(F32::from(1.0), 1 << 2, FixupToken::PosOne)]
fn test_divide_by_zero_raised_with_table_result(
    #[case] src: F32,
    #[case] imm: u8,
    #[case] token: FixupToken,
) {
    let mut st = StatusContext::default();
    let r = fixup(F32::from(5.0), src, table(token, 9), imm, &mut st);
    assert_eq!(r, F32::from(-1.0));
    assert_eq!(st.sticky_flags, FpFlags::ZE);
}

#[test]
fn test_zero_token_raises_invalid_and_divide_by_zero() {
    let mut st = StatusContext::default();
    let r = fixup(F32::from(5.0), F32::from(0.0), table(FixupToken::Zero, 10), 0b11, &mut st);
    assert_eq!(r, F32::from(1.0));
    assert_eq!(st.sticky_flags, FpFlags::IE | FpFlags::ZE);
}

#[test]
fn test_flags_raised_when_table_keeps_destination() {
    let mut st = StatusContext::default();
    let r = fixup(F64::from(5.0), F64::from(1.0), 0, 1 << 3, &mut st);
    assert_eq!(r, F64::from(5.0));
    assert_eq!(st.sticky_flags, FpFlags::IE);
}

#[test]
fn test_fault_bits_for_other_tokens_are_ignored() {
    let mut st = StatusContext::default();
    let r = fixup(F32::from(5.0), F32::from(2.0), 0, 0xFF, &mut st);
    assert_eq!(r, F32::from(5.0), "positive values have no fault bit");
    assert!(st.sticky_flags.is_empty());
}

#[test]
fn test_daz_turns_denormal_source_into_zero_token() {
    let mut st = StatusContext { denormals_are_zeros: true, ..StatusContext::default() };
    let r = fixup(F32::from(5.0), F32(0x8000_0003), table(FixupToken::Zero, 1), 0, &mut st);
    assert_eq!(r, F32::from(-0.0), "response 1 returns the DAZ-adjusted source");
}

#[test]
fn test_nibble_decoding_ignores_high_bits() {
    assert_eq!(FixupResponse::from_nibble(0x1D), FixupResponse::PiHalf);
    assert_eq!(FixupResponse::from_nibble(0), FixupResponse::Dest);
}

#[test]
fn test_only_low_32_table_bits_used() {
    let mut st = StatusContext::default();
    let r = fixup(F32::from(5.0), F32::from(2.0), 0xA_0000_0000 | table(FixupToken::PosValue, 8), 0, &mut st);
    assert_eq!(r, F32::from(0.0));
}
