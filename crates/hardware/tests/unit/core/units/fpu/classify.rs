//! Classification (VFPCLASS) tests.

use pretty_assertions::assert_eq;
use rstest::rstest;
use vxsim_core::core::units::fpu::classify::{Category, class_bits, class_of, classify, fpclass};
use vxsim_core::core::units::fpu::value::{F32, F64};

#[rstest]
#[case(F32(0x7FC0_0000), Category::QuietNan)]
#[case(F32(0xFF80_0001), Category::SignalingNan)]
#[case(F32(0x7F80_0000), Category::PositiveInfinity)]
#[case(F32(0xFF80_0000), Category::NegativeInfinity)]
#[case(F32(0x8000_0000), Category::Zero)]
#[case(F32(0x0000_0001), Category::Denormal)]
#[case(F32(0x3F80_0000), Category::Normal)]
fn test_categories(#[case] v: F32, #[case] expected: Category) {
    assert_eq!(classify(v, false), expected);
}

#[test]
fn test_daz_reports_denormal_as_zero() {
    assert_eq!(classify(F64(1), true), Category::Zero);
    assert_eq!(class_of(F64(0x8000_0000_0000_0001), true), class_bits::NEG_ZERO);
}

#[rstest]
#[case(0.0, class_bits::POS_ZERO)]
#[case(-0.0, class_bits::NEG_ZERO)]
#[case(1.5, 0)]
#[case(-1.5, class_bits::NEG_FINITE)]
#[case(f32::INFINITY, class_bits::POS_INF)]
#[case(f32::NEG_INFINITY, class_bits::NEG_INF)]
fn test_class_bits(#[case] v: f32, #[case] expected: u8) {
    assert_eq!(class_of(F32::from(v), false), expected, "{v}");
}

#[test]
fn test_negative_denormal_matches_two_categories() {
    let v = F32(0x8000_0010);
    assert_eq!(class_of(v, false), class_bits::DENORMAL | class_bits::NEG_FINITE);
    assert!(fpclass(v, class_bits::DENORMAL, false));
    assert!(fpclass(v, class_bits::NEG_FINITE, false));
}

#[test]
fn test_fpclass_selector() {
    let qnan = F32(0x7FC0_0000);
    assert!(fpclass(qnan, 0x01, false));
    assert!(!fpclass(qnan, 0xFE, false));
    assert!(fpclass(F32(0x7F80_0001), class_bits::SNAN, false));
    assert!(!fpclass(F32::from(2.0), 0xFF, false), "positive normals match no category");
    assert!(!fpclass(F32::from(-2.0), 0x00, false), "empty selector is always false");
}
