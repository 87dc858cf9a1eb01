//! Comparison and predicate tests.

use pretty_assertions::assert_eq;
use rstest::rstest;
use vxsim_core::core::units::fpu::compare::{ComparePredicate, Relation, compare, compare_for_mask};
use vxsim_core::core::units::fpu::status::StatusContext;
use vxsim_core::core::units::fpu::value::{F32, F64};
use vxsim_core::FpFlags;

const QNAN: F32 = F32(0x7FC0_0000);
const SNAN: F32 = F32(0x7F80_0001);

fn f(v: f32) -> F32 {
    F32::from(v)
}

#[rstest]
#[case(1.0, 2.0, Relation::Less)]
#[case(2.0, 1.0, Relation::Greater)]
#[case(-3.0, -3.0, Relation::Equal)]
#[case(-3.0, -2.0, Relation::Less)]
#[case(-1.0, 1.0, Relation::Less)]
#[case(0.0, -0.0, Relation::Equal)]
#[case(f32::NEG_INFINITY, f32::MIN, Relation::Less)]
#[case(f32::INFINITY, f32::INFINITY, Relation::Equal)]
fn test_ordered_relations(#[case] a: f32, #[case] b: f32, #[case] expected: Relation) {
    let mut st = StatusContext::default();
    assert_eq!(compare(f(a), f(b), false, &mut st), expected, "{a} vs {b}");
    assert!(st.sticky_flags.is_empty());
}

#[test]
fn test_quiet_nan_unordered() {
    let mut st = StatusContext::default();
    assert_eq!(compare(QNAN, f(1.0), false, &mut st), Relation::Unordered);
    assert!(st.sticky_flags.is_empty(), "quiet compare of a qNaN raises nothing");

    assert_eq!(compare(f(1.0), QNAN, true, &mut st), Relation::Unordered);
    assert_eq!(st.sticky_flags, FpFlags::IE, "signaling compare of a qNaN raises IE");
}

#[test]
fn test_signaling_nan_always_invalid() {
    let mut st = StatusContext::default();
    assert_eq!(compare(SNAN, SNAN, false, &mut st), Relation::Unordered);
    assert_eq!(st.sticky_flags, FpFlags::IE);
}

#[test]
fn test_denormal_compare() {
    let mut st = StatusContext::default();
    assert_eq!(compare(F64(1), F64(0), false, &mut st), Relation::Greater);
    assert_eq!(st.sticky_flags, FpFlags::DE);

    let mut st = StatusContext { denormals_are_zeros: true, ..StatusContext::default() };
    assert_eq!(compare(F64(1), F64(0), false, &mut st), Relation::Equal);
    assert!(st.sticky_flags.is_empty(), "DAZ inputs are zeros, not denormals");
}

#[test]
fn test_predicate_encoding_round_trip() {
    for imm in 0u8..32 {
        assert_eq!(ComparePredicate::from_imm(imm).bits(), imm);
    }
    assert_eq!(ComparePredicate::from_imm(0x20), ComparePredicate::EqOq, "imm[7:5] ignored");
}

#[test]
fn test_signaling_predicates() {
    let signaling: Vec<u8> = (0u8..32).filter(|&i| ComparePredicate::from_imm(i).is_signaling()).collect();
    assert_eq!(
        signaling,
        vec![0x01, 0x02, 0x05, 0x06, 0x09, 0x0A, 0x0D, 0x0E, 0x10, 0x13, 0x14, 0x17, 0x18, 0x1B, 0x1C, 0x1F]
    );
}

/// Truth table rows: (Less, Equal, Greater, Unordered) for the low four bits.
const TRUTH: [(u8, [bool; 4]); 16] = [
    (0x0, [false, true, false, false]),
    (0x1, [true, false, false, false]),
    (0x2, [true, true, false, false]),
    (0x3, [false, false, false, true]),
    (0x4, [true, false, true, true]),
    (0x5, [false, true, true, true]),
    (0x6, [false, false, true, true]),
    (0x7, [true, true, true, false]),
    (0x8, [false, true, false, true]),
    (0x9, [true, false, false, true]),
    (0xA, [true, true, false, true]),
    (0xB, [false, false, false, false]),
    (0xC, [true, false, true, false]),
    (0xD, [false, true, true, false]),
    (0xE, [false, false, true, false]),
    (0xF, [true, true, true, true]),
];

#[test]
fn test_predicate_truth_table() {
    let relations = [Relation::Less, Relation::Equal, Relation::Greater, Relation::Unordered];
    for (low, row) in TRUTH {
        for high in [0u8, 0x10] {
            let pred = ComparePredicate::from_imm(low | high);
            for (rel, want) in relations.iter().zip(row) {
                assert_eq!(pred.holds(*rel), want, "{pred:?} on {rel:?}");
            }
        }
    }
}

#[rstest]
#[case(ComparePredicate::EqOq, false, FpFlags::NONE)]
#[case(ComparePredicate::EqUq, true, FpFlags::NONE)]
#[case(ComparePredicate::LtOs, false, FpFlags::IE)]
#[case(ComparePredicate::LtOq, false, FpFlags::NONE)]
#[case(ComparePredicate::NltUs, true, FpFlags::IE)]
#[case(ComparePredicate::NeqOs, false, FpFlags::IE)]
#[case(ComparePredicate::TrueUs, true, FpFlags::IE)]
#[case(ComparePredicate::FalseOq, false, FpFlags::NONE)]
fn test_compare_for_mask_with_qnan(
    #[case] pred: ComparePredicate,
    #[case] expected: bool,
    #[case] flags: FpFlags,
) {
    let mut st = StatusContext::default();
    assert_eq!(compare_for_mask(QNAN, f(1.0), pred, &mut st), expected);
    assert_eq!(st.sticky_flags, flags, "{pred:?}");
}

#[test]
fn test_compare_for_mask_ordered() {
    let mut st = StatusContext::default();
    assert!(compare_for_mask(f(1.0), f(2.0), ComparePredicate::LtOs, &mut st));
    assert!(!compare_for_mask(f(1.0), f(2.0), ComparePredicate::GtOq, &mut st));
    assert!(compare_for_mask(f(-0.0), f(0.0), ComparePredicate::EqOq, &mut st));
    assert!(st.sticky_flags.is_empty());
}
