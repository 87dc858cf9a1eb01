//! Vector and opmask register file tests.

use pretty_assertions::assert_eq;
use vxsim_core::core::arch::vreg::{NUM_KREGS, NUM_VREGS};
use vxsim_core::core::units::fpu::value::{F32, F64};
use vxsim_core::{VectorReg, VectorRegisterFile, VectorRegs, VectorWidth};

#[test]
fn test_lane_packing_is_little_endian() {
    let mut r = VectorReg::ZERO;
    r.set_lane_bits(32, 0, 0x1111_1111);
    r.set_lane_bits(32, 1, 0x2222_2222);
    r.set_lane_bits(32, 15, 0xFFFF_FFFF);
    assert_eq!(r.0[0], 0x2222_2222_1111_1111);
    assert_eq!(r.0[7], 0xFFFF_FFFF_0000_0000);
    assert_eq!(r.lane_bits(64, 0), 0x2222_2222_1111_1111);
}

#[test]
fn test_set_lane_leaves_neighbours() {
    let mut r = VectorReg([u64::MAX; 8]);
    r.set_lane_bits(32, 3, 0);
    assert_eq!(r.0[1], 0x0000_0000_FFFF_FFFF);
    r.set_lane_bits(32, 4, 0x1_2345_6789);
    assert_eq!(r.lane_bits(32, 4), 0x2345_6789, "values are masked to the lane width");
}

#[test]
fn test_typed_lanes() {
    let mut r = VectorReg::ZERO;
    r.set_lane(2, F64::from(-2.5));
    assert_eq!(r.lane::<F64>(2), F64::from(-2.5));
    assert_eq!(r.f64_lane(2), -2.5);
    r.set_lane(0, F32::from(1.5));
    assert_eq!(r.f32_lane(0), 1.5);
}

#[test]
fn test_from_lanes() {
    let r = VectorReg::from_f32_lanes(&[1.0, 2.0]);
    assert_eq!(r.0[0], (u64::from(2.0_f32.to_bits()) << 32) | u64::from(1.0_f32.to_bits()));
    let r = VectorReg::from_f64_lanes(&[3.0; 10]);
    assert_eq!(r.0, [3.0_f64.to_bits(); 8], "extra lanes are ignored");
}

#[test]
fn test_truncated() {
    let r = VectorReg([1; 8]).truncated(VectorWidth::V128);
    assert_eq!(r.0, [1, 1, 0, 0, 0, 0, 0, 0]);
    let r = VectorReg([1; 8]).truncated(VectorWidth::V512);
    assert_eq!(r.0, [1; 8]);
}

#[test]
fn test_register_file_starts_zeroed() {
    let regs = VectorRegs::new();
    for i in 0..NUM_VREGS as u8 {
        assert_eq!(regs.read_vreg(i), VectorReg::ZERO);
    }
    for i in 0..NUM_KREGS as u8 {
        assert_eq!(regs.read_kreg(i), 0);
    }
}

#[test]
fn test_register_file_round_trip_and_wrap() {
    let mut regs = VectorRegs::new();
    let v = VectorReg::from_f32_lanes(&[7.0; 16]);
    regs.write_vreg(5, v);
    regs.write_kreg(3, 0xFFFF);
    assert_eq!(regs.read_vreg(5), v);
    assert_eq!(regs.read_kreg(3), 0xFFFF);
    assert_eq!(regs.read_vreg(37), v, "indices wrap modulo the register count");
    assert_eq!(regs.read_kreg(11), 0xFFFF);
}
