//! Vector and opmask register file.
//!
//! This module implements the register storage consumed by vector
//! instructions. It performs the following:
//! 1. **Storage:** 32 × 512-bit vector registers (`zmm0`-`zmm31`) and 8 opmask
//!    registers (`k0`-`k7`).
//! 2. **Lane Access:** Reads and writes of 32- or 64-bit lanes of a register value.
//! 3. **Abstraction:** The [`VectorRegisterFile`] trait, so the execution
//!    engine can run against any register model.

use crate::core::units::fpu::value::Float;
use crate::core::units::vpu::width::VectorWidth;

/// Number of 64-bit words in a 512-bit register.
pub const VREG_QWORDS: usize = 8;

/// Number of vector registers.
pub const NUM_VREGS: usize = 32;

/// Number of opmask registers.
pub const NUM_KREGS: usize = 8;

/// A 512-bit vector register value, stored as little-endian 64-bit words.
///
/// `xmm` and `ymm` views are the low 128 and 256 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VectorReg(pub [u64; VREG_QWORDS]);

impl VectorReg {
    /// All-zero register.
    pub const ZERO: Self = Self([0; VREG_QWORDS]);

    /// Reads lane `idx` of a `width`-bit element view (32 or 64).
    ///
    /// # Arguments
    ///
    /// * `width` - Element width in bits.
    /// * `idx` - Lane index; must be below `512 / width`.
    ///
    /// # Returns
    ///
    /// The lane's raw bits, zero-extended.
    pub const fn lane_bits(&self, width: u32, idx: usize) -> u64 {
        let per_word = (64 / width) as usize;
        let shift = (idx % per_word) as u32 * width;
        let mask = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
        (self.0[idx / per_word] >> shift) & mask
    }

    /// Writes lane `idx` of a `width`-bit element view; other lanes are untouched.
    pub const fn set_lane_bits(&mut self, width: u32, idx: usize, value: u64) {
        let per_word = (64 / width) as usize;
        let shift = (idx % per_word) as u32 * width;
        let mask = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
        let word = &mut self.0[idx / per_word];
        *word = (*word & !(mask << shift)) | ((value & mask) << shift);
    }

    /// Reads lane `idx` as a typed value.
    #[inline]
    pub fn lane<F: Float>(&self, idx: usize) -> F {
        F::from_raw(self.lane_bits(F::WIDTH, idx))
    }

    /// Writes lane `idx` from a typed value.
    #[inline]
    pub fn set_lane<F: Float>(&mut self, idx: usize, value: F) {
        self.set_lane_bits(F::WIDTH, idx, value.to_raw());
    }

    /// Returns the register with every bit above `width` cleared.
    pub fn truncated(mut self, width: VectorWidth) -> Self {
        for word in self.0.iter_mut().skip(width.qwords()) {
            *word = 0;
        }
        self
    }

    /// Builds a register from binary32 lanes, lowest lane first.
    pub fn from_f32_lanes(lanes: &[f32]) -> Self {
        let mut reg = Self::ZERO;
        for (i, v) in lanes.iter().enumerate().take(16) {
            reg.set_lane_bits(32, i, u64::from(v.to_bits()));
        }
        reg
    }

    /// Builds a register from binary64 lanes, lowest lane first.
    pub fn from_f64_lanes(lanes: &[f64]) -> Self {
        let mut reg = Self::ZERO;
        for (i, v) in lanes.iter().enumerate().take(8) {
            reg.set_lane_bits(64, i, v.to_bits());
        }
        reg
    }

    /// Reads lane `idx` as a host `f32`.
    pub fn f32_lane(&self, idx: usize) -> f32 {
        f32::from_bits(self.lane_bits(32, idx) as u32)
    }

    /// Reads lane `idx` as a host `f64`.
    pub fn f64_lane(&self, idx: usize) -> f64 {
        f64::from_bits(self.lane_bits(64, idx))
    }
}

/// Register storage seen by the execution engine.
///
/// Indices are taken modulo the register count, so any decoded index is valid.
pub trait VectorRegisterFile {
    /// Reads a vector register.
    fn read_vreg(&self, idx: u8) -> VectorReg;

    /// Writes a vector register.
    fn write_vreg(&mut self, idx: u8, value: VectorReg);

    /// Reads an opmask register.
    fn read_kreg(&self, idx: u8) -> u64;

    /// Writes an opmask register.
    fn write_kreg(&mut self, idx: u8, value: u64);
}

/// Plain in-memory vector register file.
///
/// Contains 32 vector registers and 8 opmask registers, all initialized to zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VectorRegs {
    zmm: [VectorReg; NUM_VREGS],
    k: [u64; NUM_KREGS],
}

impl VectorRegs {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self::default()
    }
}

impl VectorRegisterFile for VectorRegs {
    fn read_vreg(&self, idx: u8) -> VectorReg {
        self.zmm[usize::from(idx) % NUM_VREGS]
    }

    fn write_vreg(&mut self, idx: u8, value: VectorReg) {
        self.zmm[usize::from(idx) % NUM_VREGS] = value;
    }

    fn read_kreg(&self, idx: u8) -> u64 {
        self.k[usize::from(idx) % NUM_KREGS]
    }

    fn write_kreg(&mut self, idx: u8, value: u64) {
        self.k[usize::from(idx) % NUM_KREGS] = value;
    }
}
