//! SIMD floating-point control and status register (MXCSR).
//!
//! This module implements the ambient control register consumed by every
//! vector floating-point instruction. It provides:
//! 1. **Field Masks:** Bit positions for flags, masks, rounding and flush controls.
//! 2. **Register Storage:** The `Mxcsr` struct holding the architectural value.
//! 3. **Access Logic:** Checked writes that reject reserved bits, and the
//!    sticky-flag merge performed at the end of each instruction.
//!
//! | Bits  | Field | Description                         |
//! |-------|-------|-------------------------------------|
//! | 5:0   | flags | IE DE ZE OE UE PE (sticky)          |
//! | 6     | DAZ   | Denormals are zeros                 |
//! | 12:7  | masks | IM DM ZM OM UM PM                   |
//! | 14:13 | RC    | Rounding control                    |
//! | 15    | FZ    | Flush to zero (masked underflow)    |

use crate::common::error::MxcsrError;
use crate::core::units::fpu::exception_flags::FpFlags;
use crate::core::units::fpu::rounding_modes::RoundingMode;

/// Power-on / reset value: all exceptions masked, round to nearest.
pub const MXCSR_DEFAULT: u32 = 0x1F80;

/// Bits implemented by the register; everything else is reserved.
pub const MXCSR_MASK: u32 = 0x0000_FFFF;

/// Exception flag field (bits 5:0).
pub const MXCSR_FLAGS: u32 = 0x3F;

/// Denormals-are-zeros control (bit 6).
pub const MXCSR_DAZ: u32 = 1 << 6;

/// Shift of the exception mask field.
pub const MXCSR_MASKS_SHIFT: u32 = 7;

/// Exception mask field (bits 12:7).
pub const MXCSR_MASKS: u32 = 0x3F << MXCSR_MASKS_SHIFT;

/// Shift of the rounding control field.
pub const MXCSR_RC_SHIFT: u32 = 13;

/// Rounding control field (bits 14:13).
pub const MXCSR_RC: u32 = 0b11 << MXCSR_RC_SHIFT;

/// Flush-to-zero control (bit 15).
pub const MXCSR_FZ: u32 = 1 << 15;

/// The MXCSR register value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Mxcsr(u32);

impl Default for Mxcsr {
    fn default() -> Self {
        Self(MXCSR_DEFAULT)
    }
}

impl Mxcsr {
    /// Creates a register from a raw value, rejecting reserved bits.
    ///
    /// # Errors
    ///
    /// Returns [`MxcsrError::ReservedBits`] if any bit outside [`MXCSR_MASK`] is set.
    pub const fn new(value: u32) -> Result<Self, MxcsrError> {
        if value & !MXCSR_MASK != 0 {
            return Err(MxcsrError::ReservedBits { value, mask: MXCSR_MASK });
        }
        Ok(Self(value))
    }

    /// Raw register value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Writes a new value (LDMXCSR semantics).
    ///
    /// # Errors
    ///
    /// Returns [`MxcsrError::ReservedBits`] and leaves the register unchanged
    /// if any reserved bit is set.
    pub fn set(&mut self, value: u32) -> Result<(), MxcsrError> {
        *self = Self::new(value)?;
        Ok(())
    }

    /// Sticky exception flags.
    pub const fn flags(self) -> FpFlags {
        FpFlags::from_bits((self.0 & MXCSR_FLAGS) as u8)
    }

    /// Clears the sticky exception flags.
    pub const fn clear_flags(&mut self) {
        self.0 &= !MXCSR_FLAGS;
    }

    /// Exception mask bits, in flag layout (a set bit means masked).
    pub const fn masks(self) -> FpFlags {
        FpFlags::from_bits(((self.0 & MXCSR_MASKS) >> MXCSR_MASKS_SHIFT) as u8)
    }

    /// Replaces the exception mask bits.
    pub const fn set_masks(&mut self, masks: FpFlags) {
        self.0 = (self.0 & !MXCSR_MASKS) | ((masks.bits() as u32) << MXCSR_MASKS_SHIFT);
    }

    /// Current rounding control.
    pub const fn rounding_mode(self) -> RoundingMode {
        RoundingMode::from_bits(((self.0 & MXCSR_RC) >> MXCSR_RC_SHIFT) as u8)
    }

    /// Replaces the rounding control.
    pub const fn set_rounding_mode(&mut self, rm: RoundingMode) {
        self.0 = (self.0 & !MXCSR_RC) | ((rm.bits() as u32) << MXCSR_RC_SHIFT);
    }

    /// Denormals-are-zeros.
    pub const fn daz(self) -> bool {
        self.0 & MXCSR_DAZ != 0
    }

    /// Flush-to-zero.
    pub const fn fz(self) -> bool {
        self.0 & MXCSR_FZ != 0
    }

    /// Sets or clears DAZ.
    pub const fn set_daz(&mut self, on: bool) {
        if on { self.0 |= MXCSR_DAZ } else { self.0 &= !MXCSR_DAZ }
    }

    /// Sets or clears FZ.
    pub const fn set_fz(&mut self, on: bool) {
        if on { self.0 |= MXCSR_FZ } else { self.0 &= !MXCSR_FZ }
    }

    /// ORs an instruction's final flags into the sticky field.
    pub const fn accumulate(&mut self, flags: FpFlags) {
        self.0 |= flags.bits() as u32;
    }
}
