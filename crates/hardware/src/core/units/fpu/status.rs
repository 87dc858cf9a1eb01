//! Per-instruction floating-point status context.
//!
//! A [`StatusContext`] is created from an [`Mxcsr`] snapshot when an
//! instruction starts, threaded by `&mut` through every lane operation, and
//! consumed once by [`StatusContext::merge_back`]. The lane loop never
//! touches the ambient register directly.

use crate::core::arch::mxcsr::Mxcsr;

use super::exception_flags::FpFlags;
use super::rounding_modes::RoundingMode;

/// Rounding/exception environment and sticky flag accumulator for one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusContext {
    /// Active rounding mode.
    pub rounding_mode: RoundingMode,
    /// Architecturally masked exceptions (set bit = masked).
    pub exception_masks: FpFlags,
    /// DAZ: treat denormal inputs as signed zero.
    pub denormals_are_zeros: bool,
    /// FTZ: flush tiny results to signed zero. Only set when underflow is masked.
    pub flush_underflow_to_zero: bool,
    /// Flags raised so far; only ever grows.
    pub sticky_flags: FpFlags,
    /// Flags removed from this instruction's report.
    pub suppress_flags: FpFlags,
}

impl Default for StatusContext {
    fn default() -> Self {
        Self::from_control_register(&Mxcsr::default())
    }
}

impl StatusContext {
    /// Seeds a fresh context from the ambient control register.
    pub const fn from_control_register(ctrl: &Mxcsr) -> Self {
        let masks = ctrl.masks();
        Self {
            rounding_mode: ctrl.rounding_mode(),
            exception_masks: masks,
            denormals_are_zeros: ctrl.daz(),
            flush_underflow_to_zero: ctrl.fz() && masks.contains(FpFlags::UE),
            sticky_flags: FpFlags::NONE,
            suppress_flags: FpFlags::NONE,
        }
    }

    /// Context with the given rounding mode and all exceptions masked.
    pub fn with_rounding(rounding_mode: RoundingMode) -> Self {
        Self { rounding_mode, ..Self::default() }
    }

    /// Applies the rounding/suppression control of an `imm8` (ROUND*, VRNDSCALE*, VREDUCE*).
    ///
    /// `imm8[2]` clear selects `imm8[1:0]` as the rounding mode, set keeps
    /// `MXCSR.RC`. `imm8[3]` suppresses the precision exception.
    pub const fn apply_rounding_override(&mut self, control: u8) {
        if control & 0x4 == 0 {
            self.rounding_mode = RoundingMode::from_bits(control & 0x3);
        }
        if control & 0x8 != 0 {
            self.suppress_flags = FpFlags::from_bits(self.suppress_flags.bits() | FpFlags::PE.bits());
        }
    }

    /// Applies EVEX embedded rounding (`{rn-sae}` etc.): the mode is overridden
    /// and every exception is suppressed.
    pub const fn apply_embedded_rounding(&mut self, mode: RoundingMode) {
        self.rounding_mode = mode;
        self.suppress_all_exceptions();
    }

    /// Applies EVEX `{sae}`.
    pub const fn suppress_all_exceptions(&mut self) {
        self.suppress_flags = FpFlags::ALL;
    }

    /// Accumulates raised flags.
    #[inline]
    pub fn raise(&mut self, flags: FpFlags) {
        self.sticky_flags |= flags;
    }

    /// True if `flag` is architecturally masked.
    #[inline]
    pub const fn is_masked(&self, flag: FpFlags) -> bool {
        self.exception_masks.contains(flag)
    }

    /// Flags that will be reported, after suppression.
    pub fn reported_flags(&self) -> FpFlags {
        self.sticky_flags & FpFlags::ALL & !self.suppress_flags
    }

    /// Computes the flags to merge into MXCSR and whether the instruction faults.
    ///
    /// When an unmasked pre-computational exception (IE, DE, ZE) is present,
    /// only the pre-computational flags are reported.
    pub fn merge_back(&self) -> (FpFlags, bool) {
        let mut final_flags = self.reported_flags();
        let unmasked = final_flags & !self.exception_masks;
        if unmasked.intersects(FpFlags::PRE_COMPUTATIONAL) {
            final_flags &= FpFlags::PRE_COMPUTATIONAL;
        }
        (final_flags, !unmasked.is_empty())
    }

    /// Unmasked subset of the reported flags.
    pub fn unmasked_flags(&self) -> FpFlags {
        self.reported_flags() & !self.exception_masks
    }
}
