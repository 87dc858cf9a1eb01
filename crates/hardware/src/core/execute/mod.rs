//! Operation dispatch facade.
//!
//! [`Vpu::execute`] runs one decoded vector instruction to completion:
//! 1. **Operand Read:** Source, destination and opmask registers are read from
//!    the register file collaborator.
//! 2. **Status Setup:** A [`StatusContext`] is seeded from the MXCSR snapshot,
//!    then adjusted by EVEX rounding control and rounding immediates.
//! 3. **Lane Loop:** The lane engine runs the element operation on every
//!    active lane.
//! 4. **Flag Merge:** The sticky flags are merged into MXCSR. If an unmasked
//!    exception occurred the instruction faults and nothing is written.
//! 5. **Write-back:** The blended register (or opmask) is written.

/// Generic per-precision lane dispatch.
mod dispatch;

/// Decoded instruction representation.
pub mod instruction;

use tracing::{debug, trace};

use crate::common::error::{ExecError, SimdFpException};
use crate::config::Config;
use crate::core::arch::mxcsr::Mxcsr;
use crate::core::arch::vreg::VectorRegisterFile;
use crate::core::units::fpu::status::StatusContext;
use crate::core::units::fpu::value::{F32, F64};
use crate::core::units::vpu::mask::Masking;
use crate::core::units::vpu::width::VectorWidth;

use self::dispatch::{Operands, Output};
pub use self::instruction::{
    EmbeddedControl, FmaOrder, Form, MaskOperand, Precision, VecInstruction, VecOp,
};

/// Vector execution engine.
///
/// Holds only configuration; all architectural state lives in the register
/// file and MXCSR passed to [`Vpu::execute`].
#[derive(Clone, Debug)]
pub struct Vpu {
    max_width: VectorWidth,
    trace_instructions: bool,
}

impl Default for Vpu {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Vpu {
    /// Creates an engine from a configuration.
    pub const fn new(config: &Config) -> Self {
        Self { max_width: config.max_vector_width, trace_instructions: config.trace_instructions }
    }

    /// Widest vector length accepted.
    pub const fn max_width(&self) -> VectorWidth {
        self.max_width
    }

    /// Builds the status context for `inst` from the MXCSR snapshot.
    pub fn status_for(inst: &VecInstruction, mxcsr: &Mxcsr) -> StatusContext {
        let mut status = StatusContext::from_control_register(mxcsr);
        match inst.control {
            EmbeddedControl::None => {}
            EmbeddedControl::Sae => status.suppress_all_exceptions(),
            EmbeddedControl::Round(mode) => status.apply_embedded_rounding(mode),
        }
        if inst.op.uses_rounding_immediate() {
            status.apply_rounding_override(inst.imm);
        }
        status
    }

    /// Resolves the opmask operand. `k0` and no operand both mean unmasked.
    fn masking<R: VectorRegisterFile + ?Sized>(inst: &VecInstruction, regs: &R) -> Masking {
        match inst.mask {
            Some(m) if m.reg != 0 => {
                let bits = regs.read_kreg(m.reg);
                if m.zeroing { Masking::zero(bits) } else { Masking::merge(bits) }
            }
            _ => Masking::UNMASKED,
        }
    }

    /// Executes one instruction.
    ///
    /// MXCSR receives the instruction's flags whether or not it faults.
    ///
    /// # Errors
    ///
    /// - [`ExecError::UnsupportedWidth`] if a packed form is wider than the
    ///   configured maximum. No state is modified.
    /// - [`ExecError::SimdFp`] if an unmasked exception occurred. The flags
    ///   are merged into `mxcsr` but the destination is not written.
    pub fn execute<R: VectorRegisterFile + ?Sized>(
        &self,
        inst: &VecInstruction,
        regs: &mut R,
        mxcsr: &mut Mxcsr,
    ) -> Result<(), ExecError> {
        if let Form::Packed(width) = inst.form {
            if width > self.max_width {
                return Err(ExecError::UnsupportedWidth { requested: width, max: self.max_width });
            }
        }
        if self.trace_instructions {
            trace!(
                op = ?inst.op,
                form = ?inst.form,
                precision = ?inst.precision,
                dst = inst.dst,
                src1 = inst.src1,
                src2 = inst.src2,
                imm = inst.imm,
                "execute"
            );
        }

        let operands = Operands {
            dst: regs.read_vreg(inst.dst),
            src1: regs.read_vreg(inst.src1),
            src2: regs.read_vreg(inst.src2),
        };
        let masking = Self::masking(inst, regs);
        let mut status = Self::status_for(inst, mxcsr);

        let output = match inst.precision {
            Precision::Single => dispatch::run::<F32>(inst, &operands, masking, &mut status),
            Precision::Double => dispatch::run::<F64>(inst, &operands, masking, &mut status),
        };

        let (flags, fault) = status.merge_back();
        mxcsr.accumulate(flags);
        if fault {
            let unmasked = flags & !status.exception_masks;
            debug!(op = ?inst.op, %flags, %unmasked, "unmasked SIMD floating-point exception");
            return Err(SimdFpException { flags, unmasked }.into());
        }

        match output {
            Output::Vector(reg) => regs.write_vreg(inst.dst, reg),
            Output::Mask(bits) => regs.write_kreg(inst.dst, bits),
        }
        Ok(())
    }
}
