//! Instruction-level test harness.
//!
//! Wraps a [`VectorRegs`] register file, an [`Mxcsr`] and a [`Vpu`] so a
//! test can load lanes, run one instruction and inspect the outcome.

use vxsim_core::core::units::fpu::status::StatusContext;
use vxsim_core::{
    Config, ExecError, FpFlags, Mxcsr, RoundingMode, VecInstruction, VectorReg,
    VectorRegisterFile, VectorRegs, Vpu,
};

/// Installs the log and tracing subscribers once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Register file, control register and engine for one test.
pub struct TestContext {
    pub regs: VectorRegs,
    pub mxcsr: Mxcsr,
    pub vpu: Vpu,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&Config { trace_instructions: true, ..Config::default() })
    }

    pub fn with_config(config: &Config) -> Self {
        init_logging();
        Self {
            regs: VectorRegs::new(),
            mxcsr: Mxcsr::new(config.initial_mxcsr).unwrap_or_default(),
            vpu: Vpu::new(config),
        }
    }

    /// Unmasks the given exceptions in MXCSR.
    pub fn unmask(mut self, flags: FpFlags) -> Self {
        let masks = self.mxcsr.masks() & !flags;
        self.mxcsr.set_masks(masks);
        self
    }

    /// Selects the MXCSR rounding mode.
    pub fn rounding(mut self, rm: RoundingMode) -> Self {
        self.mxcsr.set_rounding_mode(rm);
        self
    }

    pub fn set_f32(&mut self, reg: u8, lanes: &[f32]) {
        self.regs.write_vreg(reg, VectorReg::from_f32_lanes(lanes));
    }

    pub fn set_f64(&mut self, reg: u8, lanes: &[f64]) {
        self.regs.write_vreg(reg, VectorReg::from_f64_lanes(lanes));
    }

    pub fn set_raw32(&mut self, reg: u8, lanes: &[u32]) {
        let mut v = VectorReg::ZERO;
        for (i, bits) in lanes.iter().enumerate() {
            v.set_lane_bits(32, i, u64::from(*bits));
        }
        self.regs.write_vreg(reg, v);
    }

    pub fn set_k(&mut self, reg: u8, bits: u64) {
        self.regs.write_kreg(reg, bits);
    }

    pub fn vreg(&self, reg: u8) -> VectorReg {
        self.regs.read_vreg(reg)
    }

    pub fn kreg(&self, reg: u8) -> u64 {
        self.regs.read_kreg(reg)
    }

    pub fn f32_lanes(&self, reg: u8, count: usize) -> Vec<f32> {
        let v = self.vreg(reg);
        (0..count).map(|i| v.f32_lane(i)).collect()
    }

    pub fn f64_lanes(&self, reg: u8, count: usize) -> Vec<f64> {
        let v = self.vreg(reg);
        (0..count).map(|i| v.f64_lane(i)).collect()
    }

    pub fn raw32(&self, reg: u8, idx: usize) -> u32 {
        self.vreg(reg).lane_bits(32, idx) as u32
    }

    pub fn run(&mut self, inst: VecInstruction) -> Result<(), ExecError> {
        let result = self.vpu.execute(&inst, &mut self.regs, &mut self.mxcsr);
        if let Err(e) = &result {
            log::debug!("{:?} faulted: {e}", inst.op);
        }
        result
    }
}

/// A status context with every exception masked and the given rounding mode.
pub fn status(rm: RoundingMode) -> StatusContext {
    StatusContext::with_rounding(rm)
}
