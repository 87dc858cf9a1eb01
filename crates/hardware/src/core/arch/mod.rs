//! x86 SIMD architectural components.
//!
//! This module contains the architectural state consumed by vector
//! floating-point instructions. It includes the following modules:
//! 1. **MXCSR:** The SIMD floating-point control and status register.
//! 2. **Vector Registers:** The `zmm` and opmask register file.

/// SIMD floating-point control and status register.
pub mod mxcsr;

/// Vector and opmask register file.
pub mod vreg;
