//! Execution units and functional components.
//!
//! This module contains the floating-point unit, which implements the
//! semantics of a single element, and the vector processing unit, which
//! drives those semantics across masked lanes.

/// Floating-Point Unit for IEEE 754 element operations.
pub mod fpu;

/// Vector lane iteration and masking engine.
pub mod vpu;
