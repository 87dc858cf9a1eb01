//! Vector Processing Unit (VPU) lane engine.
//!
//! Drives an element operation across the lanes of a vector register under a
//! lane predicate. The engine owns no floating-point semantics of its own; it
//! decides which lanes run and what unselected lanes become.

/// Lane iteration, blending and mask collection.
pub mod lanes;

/// Lane masks and merge/zero policies.
pub mod mask;

/// Vector width classes.
pub mod width;

pub use self::mask::{LaneMask, MaskPolicy, Masking};
pub use self::width::VectorWidth;
