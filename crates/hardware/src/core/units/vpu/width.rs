//! Vector width classes.

use serde::Deserialize;

use crate::core::units::fpu::value::Float;

/// Vector length of a packed instruction.
///
/// | Class | Bits | binary32 lanes | binary64 lanes |
/// |-------|------|----------------|----------------|
/// | V128  | 128  | 4              | 2              |
/// | V256  | 256  | 8              | 4              |
/// | V512  | 512  | 16             | 8              |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum VectorWidth {
    /// `xmm`.
    V128,
    /// `ymm`.
    V256,
    /// `zmm`.
    #[default]
    V512,
}

impl VectorWidth {
    /// Width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::V128 => 128,
            Self::V256 => 256,
            Self::V512 => 512,
        }
    }

    /// Number of 64-bit words covered.
    pub const fn qwords(self) -> usize {
        (self.bits() / 64) as usize
    }

    /// Element count for element type `F`.
    pub const fn lanes<F: Float>(self) -> usize {
        (self.bits() / F::WIDTH) as usize
    }
}
