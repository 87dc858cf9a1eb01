//! Floating-point exception flags.
//!
//! The x86 SIMD unit reports six exception conditions in `MXCSR[5:0]`; the
//! matching mask bits live in `MXCSR[12:7]` and use the same ordering:
//!
//! | Bit | Flag | Description         |
//! |-----|------|---------------------|
//! |  0  | IE   | Invalid Operation   |
//! |  1  | DE   | Denormal Operand    |
//! |  2  | ZE   | Divide by Zero      |
//! |  3  | OE   | Overflow            |
//! |  4  | UE   | Underflow           |
//! |  5  | PE   | Precision (Inexact) |
//!
//! IE, DE and ZE are *pre-computational*: they are detected from the operands
//! before any rounding takes place.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Floating-point exception flags (`MXCSR[5:0]` layout).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FpFlags(u8);

impl FpFlags {
    /// No exceptions raised.
    pub const NONE: Self = Self(0);
    /// Invalid Operation.
    pub const IE: Self = Self(1 << 0);
    /// Denormal Operand.
    pub const DE: Self = Self(1 << 1);
    /// Divide by Zero.
    pub const ZE: Self = Self(1 << 2);
    /// Overflow.
    pub const OE: Self = Self(1 << 3);
    /// Underflow.
    pub const UE: Self = Self(1 << 4);
    /// Precision (inexact result).
    pub const PE: Self = Self(1 << 5);
    /// Every architecturally reportable flag.
    pub const ALL: Self = Self(0x3F);
    /// The pre-computational subset (IE, DE, ZE).
    pub const PRE_COMPUTATIONAL: Self = Self(0x07);

    /// Builds a flag set from raw bits; bits above bit 5 are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Returns the raw 6-bit flag value for writing into `MXCSR`.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no flags are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Returns true if any flag in `other` is set.
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl BitOr for FpFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FpFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for FpFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for FpFlags {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for FpFlags {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

impl fmt::Display for FpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(FpFlags, &str); 6] = [
            (FpFlags::IE, "IE"),
            (FpFlags::DE, "DE"),
            (FpFlags::ZE, "ZE"),
            (FpFlags::OE, "OE"),
            (FpFlags::UE, "UE"),
            (FpFlags::PE, "PE"),
        ];
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
