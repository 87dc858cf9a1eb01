//! Floating-point rounding mode support.
//!
//! x86 encodes the rounding mode in two bits, both in `MXCSR.RC` (bits 14:13)
//! and in the low bits of the rounding-control immediates:
//!
//! | Value | Mode | Description                  |
//! |-------|------|------------------------------|
//! | 0b00  | RNE  | Round to Nearest, ties to Even |
//! | 0b01  | RDN  | Round Down (towards −∞)      |
//! | 0b10  | RUP  | Round Up (towards +∞)        |
//! | 0b11  | RTZ  | Round towards Zero           |

use std::cmp::Ordering;

/// x86 rounding mode encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to Nearest, ties to Even (default IEEE mode).
    #[default]
    Rne = 0b00,
    /// Round Down (towards −∞).
    Rdn = 0b01,
    /// Round Up (towards +∞).
    Rup = 0b10,
    /// Round towards Zero.
    Rtz = 0b11,
}

impl RoundingMode {
    /// Decodes a 2-bit rounding field. Only the low two bits are examined, so
    /// every encoding is valid.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0b00 => Self::Rne,
            0b01 => Self::Rdn,
            0b10 => Self::Rup,
            _ => Self::Rtz,
        }
    }

    /// Returns the 2-bit encoding.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decides whether a discarded remainder rounds the magnitude up.
    ///
    /// `half` compares the discarded bits against one half of the last kept
    /// place, `odd` is the last kept bit, `inexact` is true when anything was
    /// discarded at all.
    #[inline]
    pub(crate) const fn rounds_up(
        self,
        sign: bool,
        half: Ordering,
        odd: bool,
        inexact: bool,
    ) -> bool {
        match self {
            Self::Rne => match half {
                Ordering::Greater => true,
                Ordering::Equal => odd,
                Ordering::Less => false,
            },
            Self::Rdn => sign && inexact,
            Self::Rup => !sign && inexact,
            Self::Rtz => false,
        }
    }
}
