//! Floating-point comparison and the 32 VCMP predicates.
//!
//! A comparison first reduces its operands to a [`Relation`]; a
//! [`ComparePredicate`] then decides which relations yield `true`. The
//! predicate also decides whether a quiet NaN operand raises Invalid
//! (signaling predicates, suffix `S`) or not (quiet predicates, suffix `Q`).
//! A signaling NaN always raises Invalid.

use super::exception_flags::FpFlags;
use super::nan_handling::daz;
use super::status::StatusContext;
use super::value::Float;

/// Outcome of comparing two values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `a < b`.
    Less,
    /// `a == b` (including `+0 == -0`).
    Equal,
    /// `a > b`.
    Greater,
    /// At least one operand is a NaN.
    Unordered,
}

/// Compares `a` with `b`.
///
/// DAZ is applied to both inputs. A NaN operand yields
/// [`Relation::Unordered`] and raises IE when `signaling` is set or the NaN
/// is signaling. Ordered comparisons of denormal operands raise DE.
pub fn compare<F: Float>(a: F, b: F, signaling: bool, status: &mut StatusContext) -> Relation {
    let a = daz(a, status);
    let b = daz(b, status);
    if a.is_nan() || b.is_nan() {
        if signaling || a.is_snan() || b.is_snan() {
            status.raise(FpFlags::IE);
        }
        return Relation::Unordered;
    }
    if a.is_denormal() || b.is_denormal() {
        status.raise(FpFlags::DE);
    }
    if a.is_zero() && b.is_zero() {
        return Relation::Equal;
    }
    let ordering = match (a.sign(), b.sign()) {
        (false, false) => a.abs_raw().cmp(&b.abs_raw()),
        (true, true) => b.abs_raw().cmp(&a.abs_raw()),
        (false, true) => std::cmp::Ordering::Greater,
        (true, false) => std::cmp::Ordering::Less,
    };
    match ordering {
        std::cmp::Ordering::Less => Relation::Less,
        std::cmp::Ordering::Equal => Relation::Equal,
        std::cmp::Ordering::Greater => Relation::Greater,
    }
}

/// The VCMPPS/VCMPPD/VCMPSS/VCMPSD predicate selected by `imm8[4:0]`.
///
/// Variant names follow the assembler mnemonics: `O`/`U` is the result for
/// unordered operands (false/true), `Q`/`S` is quiet/signaling.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ComparePredicate {
    EqOq = 0x00,
    LtOs = 0x01,
    LeOs = 0x02,
    UnordQ = 0x03,
    NeqUq = 0x04,
    NltUs = 0x05,
    NleUs = 0x06,
    OrdQ = 0x07,
    EqUq = 0x08,
    NgeUs = 0x09,
    NgtUs = 0x0A,
    FalseOq = 0x0B,
    NeqOq = 0x0C,
    GeOs = 0x0D,
    GtOs = 0x0E,
    TrueUq = 0x0F,
    EqOs = 0x10,
    LtOq = 0x11,
    LeOq = 0x12,
    UnordS = 0x13,
    NeqUs = 0x14,
    NltUq = 0x15,
    NleUq = 0x16,
    OrdS = 0x17,
    EqUs = 0x18,
    NgeUq = 0x19,
    NgtUq = 0x1A,
    FalseOs = 0x1B,
    NeqOs = 0x1C,
    GeOq = 0x1D,
    GtOq = 0x1E,
    TrueUs = 0x1F,
}

const PREDICATES: [ComparePredicate; 32] = {
    use ComparePredicate::{
        EqOq, EqOs, EqUq, EqUs, FalseOq, FalseOs, GeOq, GeOs, GtOq, GtOs, LeOq, LeOs, LtOq, LtOs,
        NeqOq, NeqOs, NeqUq, NeqUs, NgeUq, NgeUs, NgtUq, NgtUs, NleUq, NleUs, NltUq, NltUs, OrdQ,
        OrdS, TrueUq, TrueUs, UnordQ, UnordS,
    };
    [
        EqOq, LtOs, LeOs, UnordQ, NeqUq, NltUs, NleUs, OrdQ, EqUq, NgeUs, NgtUs, FalseOq, NeqOq,
        GeOs, GtOs, TrueUq, EqOs, LtOq, LeOq, UnordS, NeqUs, NltUq, NleUq, OrdS, EqUs, NgeUq,
        NgtUq, FalseOs, NeqOs, GeOq, GtOq, TrueUs,
    ]
};

impl ComparePredicate {
    /// Decodes `imm8[4:0]`; higher bits are ignored.
    pub const fn from_imm(imm: u8) -> Self {
        PREDICATES[(imm & 0x1F) as usize]
    }

    /// The 5-bit encoding.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// True if a quiet NaN operand raises Invalid.
    ///
    /// Within each half of the table the signaling predicates are 1, 2, 5,
    /// 6, 9, 10, 13 and 14; the upper half inverts the choice.
    pub const fn is_signaling(self) -> bool {
        let low = self.bits() & 0xF;
        let signaling_low = matches!(low, 1 | 2 | 5 | 6 | 9 | 10 | 13 | 14);
        signaling_low != (self.bits() & 0x10 != 0)
    }

    /// Evaluates the predicate for an already computed relation.
    pub const fn holds(self, rel: Relation) -> bool {
        use Relation::{Equal, Greater, Less, Unordered};
        match self.bits() & 0xF {
            0x0 => matches!(rel, Equal),
            0x1 => matches!(rel, Less),
            0x2 => matches!(rel, Less | Equal),
            0x3 => matches!(rel, Unordered),
            0x4 => !matches!(rel, Equal),
            0x5 => !matches!(rel, Less),
            0x6 => !matches!(rel, Less | Equal),
            0x7 => !matches!(rel, Unordered),
            0x8 => matches!(rel, Equal | Unordered),
            0x9 => matches!(rel, Less | Unordered),
            0xA => !matches!(rel, Greater),
            0xB => false,
            0xC => matches!(rel, Less | Greater),
            0xD => matches!(rel, Greater | Equal),
            0xE => matches!(rel, Greater),
            _ => true,
        }
    }
}

/// Compares one lane pair for a mask-producing VCMP.
///
/// Flags follow [`compare`] with the predicate's signaling behavior.
pub fn compare_for_mask<F: Float>(
    a: F,
    b: F,
    predicate: ComparePredicate,
    status: &mut StatusContext,
) -> bool {
    let rel = compare(a, b, predicate.is_signaling(), status);
    predicate.holds(rel)
}
