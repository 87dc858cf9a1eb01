//! Lane predicates and masked-write policies.

/// Per-lane predicate. Bit `i` gates lane `i`; bits beyond the element count
/// are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LaneMask(pub u64);

impl LaneMask {
    /// Every lane active.
    pub const ALL: Self = Self(u64::MAX);

    /// True if lane `idx` is active.
    #[inline]
    pub const fn is_active(self, idx: usize) -> bool {
        idx < 64 && (self.0 >> idx) & 1 != 0
    }

    /// The mask narrowed to its low `count` bits.
    pub const fn truncated(self, count: usize) -> Self {
        if count >= 64 { self } else { Self(self.0 & ((1u64 << count) - 1)) }
    }
}

/// Behavior of lanes whose mask bit is clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskPolicy {
    /// Keep the prior destination lane.
    Merge,
    /// Write zero.
    Zero,
}

/// A mask together with its write policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Masking {
    /// Lane predicate.
    pub mask: LaneMask,
    /// Unselected-lane policy.
    pub policy: MaskPolicy,
}

impl Masking {
    /// No mask operand: every lane active and the full result written.
    pub const UNMASKED: Self = Self { mask: LaneMask::ALL, policy: MaskPolicy::Zero };

    /// Merge-masking under `mask`.
    pub const fn merge(mask: u64) -> Self {
        Self { mask: LaneMask(mask), policy: MaskPolicy::Merge }
    }

    /// Zero-masking under `mask`.
    pub const fn zero(mask: u64) -> Self {
        Self { mask: LaneMask(mask), policy: MaskPolicy::Zero }
    }
}

/// Selects the value written to one lane.
#[inline]
pub const fn blend(dst: u64, computed: u64, active: bool, policy: MaskPolicy) -> u64 {
    if active {
        computed
    } else {
        match policy {
            MaskPolicy::Merge => dst,
            MaskPolicy::Zero => 0,
        }
    }
}
