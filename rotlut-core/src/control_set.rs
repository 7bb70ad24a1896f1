//! Control-set addressing for multi-controlled rotations

use crate::{Result, SynthError};
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// An immutable subset of control indices, stored as a bitmask
///
/// Bit `i` set means index `i` is a control. Two sets are equal iff they
/// contain the same indices, and equality, hashing, subset tests and
/// cardinality are all O(1) integer operations.
///
/// # Example
/// ```
/// use rotlut_core::ControlSet;
///
/// let s = ControlSet::from_indices([0, 2])?;
/// assert!(s.contains(2));
/// assert!(!s.contains(1));
/// assert!(s.is_subset_of(ControlSet::full(3)));
/// # Ok::<(), rotlut_core::SynthError>(())
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlSet(u64);

impl ControlSet {
    /// Maximum number of distinct indices a control set can hold
    pub const MAX_INDICES: usize = 64;

    /// The empty set (no controls)
    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The set containing every index in `0..count`
    ///
    /// # Panics
    /// Panics if `count` exceeds [`ControlSet::MAX_INDICES`].
    #[inline]
    pub fn full(count: usize) -> Self {
        assert!(
            count <= Self::MAX_INDICES,
            "control set holds at most {} indices",
            Self::MAX_INDICES
        );
        if count == Self::MAX_INDICES {
            Self(u64::MAX)
        } else {
            Self((1u64 << count) - 1)
        }
    }

    /// Construct directly from a bitmask
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Build a set from individual indices; duplicates are harmless
    ///
    /// # Errors
    /// Returns [`SynthError::IndexOutOfRange`] if any index is `>= 64`.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Result<Self> {
        let mut set = Self::empty();
        for index in indices {
            set = set.with_index(index)?;
        }
        Ok(set)
    }

    /// A copy of this set with one more index added
    ///
    /// # Errors
    /// Returns [`SynthError::IndexOutOfRange`] if `index >= 64`.
    #[inline]
    pub fn with_index(self, index: usize) -> Result<Self> {
        if index >= Self::MAX_INDICES {
            return Err(SynthError::IndexOutOfRange { index });
        }
        Ok(Self(self.0 | (1u64 << index)))
    }

    /// Whether `index` is a member of this set
    #[inline]
    pub const fn contains(&self, index: usize) -> bool {
        index < Self::MAX_INDICES && (self.0 >> index) & 1 == 1
    }

    /// Number of indices in the set
    #[inline]
    pub const fn cardinality(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether this set contains no indices
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether every index of `self` is also in `other`
    ///
    /// The empty set is a subset of every set, and every set is a subset of
    /// itself.
    #[inline]
    pub const fn is_subset_of(&self, other: ControlSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// The underlying bitmask
    #[inline]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Iterate over the member indices in increasing order
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                None
            } else {
                let index = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(index)
            }
        })
    }
}

impl BitAnd for ControlSet {
    type Output = ControlSet;

    /// Set intersection
    #[inline]
    fn bitand(self, rhs: ControlSet) -> ControlSet {
        ControlSet(self.0 & rhs.0)
    }
}

impl BitOr for ControlSet {
    type Output = ControlSet;

    /// Set union
    #[inline]
    fn bitor(self, rhs: ControlSet) -> ControlSet {
        ControlSet(self.0 | rhs.0)
    }
}

impl fmt::Display for ControlSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (position, index) in self.indices().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "}}")
    }
}
