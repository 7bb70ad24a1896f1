//! The contribution table mapping control sets to rotation angles

use crate::ControlSet;
use ahash::AHashMap;

/// A table of multi-controlled rotation contributions
///
/// Maps each [`ControlSet`] to the rotation angle its controlled gate
/// applies. A control set absent from the table contributes an angle of 0.
/// A freshly compiled *exact* table holds one entry per subset of the
/// register; an *approximate* table holds a subset of those entries.
///
/// # Example
/// ```
/// use rotlut_core::{ControlSet, RotationTable};
///
/// let mut table = RotationTable::new();
/// let pair = ControlSet::from_indices([0, 1])?;
/// table.set_angle(pair, 1.5);
/// assert_eq!(table.angle(pair), 1.5);
/// assert_eq!(table.angle(ControlSet::empty()), 0.0);
/// # Ok::<(), rotlut_core::SynthError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RotationTable {
    angles: AHashMap<ControlSet, f64>,
}

// Serialized as a list of (controls, angle) pairs sorted by bitmask, so the
// encoding is deterministic and survives formats that require string map keys.
#[cfg(feature = "serde")]
impl serde::Serialize for RotationTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(ControlSet, f64)> = self.iter().collect();
        entries.sort_by_key(|(controls, _)| controls.bits());
        entries.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RotationTable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<(ControlSet, f64)>::deserialize(deserializer)?;
        let mut table = RotationTable::with_capacity(entries.len());
        for (controls, angle) in entries {
            table.set_angle(controls, angle);
        }
        Ok(table)
    }
}

impl RotationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            angles: AHashMap::new(),
        }
    }

    /// Create an empty table with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            angles: AHashMap::with_capacity(capacity),
        }
    }

    /// The rotation angle for `controls`, 0 if the entry is absent
    #[inline]
    pub fn angle(&self, controls: ControlSet) -> f64 {
        self.angles.get(&controls).copied().unwrap_or(0.0)
    }

    /// The rotation angle for `controls`, if an entry is present
    #[inline]
    pub fn get(&self, controls: ControlSet) -> Option<f64> {
        self.angles.get(&controls).copied()
    }

    /// Whether the table holds an entry for `controls`
    #[inline]
    pub fn contains(&self, controls: ControlSet) -> bool {
        self.angles.contains_key(&controls)
    }

    /// Insert or overwrite the entry for `controls`
    #[inline]
    pub fn set_angle(&mut self, controls: ControlSet, angle: f64) {
        self.angles.insert(controls, angle);
    }

    /// Remove the entry for `controls`, returning its angle if present
    #[inline]
    pub fn remove(&mut self, controls: ControlSet) -> Option<f64> {
        self.angles.remove(&controls)
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// Whether the table has no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Iterate over `(controls, angle)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (ControlSet, f64)> + '_ {
        self.angles.iter().map(|(set, angle)| (*set, *angle))
    }

    /// Sum of the angles of all entries whose controls are contained in
    /// `input`
    ///
    /// This is the value the represented rotation program applies when the
    /// qubits of `input` are set: exactly the gates whose controls all lie
    /// inside `input` fire.
    pub fn sum_within(&self, input: ControlSet) -> f64 {
        self.angles
            .iter()
            .filter(|(controls, _)| controls.is_subset_of(input))
            .map(|(_, angle)| angle)
            .sum()
    }
}
