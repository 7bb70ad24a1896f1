//! Toffoli and ancilla cost model for multi-controlled rotations
//!
//! A rotation controlled on fewer than two qubits needs no decomposition: it
//! is a global phase or a singly-controlled gate. A rotation with `k >= 2`
//! controls is decomposed with the standard ancilla-borrowing construction,
//! which spends `2 * (k - 1)` Toffoli gates and borrows `k - 1` ancilla
//! qubits. Cost depends only on the number of controls, never on the angle.

use crate::{ControlSet, RotationTable};

/// Toffoli gates needed to implement a rotation with these controls
///
/// # Example
/// ```
/// use rotlut_core::{cost, ControlSet};
///
/// assert_eq!(cost::toffoli_cost(ControlSet::empty()), 0);
/// assert_eq!(cost::toffoli_cost(ControlSet::full(4)), 6);
/// ```
#[inline]
pub fn toffoli_cost(controls: ControlSet) -> u64 {
    let k = controls.cardinality() as u64;
    if k < 2 {
        0
    } else {
        2 * (k - 1)
    }
}

/// Ancilla qubits the decomposition of this rotation borrows
#[inline]
pub fn ancilla_count(controls: ControlSet) -> usize {
    controls.cardinality().saturating_sub(1)
}

/// Total Toffoli cost of every rotation in the table
pub fn table_toffoli_cost(table: &RotationTable) -> u64 {
    table.iter().map(|(controls, _)| toffoli_cost(controls)).sum()
}

/// Peak ancilla requirement over the table, 0 if the table is empty
pub fn table_ancilla_count(table: &RotationTable) -> usize {
    table
        .iter()
        .map(|(controls, _)| ancilla_count(controls))
        .max()
        .unwrap_or(0)
}
