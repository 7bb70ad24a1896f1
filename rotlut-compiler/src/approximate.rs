//! Greedy approximation passes trading rotations for Toffoli cost
//!
//! Both passes split the current table into cheap rotations (fewer than two
//! controls, zero cost, always kept) and expensive ones, rank the expensive
//! rotations by the efficiency ratio `|angle| / toffoli_cost`, and keep or
//! drop a prefix of that ranking. The two stopping rules differ and are kept
//! as separate scans on purpose: the error budget accumulates the dropped
//! magnitude before checking, the cost budget checks before accumulating the
//! kept cost.

use crate::synthesizer::RotationSynthesizer;
use rotlut_core::{cost, ControlSet, Result, RotationTable};
use std::fmt;

/// Outcome of one approximation pass
#[derive(Debug, Clone, Copy)]
pub struct ApproximationStats {
    /// Number of rotations removed from the exact table
    pub removed_rotations: usize,
    /// Sum of the absolute angles of the removed rotations; an upper bound
    /// on the evaluation error at any single input
    pub error_incurred: f64,
    /// Toffoli gates saved by the removals
    pub toffoli_saved: u64,
    /// Total Toffoli cost of the resulting table
    pub toffoli_count: u64,
    /// Peak ancilla requirement of the resulting table
    pub ancilla_count: usize,
}

impl fmt::Display for ApproximationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Approximation:")?;
        writeln!(f, "  Rotations removed: {}", self.removed_rotations)?;
        writeln!(f, "  Error incurred: {:.6}", self.error_incurred)?;
        writeln!(f, "  Toffolis saved: {}", self.toffoli_saved)?;
        writeln!(f, "  Toffoli count: {}", self.toffoli_count)?;
        write!(f, "  Ancilla count: {}", self.ancilla_count)
    }
}

/// Expensive rotations ranked ascending by efficiency, plus the cheap rest
///
/// Ties break on the control-set bitmask so the ranking is deterministic
/// regardless of hash-map iteration order.
fn rank_expensive(table: &RotationTable) -> (Vec<(ControlSet, f64)>, Vec<(ControlSet, f64)>) {
    let (expensive, cheap): (Vec<_>, Vec<_>) = table
        .iter()
        .partition(|(controls, _)| controls.cardinality() >= 2);
    let mut expensive = expensive;
    expensive.sort_by(|(set_a, angle_a), (set_b, angle_b)| {
        let ratio_a = angle_a.abs() / cost::toffoli_cost(*set_a) as f64;
        let ratio_b = angle_b.abs() / cost::toffoli_cost(*set_b) as f64;
        ratio_a
            .total_cmp(&ratio_b)
            .then(set_a.bits().cmp(&set_b.bits()))
    });
    (expensive, cheap)
}

impl RotationSynthesizer {
    /// Drop low-efficiency rotations while the accumulated dropped magnitude
    /// stays within `error_bound`
    ///
    /// Expensive rotations are removed in ascending efficiency order; the
    /// scan stops at the first rotation whose magnitude would push the
    /// accumulated total past the bound. The sum of dropped magnitudes upper
    /// bounds the evaluation error at every input, so the resulting table is
    /// within `error_bound` of the exact function everywhere.
    ///
    /// A non-finite or negative bound is treated as 0, which removes only
    /// zero-magnitude rotations. If the current table is already an
    /// approximation, the exact table is recompiled first, so the pass is
    /// always relative to the true coefficients.
    ///
    /// # Errors
    /// Propagates recompilation failures; see [`RotationSynthesizer::new`].
    pub fn approximate_to_error(&mut self, error_bound: f64) -> Result<ApproximationStats> {
        if self.is_approximated() {
            self.compile()?;
        }
        let error_bound = if error_bound >= 0.0 { error_bound } else { 0.0 };

        let (expensive, cheap) = rank_expensive(self.table());
        let mut error_incurred = 0.0;
        let mut toffoli_saved = 0;
        let mut removed = 0;
        for (controls, angle) in &expensive {
            let contribution = angle.abs();
            if error_incurred + contribution > error_bound {
                break;
            }
            error_incurred += contribution;
            toffoli_saved += cost::toffoli_cost(*controls);
            removed += 1;
        }

        let kept = expensive[removed..].iter().copied();
        self.install_approximation(collect_table(cheap, kept));
        Ok(self.stats(removed, error_incurred, toffoli_saved))
    }

    /// Keep high-efficiency rotations while their total cost stays within
    /// `max_toffoli_cost`
    ///
    /// Expensive rotations are considered in descending efficiency order and
    /// kept as long as adding one stays within the budget; the scan stops at
    /// the first rotation that would overflow it, without skipping ahead to
    /// cheaper candidates. The result is a greedy cost-feasible table, not
    /// an optimal knapsack solution. A budget of 0 removes every expensive
    /// rotation.
    ///
    /// If the current table is already an approximation, the exact table is
    /// recompiled first.
    ///
    /// # Errors
    /// Propagates recompilation failures; see [`RotationSynthesizer::new`].
    pub fn approximate_to_cost(&mut self, max_toffoli_cost: u64) -> Result<ApproximationStats> {
        if self.is_approximated() {
            self.compile()?;
        }

        let (mut expensive, cheap) = rank_expensive(self.table());
        expensive.reverse();

        let mut kept = Vec::with_capacity(expensive.len());
        let mut kept_cost = 0;
        let mut scanned = 0;
        for &(controls, angle) in &expensive {
            let gate_cost = cost::toffoli_cost(controls);
            if kept_cost + gate_cost > max_toffoli_cost {
                break;
            }
            kept_cost += gate_cost;
            kept.push((controls, angle));
            scanned += 1;
        }

        let removed = expensive.len() - scanned;
        let error_incurred: f64 = expensive[scanned..]
            .iter()
            .map(|(_, angle)| angle.abs())
            .sum();
        let toffoli_saved: u64 = expensive[scanned..]
            .iter()
            .map(|(controls, _)| cost::toffoli_cost(*controls))
            .sum();

        self.install_approximation(collect_table(cheap, kept.into_iter()));
        Ok(self.stats(removed, error_incurred, toffoli_saved))
    }

    fn stats(&self, removed: usize, error_incurred: f64, toffoli_saved: u64) -> ApproximationStats {
        ApproximationStats {
            removed_rotations: removed,
            error_incurred,
            toffoli_saved,
            toffoli_count: self.toffoli_count(),
            ancilla_count: self.ancilla_count(),
        }
    }
}

fn collect_table(
    cheap: Vec<(ControlSet, f64)>,
    kept: impl Iterator<Item = (ControlSet, f64)>,
) -> RotationTable {
    let mut table = RotationTable::with_capacity(cheap.len());
    for (controls, angle) in cheap.into_iter().chain(kept) {
        table.set_angle(controls, angle);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn set(indices: &[usize]) -> ControlSet {
        ControlSet::from_indices(indices.iter().copied()).unwrap()
    }

    fn cube_synthesizer() -> RotationSynthesizer {
        RotationSynthesizer::new(vec![1.0, 2.0, 4.0], |v| v * v * v).unwrap()
    }

    #[test]
    fn test_zero_error_budget_keeps_nonzero_rotations() {
        let mut synth = cube_synthesizer();
        let stats = synth.approximate_to_error(0.0).unwrap();
        assert_eq!(stats.removed_rotations, 0);
        assert_eq!(synth.table().len(), 8);
        assert_eq!(synth.toffoli_count(), 10);
    }

    #[test]
    fn test_zero_error_budget_drops_zero_magnitude_rotations() {
        // f(v) = v is linear, so every multi-controlled coefficient is 0.
        let mut synth = RotationSynthesizer::new(vec![1.0, 2.0, 4.0], |v| v).unwrap();
        let stats = synth.approximate_to_error(0.0).unwrap();
        assert_eq!(stats.removed_rotations, 4);
        assert_eq!(stats.error_incurred, 0.0);
        assert_eq!(synth.table().len(), 4);
        assert_eq!(synth.toffoli_count(), 0);
    }

    #[test]
    fn test_negative_error_budget_clamps_to_zero() {
        let mut synth = cube_synthesizer();
        let stats = synth.approximate_to_error(-5.0).unwrap();
        assert_eq!(stats.removed_rotations, 0);
        let stats = synth.approximate_to_error(f64::NAN).unwrap();
        assert_eq!(stats.removed_rotations, 0);
    }

    #[test]
    fn test_error_budget_removes_worst_ratio_first() {
        // Efficiency ratios: {0,1} -> 9, {0,1,2} -> 12, {0,2} -> 30,
        // {1,2} -> 72. A budget of 18 admits exactly the first removal.
        let mut synth = cube_synthesizer();
        let stats = synth.approximate_to_error(18.0).unwrap();
        assert_eq!(stats.removed_rotations, 1);
        assert_relative_eq!(stats.error_incurred, 18.0);
        assert!(!synth.table().contains(set(&[0, 1])));
        assert!(synth.table().contains(set(&[0, 1, 2])));
        assert_eq!(synth.toffoli_count(), 8);
        assert!(synth.is_approximated());
    }

    #[test]
    fn test_cheap_rotations_survive_every_pass() {
        let mut synth = cube_synthesizer();
        synth.approximate_to_error(f64::INFINITY).unwrap();
        for indices in [vec![], vec![0], vec![1], vec![2]] {
            assert!(synth.table().contains(set(&indices)));
        }
        assert_eq!(synth.table().len(), 4);

        let mut synth = cube_synthesizer();
        synth.approximate_to_cost(0).unwrap();
        assert_eq!(synth.table().len(), 4);
        assert_eq!(synth.toffoli_count(), 0);
        assert_eq!(synth.ancilla_count(), 0);
    }

    #[test]
    fn test_cost_budget_keeps_best_ratio_first() {
        // Descending ratios: {1,2}, {0,2}, {0,1,2}, {0,1}. A budget of 6
        // fits the two pairs; the triple (cost 4) would overflow and the
        // scan stops there.
        let mut synth = cube_synthesizer();
        let stats = synth.approximate_to_cost(6).unwrap();
        assert_eq!(stats.removed_rotations, 2);
        assert_eq!(synth.toffoli_count(), 4);
        assert!(synth.table().contains(set(&[1, 2])));
        assert!(synth.table().contains(set(&[0, 2])));
        assert!(!synth.table().contains(set(&[0, 1, 2])));
        assert!(!synth.table().contains(set(&[0, 1])));
        assert_relative_eq!(stats.error_incurred, 48.0 + 18.0);
    }

    #[test]
    fn test_cost_budget_scan_stops_at_first_overflow() {
        // Budget 5 fits {1,2} and {0,2} (cost 4); the triple overflows and
        // the scan must not skip ahead to the cheaper {0,1}.
        let mut synth = cube_synthesizer();
        synth.approximate_to_cost(5).unwrap();
        assert_eq!(synth.toffoli_count(), 4);
        assert!(!synth.table().contains(set(&[0, 1])));
    }

    #[test]
    fn test_cost_budget_never_exceeded() {
        for budget in 0..=10 {
            let mut synth = cube_synthesizer();
            synth.approximate_to_cost(budget).unwrap();
            assert!(synth.toffoli_count() <= budget);
        }
    }

    #[test]
    fn test_second_pass_recompiles_first() {
        let mut synth = cube_synthesizer();
        synth.approximate_to_error(20.0).unwrap();
        assert!(synth.is_approximated());

        // Relative to the recompiled exact table, a zero budget removes
        // nothing, restoring all eight rotations.
        let stats = synth.approximate_to_error(0.0).unwrap();
        assert_eq!(stats.removed_rotations, 0);
        assert_eq!(synth.table().len(), 8);
        assert_eq!(synth.toffoli_count(), 10);
    }

    #[test]
    fn test_chained_passes_are_independent() {
        let mut once = cube_synthesizer();
        once.approximate_to_error(18.0).unwrap();

        let mut twice = cube_synthesizer();
        twice.approximate_to_error(18.0).unwrap();
        twice.approximate_to_error(18.0).unwrap();

        assert_eq!(once.table(), twice.table());
    }

    #[test]
    fn test_recompile_restores_exact_table() {
        let mut synth = cube_synthesizer();
        let exact = synth.table().clone();
        synth.approximate_to_cost(0).unwrap();
        assert_ne!(*synth.table(), exact);
        synth.recompile().unwrap();
        assert_eq!(*synth.table(), exact);
        assert!(!synth.is_approximated());
    }

    #[test]
    fn test_stats_display() {
        let mut synth = cube_synthesizer();
        let stats = synth.approximate_to_cost(6).unwrap();
        let text = format!("{}", stats);
        assert!(text.contains("Rotations removed: 2"));
        assert!(text.contains("Toffoli count: 4"));
    }
}
