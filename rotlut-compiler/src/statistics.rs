//! Exhaustive error statistics for a compiled or approximated table

use crate::synthesizer::RotationSynthesizer;
use rayon::prelude::*;
use rotlut_core::ControlSet;
use std::fmt;

/// Deviation of the current table from the target function, measured over
/// every basis state of the register
#[derive(Debug, Clone, Copy)]
pub struct ErrorStatistics {
    /// Mean absolute error over all `2^n` basis states
    pub mean_abs_error: f64,
    /// Largest absolute error over all basis states
    pub max_abs_error: f64,
    /// A basis state achieving the largest error (lowest bitmask on ties)
    pub argmax_input: ControlSet,
}

impl fmt::Display for ErrorStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error statistics:")?;
        writeln!(f, "  Mean |error|: {:.6e}", self.mean_abs_error)?;
        writeln!(f, "  Max |error|: {:.6e}", self.max_abs_error)?;
        write!(f, "  Worst input: {}", self.argmax_input)
    }
}

impl RotationSynthesizer {
    /// Measure the current table against the target function over the full
    /// input domain
    ///
    /// Scans all `2^n` basis states, comparing [`evaluate`] with the target
    /// function at each state's input value. The states are independent, so
    /// the scan runs in parallel. This is a diagnostic with the same
    /// exponential footprint as compilation; keep the register small.
    ///
    /// [`evaluate`]: RotationSynthesizer::evaluate
    pub fn error_statistics(&self) -> ErrorStatistics {
        let subset_count = 1u64 << self.register_size();
        let (error_sum, max_abs_error, argmax_input) = (0..subset_count)
            .into_par_iter()
            .map(|bits| {
                let state = ControlSet::from_bits(bits);
                let truth = self.target(self.input_value(state));
                let error = (self.evaluate(state) - truth).abs();
                (error, error, state)
            })
            .reduce(
                || (0.0, f64::NEG_INFINITY, ControlSet::empty()),
                |left, right| {
                    let (sum_l, max_l, arg_l) = left;
                    let (sum_r, max_r, arg_r) = right;
                    let (max, arg) = if max_r > max_l
                        || (max_r == max_l && arg_r.bits() < arg_l.bits())
                    {
                        (max_r, arg_r)
                    } else {
                        (max_l, arg_l)
                    };
                    (sum_l + sum_r, max, arg)
                },
            );

        ErrorStatistics {
            mean_abs_error: error_sum / subset_count as f64,
            max_abs_error,
            argmax_input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn set(indices: &[usize]) -> ControlSet {
        ControlSet::from_indices(indices.iter().copied()).unwrap()
    }

    #[test]
    fn test_exact_table_has_no_error() {
        let synth = RotationSynthesizer::new(vec![0.5, -1.5, 2.0], |v| v.sin()).unwrap();
        let stats = synth.error_statistics();
        assert_relative_eq!(stats.mean_abs_error, 0.0, epsilon = 1e-12);
        assert_relative_eq!(stats.max_abs_error, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_removed_rotation_localizes_error() {
        // Removing only the {0,1} rotation (angle 18) leaves an error of
        // exactly 18 at the two inputs containing both qubits and none
        // elsewhere: mean is 18 * 2 / 8.
        let mut synth = RotationSynthesizer::new(vec![1.0, 2.0, 4.0], |v| v * v * v).unwrap();
        synth.approximate_to_error(18.0).unwrap();

        let stats = synth.error_statistics();
        assert_relative_eq!(stats.max_abs_error, 18.0);
        assert_relative_eq!(stats.mean_abs_error, 4.5);
        assert!(set(&[0, 1]).is_subset_of(stats.argmax_input));
    }

    #[test]
    fn test_argmax_tie_prefers_lowest_bitmask() {
        let mut synth = RotationSynthesizer::new(vec![1.0, 2.0, 4.0], |v| v * v * v).unwrap();
        synth.approximate_to_error(18.0).unwrap();
        // Both {0,1} (bits 3) and {0,1,2} (bits 7) err by 18.
        assert_eq!(synth.error_statistics().argmax_input, set(&[0, 1]));
    }

    #[test]
    fn test_empty_register_statistics() {
        let synth = RotationSynthesizer::new(vec![], |_| 42.0).unwrap();
        let stats = synth.error_statistics();
        assert_eq!(stats.max_abs_error, 0.0);
        assert_eq!(stats.argmax_input, ControlSet::empty());
    }

    #[test]
    fn test_statistics_display() {
        let synth = RotationSynthesizer::new(vec![1.0], |v| v).unwrap();
        let text = format!("{}", synth.error_statistics());
        assert!(text.contains("Mean |error|"));
        assert!(text.contains("Worst input"));
    }
}
