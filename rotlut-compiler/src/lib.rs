//! Function-to-rotation-table compilation and approximation
//!
//! This crate compiles a classical real-valued function into a table of
//! multi-controlled rotations over a weighted qubit register, such that the
//! rotations firing for any basis-state input sum to the function's value at
//! that input. It provides:
//! - [`RotationSynthesizer`]: exact compilation via a Möbius transform over
//!   the subset lattice, plus evaluation of the compiled table
//! - two greedy approximation passes that trade rotations for Toffoli cost,
//!   under either an error budget or a cost budget
//! - exhaustive [`ErrorStatistics`] over every basis-state input
//!
//! # Example
//! ```
//! use rotlut_compiler::RotationSynthesizer;
//! use rotlut_core::ControlSet;
//!
//! let mut synth = RotationSynthesizer::new(vec![1.0, 2.0, 4.0], |v| v * v * v)?;
//! assert_eq!(synth.evaluate(ControlSet::full(3)), 343.0);
//!
//! let stats = synth.approximate_to_cost(6)?;
//! assert!(synth.toffoli_count() <= 6);
//! assert!(stats.removed_rotations > 0);
//! # Ok::<(), rotlut_core::SynthError>(())
//! ```

pub mod approximate;
pub mod statistics;
pub mod synthesizer;

pub use approximate::ApproximationStats;
pub use statistics::ErrorStatistics;
pub use synthesizer::{RotationSynthesizer, MAX_REGISTER_SIZE};

// Re-exports for convenience
pub use rotlut_core::{ControlSet, Result, RotationTable, SynthError};
