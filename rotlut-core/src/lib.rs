//! Core types for multi-controlled rotation lookup-table synthesis
//!
//! This crate provides the fundamental types for representing a function as a
//! weighted sum of multi-controlled rotations:
//! - [`ControlSet`]: a subset of control indices, stored as a bitmask
//! - [`RotationTable`]: the mapping from control sets to rotation angles
//! - [`cost`]: the Toffoli/ancilla cost model for controlled rotations
//!
//! # Example
//! ```
//! use rotlut_core::{ControlSet, RotationTable};
//!
//! let mut table = RotationTable::new();
//! table.set_angle(ControlSet::empty(), 0.5);
//! assert_eq!(table.angle(ControlSet::empty()), 0.5);
//! ```

pub mod control_set;
pub mod cost;
pub mod error;
pub mod table;

// Re-exports for convenience
pub use control_set::ControlSet;
pub use error::SynthError;
pub use table::RotationTable;

/// Type alias for results in rotlut
pub type Result<T> = std::result::Result<T, SynthError>;
