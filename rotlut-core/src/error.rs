//! Error types for rotlut

use thiserror::Error;

/// Errors that can occur while building or synthesizing a rotation table
#[derive(Debug, Error)]
pub enum SynthError {
    /// Register has more indices than the synthesizer can enumerate
    #[error("register of {size} qubits exceeds the supported maximum of {max}")]
    RegisterTooLarge { size: usize, max: usize },

    /// Control index does not fit in a control-set bitmask
    #[error("control index {index} is out of range for a 64-bit control set")]
    IndexOutOfRange { index: usize },

    /// Target function returned NaN or an infinity
    #[error("target function produced a non-finite rotation angle at input value {input_value}")]
    NonFiniteRotation { input_value: f64 },
}

impl SynthError {
    /// Create a register-too-large error
    pub fn register_too_large(size: usize, max: usize) -> Self {
        Self::RegisterTooLarge { size, max }
    }
}
