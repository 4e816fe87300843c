//! Contract violations at the simulation boundary

use thiserror::Error;

/// Errors raised when a caller breaks the field's contract.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    #[error("vector has {actual} samples, field has {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("unknown regime `{0}` (expected selective, multi_peak or working_memory)")]
    UnknownRegime(String),
    #[error("kernel length {0} must be odd and non-zero")]
    EvenKernelLength(usize),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
