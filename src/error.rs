//! Error kinds reported by fixed-point operations.

use thiserror::Error;

/// Result type alias for lockstep-fixed operations
pub type Result<T> = std::result::Result<T, FpError>;

/// Errors that can occur in fixed-point arithmetic and conversions.
///
/// Every failure is local and deterministic: retrying the same call with the
/// same inputs reproduces the same error on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FpError {
    /// The true result does not fit in the Q31.32 range
    #[error("arithmetic overflow")]
    Overflow,

    /// Division or remainder by a zero-valued operand
    #[error("division by zero")]
    DivideByZero,

    /// Square root of a negative value
    #[error("negative argument")]
    NegativeArgument,

    /// Destination array was not supplied
    #[error("destination array is absent")]
    NullArgument,

    /// Start index is negative or past the end of the destination
    #[error("index {index} is out of range for an array of length {len}")]
    IndexOutOfRange {
        /// Requested start index
        index: isize,
        /// Length of the destination array
        len: usize,
    },

    /// Destination has too few elements after the start index
    #[error("need {required} elements from index {index}, only {available} remain")]
    InsufficientSpace {
        /// Requested start index
        index: usize,
        /// Number of elements the source writes
        required: usize,
        /// Elements remaining from `index` to the end
        available: usize,
    },

    /// The requested construction is not available in fixed point
    #[error("unsupported: {0}")]
    Unsupported(&'static str),

    /// Text is not a decimal literal
    #[error("invalid decimal literal: {0:?}")]
    InvalidLiteral(String),
}
