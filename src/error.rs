use core::fmt;

use thiserror::Error;

/// Identifies which side of a paired statistic an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The first sequence
    Source,
    /// The second sequence, paired positionally with the first
    Other,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Source => f.write_str("source"),
            Operand::Other => f.write_str("other"),
        }
    }
}

/// Errors raised by the aggregate functions of this crate.
///
/// Every variant is a precondition or arithmetic failure local to a single call.
/// None of them is transient, retrying with the same input yields the same error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatisticsError {
    /// A required sequence argument was absent
    #[error("{0} sequence is absent")]
    InvalidArgument(Operand),

    /// A sequence argument was present but contained no elements
    #[error("{0} sequence contains no elements")]
    EmptySequence(Operand),

    /// The paired sequences have different element counts
    #[error("collections are not of the same length: source has {source_len}, other has {other_len}")]
    LengthMismatch {
        /// Number of elements in the source sequence
        source_len: usize,
        /// Number of elements in the other sequence
        other_len: usize,
    },

    /// Fewer elements than the requested divisor allows
    #[error("not enough elements: {required} required, {found} found")]
    InsufficientData {
        /// Minimum element count
        required: usize,
        /// Actual element count
        found: usize,
    },

    /// A normalising variance is zero
    #[error("{0} sequence has zero variance")]
    ZeroVariance(Operand),

    /// Fixed-point accumulation exceeded the representable range
    #[error("arithmetic overflow while accumulating")]
    Overflow,

    /// The accumulated result cannot be cast back to the output type
    #[error("result is not representable in the output type")]
    Unrepresentable,
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, StatisticsError>;
