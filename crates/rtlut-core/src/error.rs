//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while building or querying a lookup table.
///
/// All of these are detected eagerly, either at construction or before a
/// query touches the value array. Interpolation itself never fails.
#[derive(Debug, Error)]
pub enum LutError {
    /// Axis is empty or not strictly ascending.
    #[error("invalid axis: {reason}")]
    InvalidAxis {
        /// What is wrong with the axis.
        reason: String,
    },

    /// Value array length does not match the product of axis lengths.
    #[error("value count mismatch: axes describe {expected} values, got {actual}")]
    SizeMismatch {
        /// Product of all axis lengths.
        expected: usize,
        /// Length of the supplied value array.
        actual: usize,
    },

    /// Query coordinate has the wrong number of components.
    #[error("coordinate arity mismatch: table has {expected} dimensions, got {actual}")]
    ArityMismatch {
        /// Dimension count of the table.
        expected: usize,
        /// Length of the supplied coordinate.
        actual: usize,
    },

    /// Axis index is not a valid dimension.
    #[error("dimension index {index} out of range for {count} dimensions")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Dimension count of the table.
        count: usize,
    },

    /// Named query refers to an axis the table does not have.
    #[error("unknown axis: {name}")]
    UnknownAxis {
        /// Requested axis name.
        name: String,
    },
}
