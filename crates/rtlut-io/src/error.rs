//! Error types for LUT decoding and layout handling.

use thiserror::Error;

/// Result type for rtlut-io operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing LUT files.
#[derive(Debug, Error)]
pub enum IoError {
    /// Stream ended before the layout was fully read.
    #[error("truncated stream while reading {context}")]
    TruncatedStream {
        /// What was being read.
        context: String,
    },

    /// Declared axis lengths disagree with the stream length.
    #[error("stream length mismatch: layout implies {expected} bytes, stream has {actual}")]
    AxisLengthMismatch {
        /// Byte count implied by the axis and parameter lengths.
        expected: u64,
        /// Byte count actually available.
        actual: u64,
    },

    /// Length prefix is negative or too large.
    #[error("invalid length {length} for {context}")]
    InvalidLength {
        /// What the length describes.
        context: String,
        /// The raw length read from the stream.
        length: i64,
    },

    /// Layout descriptor is inconsistent.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// Text curve could not be parsed.
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML layout parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Decoded data does not form a valid table.
    #[error("LUT error: {0}")]
    Lut(#[from] rtlut_core::LutError),
}

impl IoError {
    /// Maps an I/O error, turning end-of-file into [`IoError::TruncatedStream`].
    pub(crate) fn from_read(err: std::io::Error, context: impl Into<String>) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            IoError::TruncatedStream {
                context: context.into(),
            }
        } else {
            IoError::Io(err)
        }
    }
}
