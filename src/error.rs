//! Error types for sparse-calc

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MatrixError`]
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors that can occur while reading, combining or writing matrices
#[derive(Error, Debug)]
pub enum MatrixError {
    /// Operand shapes are incompatible for the requested operation
    #[error(
        "Dimension mismatch for {operation}: {}x{} vs {}x{}",
        .left.0, .left.1, .right.0, .right.1
    )]
    DimensionMismatch {
        /// Name of the operation that was attempted
        operation: &'static str,
        /// Shape of the left operand as (rows, cols)
        left: (usize, usize),
        /// Shape of the right operand as (rows, cols)
        right: (usize, usize),
    },

    /// Structural violation of the text format
    #[error("Format error on line {line}: {reason}")]
    Format {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// A numeric field failed integer parsing
    #[error("Not a number on line {line}: {field:?}")]
    NotANumber {
        /// 1-based line number
        line: usize,
        /// The offending field, after trimming
        field: String,
    },

    /// File could not be read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path of the file being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Operation name not one of add, subtract, multiply
    #[error("Unknown operation '{0}' (expected add, subtract or multiply)")]
    UnknownOperation(String),

    /// Integer overflow while combining elements
    #[error("Integer overflow during {operation} at ({row}, {col})")]
    Overflow {
        /// Name of the operation
        operation: &'static str,
        /// Row of the element being computed
        row: usize,
        /// Column of the element being computed
        col: usize,
    },

    /// A stored element lies outside the matrix dimensions
    #[error("Element ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        /// Row of the element
        row: usize,
        /// Column of the element
        col: usize,
        /// Matrix rows
        rows: usize,
        /// Matrix columns
        cols: usize,
    },

    /// Matrix dimensions too large to allocate compressed storage for
    #[error("Matrix of {rows}x{cols} is too large for compressed storage")]
    TooLarge {
        /// Matrix rows
        rows: usize,
        /// Matrix columns
        cols: usize,
    },
}

impl MatrixError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        MatrixError::Format {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn not_a_number(line: usize, field: &str) -> Self {
        MatrixError::NotANumber {
            line,
            field: field.to_string(),
        }
    }
}
