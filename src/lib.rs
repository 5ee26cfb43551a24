//! # sparse-calc: sparse integer matrix arithmetic
//!
//! Reads two sparse matrices from a plain-text coordinate format, combines
//! them with addition, subtraction or multiplication, and writes the result
//! back in the same format.
//!
//! ## Overview
//!
//! - [`SparseMatrix`] stores only non-zero elements, keyed by `(row, col)`
//! - [`SparseMatrix::add`], [`SparseMatrix::subtract`] and
//!   [`SparseMatrix::multiply`] build fresh results and check dimensions
//! - [`format::text`] parses and serializes the text format
//! - [`format::interop`] converts to and from `sprs` CSR matrices
//!
//! ## Text format
//!
//! ```text
//! rows=2
//! cols=2
//! (0, 0, 5)
//! (1, 1, 3)
//! ```
//!
//! ## Usage
//!
//! ```
//! use sparse_calc::{format, Operation, SparseMatrix};
//!
//! let a: SparseMatrix = format::parse("rows=2\ncols=2\n(0, 0, 5)\n(1, 1, 3)\n")?;
//! let b: SparseMatrix = format::parse("rows=2\ncols=2\n(0, 0, 2)\n(0, 1, 4)\n")?;
//!
//! let c = a.multiply(&b)?;
//! assert_eq!(
//!     format::serialize(&c, Operation::Multiply),
//!     "rows=2\ncols=2\n(0, 0, 10)\n(0, 1, 20)\n"
//! );
//! # Ok::<(), sparse_calc::MatrixError>(())
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod matrix;

use std::path::PathBuf;

use tracing::info;

// Re-export primary components
pub use config::RunConfig;
pub use error::{MatrixError, Result};
pub use matrix::{Element, Operation, SparseMatrix};

/// Runs one calculation described by `config`
///
/// Reads both operands, applies the operation and writes the result to
/// [`RunConfig::output_path`], which is returned. Nothing is written when
/// any step fails.
pub fn run(config: &RunConfig) -> Result<PathBuf> {
    let (left_path, right_path) = config.inputs();
    let left: SparseMatrix<i64> = io::read_matrix(left_path)?;
    let right: SparseMatrix<i64> = io::read_matrix(right_path)?;

    let result = config.operation.apply(&left, &right)?;

    let output = config.output_path();
    io::write_matrix(&output, &result, config.operation)?;
    info!(
        operation = %config.operation,
        rows = result.rows(),
        cols = result.cols(),
        nnz = result.nnz(),
        output = %output.display(),
        "calculation complete"
    );
    Ok(output)
}

/// Version information for the sparse-calc library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
