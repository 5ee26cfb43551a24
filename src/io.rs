//! Whole-file reading and writing of matrices in the text format

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{MatrixError, Result};
use crate::format::text;
use crate::matrix::{Element, Operation, SparseMatrix};

/// Read a matrix from a text-format file
pub fn read_matrix<T: Element, P: AsRef<Path>>(path: P) -> Result<SparseMatrix<T>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| MatrixError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let matrix = text::parse(&contents)?;
    debug!(
        path = %path.display(),
        rows = matrix.rows(),
        cols = matrix.cols(),
        nnz = matrix.nnz(),
        "read matrix"
    );
    Ok(matrix)
}

/// Write a matrix to a text-format file, replacing any existing file
pub fn write_matrix<T: Element, P: AsRef<Path>>(
    path: P,
    matrix: &SparseMatrix<T>,
    operation: Operation,
) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, text::serialize(matrix, operation)).map_err(|source| MatrixError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), nnz = matrix.nnz(), "wrote matrix");
    Ok(())
}
