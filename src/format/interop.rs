//! Utilities for converting between our matrix format and sprs

use sprs::CsMat;

use crate::error::{MatrixError, Result};
use crate::matrix::{Element, SparseMatrix};

/// Converts a matrix to sprs CsMat in CSR format
///
/// Fails with [`MatrixError::IndexOutOfBounds`] if any stored element lies
/// outside the matrix dimensions, since CSR cannot represent it, and with
/// [`MatrixError::TooLarge`] if the `rows + 1` row pointers cannot be
/// allocated.
pub fn to_sprs_csr<T>(matrix: &SparseMatrix<T>) -> Result<CsMat<T>>
where
    T: Element + Default,
{
    let (rows, cols) = matrix.dimensions();
    let too_large = || MatrixError::TooLarge { rows, cols };
    let indptr_len = rows.checked_add(1).ok_or_else(too_large)?;
    let mut indptr: Vec<usize> = Vec::new();
    indptr.try_reserve_exact(indptr_len).map_err(|_| too_large())?;
    let mut indices = Vec::with_capacity(matrix.nnz());
    let mut data = Vec::with_capacity(matrix.nnz());

    indptr.push(0);
    // Row-major iteration already gives CSR ordering
    for (row, col, value) in matrix.iter() {
        if row >= rows || col >= cols {
            return Err(MatrixError::IndexOutOfBounds { row, col, rows, cols });
        }
        while indptr.len() <= row {
            indptr.push(indices.len());
        }
        indices.push(col);
        data.push(value);
    }
    while indptr.len() <= rows {
        indptr.push(indices.len());
    }

    Ok(CsMat::new((rows, cols), indptr, indices, data))
}

/// Converts sprs CsMat (CSR or CSC) to our format
///
/// Explicitly stored zeros are dropped.
pub fn from_sprs<T>(matrix: CsMat<T>) -> SparseMatrix<T>
where
    T: Element + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (rows, cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    let mut result = SparseMatrix::new(rows, cols);
    for row in 0..rows {
        for idx in indptr[row]..indptr[row + 1] {
            result.set_element(row, indices[idx], data[idx]);
        }
    }
    result
}
