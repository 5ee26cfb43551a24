//! Plain-text coordinate format
//!
//! ```text
//! rows=<N>
//! cols=<M>
//! (<row>, <col>, <value>)
//! ...
//! ```
//!
//! The two header lines are mandatory. Element lines may be separated by
//! blank lines; whitespace around each element field is ignored. Header
//! lines take their count directly after the `=`.

use std::fmt::Write as _;

use tracing::trace;

use crate::error::{MatrixError, Result};
use crate::matrix::{Element, Operation, SparseMatrix};

const ROWS_PREFIX: &str = "rows=";
const COLS_PREFIX: &str = "cols=";

/// Parses a matrix from its text representation
///
/// Errors carry the 1-based line number of the offending line.
pub fn parse<T: Element>(text: &str) -> Result<SparseMatrix<T>> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line.trim()));

    let rows = parse_header(lines.next(), 1, ROWS_PREFIX)?;
    let cols = parse_header(lines.next(), 2, COLS_PREFIX)?;

    let mut matrix = SparseMatrix::new(rows, cols);
    for (line_no, line) in lines {
        if line.is_empty() {
            continue;
        }
        let (row, col, value) = parse_element(line_no, line)?;
        matrix.set_element(row, col, value);
    }

    trace!(rows, cols, nnz = matrix.nnz(), "parsed matrix");
    Ok(matrix)
}

/// Serializes a matrix to its text representation
///
/// One element line is written per stored element, in row-major order.
/// `operation` names the computation that produced the matrix and is only
/// used for tracing.
pub fn serialize<T: Element>(matrix: &SparseMatrix<T>, operation: Operation) -> String {
    let mut out = String::new();
    // Writing to a String never fails
    let _ = writeln!(out, "{}{}", ROWS_PREFIX, matrix.rows());
    let _ = writeln!(out, "{}{}", COLS_PREFIX, matrix.cols());
    for (row, col, value) in matrix.iter() {
        let _ = writeln!(out, "({}, {}, {})", row, col, value);
    }

    trace!(%operation, nnz = matrix.nnz(), bytes = out.len(), "serialized matrix");
    out
}

fn parse_header(line: Option<(usize, &str)>, line_no: usize, prefix: &str) -> Result<usize> {
    let (line_no, line) = line.ok_or_else(|| {
        MatrixError::format(line_no, format!("missing '{}' header", prefix))
    })?;

    let value = line.strip_prefix(prefix).ok_or_else(|| {
        MatrixError::format(
            line_no,
            format!("expected '{}<count>', found {:?}", prefix, line),
        )
    })?;
    if value.starts_with(char::is_whitespace) {
        return Err(MatrixError::format(
            line_no,
            format!("unexpected whitespace after '{}'", prefix),
        ));
    }

    parse_index(line_no, value)
}

fn parse_element<T: Element>(line_no: usize, line: &str) -> Result<(usize, usize, T)> {
    let inner = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| {
            MatrixError::format(
                line_no,
                format!("expected '(<row>, <col>, <value>)', found {:?}", line),
            )
        })?;

    let fields: Vec<&str> = inner.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(MatrixError::format(
            line_no,
            format!("expected 3 comma-separated fields, found {}", fields.len()),
        ));
    }

    let row = parse_index(line_no, fields[0])?;
    let col = parse_index(line_no, fields[1])?;
    let value = T::from_str_radix(fields[2], 10)
        .map_err(|_| MatrixError::not_a_number(line_no, fields[2]))?;

    Ok((row, col, value))
}

fn parse_index(line_no: usize, field: &str) -> Result<usize> {
    field
        .parse::<usize>()
        .map_err(|_| MatrixError::not_a_number(line_no, field))
}
