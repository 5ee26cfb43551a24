//! Coordinate-keyed sparse matrix implementation

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

use num_traits::{PrimInt, Signed, WrappingAdd};

/// Element types a [`SparseMatrix`] can hold: signed primitive integers
pub trait Element: PrimInt + Signed + WrappingAdd + fmt::Debug + fmt::Display {}

impl<T> Element for T where T: PrimInt + Signed + WrappingAdd + fmt::Debug + fmt::Display {}

/// A sparse matrix storing only its non-zero elements
///
/// Elements are kept in a map keyed by `(row, col)`. The key order is
/// row-major, so iteration visits rows in ascending order and, within a
/// row, columns in ascending order.
///
/// No stored value is ever zero: [`SparseMatrix::set_element`] drops the
/// entry instead. Indices are not checked against the dimensions; see
/// [`SparseMatrix::is_within_bounds`].
#[derive(Clone, PartialEq, Eq)]
pub struct SparseMatrix<T = i64> {
    rows: usize,
    cols: usize,
    elements: BTreeMap<(usize, usize), T>,
}

impl<T: Element> SparseMatrix<T> {
    /// Creates an empty `rows × cols` matrix
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            elements: BTreeMap::new(),
        }
    }

    /// Creates a matrix from `(row, col, value)` triplets
    ///
    /// Triplets are applied in order through [`SparseMatrix::set_element`],
    /// so later duplicates win and zero values clear earlier entries.
    pub fn from_triplets<I>(rows: usize, cols: usize, triplets: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut matrix = Self::new(rows, cols);
        for (row, col, value) in triplets {
            matrix.set_element(row, col, value);
        }
        matrix
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self::from_triplets(n, n, (0..n).map(|i| (i, i, T::one())))
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Matrix dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.elements.len()
    }

    /// Stores `value` at `(row, col)`, or removes the entry when `value` is zero
    pub fn set_element(&mut self, row: usize, col: usize, value: T) {
        if value.is_zero() {
            self.elements.remove(&(row, col));
        } else {
            self.elements.insert((row, col), value);
        }
    }

    /// Returns the value at `(row, col)`, zero when nothing is stored there
    pub fn get_element(&self, row: usize, col: usize) -> T {
        self.elements
            .get(&(row, col))
            .copied()
            .unwrap_or_else(T::zero)
    }

    /// Iterates over the non-zero elements as `(row, col, value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.elements
            .iter()
            .map(|(&(row, col), &value)| (row, col, value))
    }

    /// Returns an iterator over the non-zero elements in row `row`
    ///
    /// Each item is a tuple `(col, value)`. Rows past the dimensions are
    /// allowed and yield whatever was stored there.
    pub fn row_iter(&self, row: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        self.elements
            .range((Bound::Included((row, 0)), Bound::Included((row, usize::MAX))))
            .map(|(&(_, col), &value)| (col, value))
    }

    /// Checks that every stored key lies inside the matrix dimensions
    pub fn is_within_bounds(&self) -> bool {
        self.elements
            .keys()
            .all(|&(row, col)| row < self.rows && col < self.cols)
    }

    pub(crate) fn elements(&self) -> &BTreeMap<(usize, usize), T> {
        &self.elements
    }
}

impl<T: Element> fmt::Debug for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseMatrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("elements", &self.elements)
            .finish()
    }
}

impl<T: Element> fmt::Display for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.rows, self.cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        // Print a sample of the matrix content
        let mut rows_with_entries = self.elements.keys().map(|&(row, _)| row).peekable();
        let mut printed_rows = 0;
        let max_rows_to_print = 5;
        let max_elements = 5;

        while let Some(row) = rows_with_entries.next() {
            while rows_with_entries.peek() == Some(&row) {
                rows_with_entries.next();
            }

            if printed_rows == max_rows_to_print {
                writeln!(f, "  ...")?;
                break;
            }
            if printed_rows == 0 {
                writeln!(f, "  content sample:")?;
            }

            write!(f, "    row {}: ", row)?;
            let total = self.row_iter(row).count();
            for (col, value) in self.row_iter(row).take(max_elements) {
                write!(f, "({}, {}) ", col, value)?;
            }
            if total > max_elements {
                write!(f, "... ({} more)", total - max_elements)?;
            }
            writeln!(f)?;
            printed_rows += 1;
        }

        write!(f, "}}")
    }
}
