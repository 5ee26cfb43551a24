//! Element-wise and matrix-product operations on [`SparseMatrix`]
//!
//! Every operation builds a fresh result and leaves its operands untouched.
//! Element-wise operations walk the union of both key sets exactly once, so
//! a position whose combined value is zero is never stored.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::iter::Peekable;

use tracing::debug;

use crate::error::{MatrixError, Result};
use crate::matrix::sparse::{Element, SparseMatrix};

impl<T: Element> SparseMatrix<T> {
    /// Element-wise sum `self + other`
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] unless both matrices have
    /// the same shape.
    pub fn add(&self, other: &SparseMatrix<T>) -> Result<SparseMatrix<T>> {
        self.check_same_shape(other, "add")?;
        let result = merge_union(self, other, "add", |a, b| a.checked_add(&b))?;
        log_result("add", self, other, &result);
        Ok(result)
    }

    /// Element-wise difference `self - other`
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] unless both matrices have
    /// the same shape.
    pub fn subtract(&self, other: &SparseMatrix<T>) -> Result<SparseMatrix<T>> {
        self.check_same_shape(other, "subtract")?;
        let result = merge_union(self, other, "subtract", |a, b| a.checked_sub(&b))?;
        log_result("subtract", self, other, &result);
        Ok(result)
    }

    /// Matrix product `self × other`
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] unless
    /// `self.cols() == other.rows()`. The result is `self.rows() × other.cols()`.
    ///
    /// For each non-zero `(i, k)` of `self` only row `k` of `other` is
    /// visited, found by a range scan over the ordered key map.
    pub fn multiply(&self, other: &SparseMatrix<T>) -> Result<SparseMatrix<T>> {
        if self.cols() != other.rows() {
            return Err(MatrixError::DimensionMismatch {
                operation: "multiply",
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }

        // Accumulate every product first, zeros are dropped at the end
        let mut accum: BTreeMap<(usize, usize), WrappingSum<T>> = BTreeMap::new();
        for (i, k, a_val) in self.iter() {
            for (j, b_val) in other.row_iter(k) {
                let product = a_val.checked_mul(&b_val).ok_or(MatrixError::Overflow {
                    operation: "multiply",
                    row: i,
                    col: j,
                })?;
                accum.entry((i, j)).or_default().push(product);
            }
        }

        let mut result = SparseMatrix::new(self.rows(), other.cols());
        for ((i, j), sum) in accum {
            let value = sum.finish().ok_or(MatrixError::Overflow {
                operation: "multiply",
                row: i,
                col: j,
            })?;
            result.set_element(i, j, value);
        }

        log_result("multiply", self, other, &result);
        Ok(result)
    }

    fn check_same_shape(&self, other: &SparseMatrix<T>, operation: &'static str) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(MatrixError::DimensionMismatch {
                operation,
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }
        Ok(())
    }
}

/// Running sum that may pass through overflow as long as the total fits
///
/// The value wraps on overflow and `wraps` counts the net number of times it
/// wrapped upward (positive) or downward (negative). The true sum is
/// `value + wraps * 2^bits`, so it is representable exactly when `wraps == 0`.
#[derive(Debug, Clone, Copy)]
struct WrappingSum<T> {
    value: T,
    wraps: i64,
}

impl<T: Element> Default for WrappingSum<T> {
    fn default() -> Self {
        Self {
            value: T::zero(),
            wraps: 0,
        }
    }
}

impl<T: Element> WrappingSum<T> {
    fn push(&mut self, term: T) {
        let next = self.value.wrapping_add(&term);
        if term > T::zero() && next < self.value {
            self.wraps += 1;
        } else if term < T::zero() && next > self.value {
            self.wraps -= 1;
        }
        self.value = next;
    }

    /// The total, or `None` if it does not fit in `T`
    fn finish(self) -> Option<T> {
        (self.wraps == 0).then_some(self.value)
    }
}

/// Combines two matrices over the union of their keys
///
/// Both key maps are sorted, so a single merge pass pairs up matching keys.
/// A key present on one side only is combined with zero.
fn merge_union<T, F>(
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
    operation: &'static str,
    combine: F,
) -> Result<SparseMatrix<T>>
where
    T: Element,
    F: Fn(T, T) -> Option<T>,
{
    let mut result = SparseMatrix::new(a.rows(), a.cols());
    let mut left = a.elements().iter().peekable();
    let mut right = b.elements().iter().peekable();

    while let Some((key, a_val, b_val)) = next_pair(&mut left, &mut right) {
        let (row, col) = key;
        let value = combine(a_val, b_val).ok_or_else(|| MatrixError::Overflow {
            operation,
            row,
            col,
        })?;
        result.set_element(row, col, value);
    }

    Ok(result)
}

type Entries<'a, T> = Peekable<std::collections::btree_map::Iter<'a, (usize, usize), T>>;

/// Pops the next key from either side, pairing values when both sides hold it
fn next_pair<T: Element>(
    left: &mut Entries<'_, T>,
    right: &mut Entries<'_, T>,
) -> Option<((usize, usize), T, T)> {
    let order = match (left.peek(), right.peek()) {
        (None, None) => return None,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some((l, _)), Some((r, _))) => l.cmp(r),
    };

    match order {
        Ordering::Less => left.next().map(|(&k, &v)| (k, v, T::zero())),
        Ordering::Greater => right.next().map(|(&k, &v)| (k, T::zero(), v)),
        Ordering::Equal => {
            let (&k, &a_val) = left.next()?;
            let (_, &b_val) = right.next()?;
            Some((k, a_val, b_val))
        }
    }
}

fn log_result<T: Element>(
    operation: &str,
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
    result: &SparseMatrix<T>,
) {
    debug!(
        operation,
        left_rows = a.rows(),
        left_cols = a.cols(),
        left_nnz = a.nnz(),
        right_rows = b.rows(),
        right_cols = b.cols(),
        right_nnz = b.nnz(),
        result_nnz = result.nnz(),
        "matrix operation complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> SparseMatrix<i64> {
        SparseMatrix::from_triplets(2, 2, vec![(0, 0, 5), (1, 1, 3)])
    }

    fn scenario_b() -> SparseMatrix<i64> {
        SparseMatrix::from_triplets(2, 2, vec![(0, 0, 2), (0, 1, 4)])
    }

    #[test]
    fn test_add() {
        let result = scenario_a().add(&scenario_b()).unwrap();

        assert_eq!(result.dimensions(), (2, 2));
        let entries: Vec<_> = result.iter().collect();
        assert_eq!(entries, vec![(0, 0, 7), (0, 1, 4), (1, 1, 3)]);
    }

    #[test]
    fn test_subtract() {
        let result = scenario_a().subtract(&scenario_b()).unwrap();

        let entries: Vec<_> = result.iter().collect();
        assert_eq!(entries, vec![(0, 0, 3), (0, 1, -4), (1, 1, 3)]);
    }

    #[test]
    fn test_multiply() {
        let result = scenario_a().multiply(&scenario_b()).unwrap();

        assert_eq!(result.dimensions(), (2, 2));
        let entries: Vec<_> = result.iter().collect();
        assert_eq!(entries, vec![(0, 0, 10), (0, 1, 20)]);
    }

    #[test]
    fn test_add_cancellation_is_not_stored() {
        let a = SparseMatrix::<i64>::from_triplets(2, 2, vec![(0, 1, 6), (1, 0, 1)]);
        let b = SparseMatrix::<i64>::from_triplets(2, 2, vec![(0, 1, -6)]);

        let result = a.add(&b).unwrap();
        assert_eq!(result.get_element(0, 1), 0);
        assert_eq!(result.nnz(), 1);
        assert_eq!(result.get_element(1, 0), 1);
    }

    #[test]
    fn test_subtract_cancellation_is_not_stored() {
        let a = SparseMatrix::<i64>::from_triplets(2, 2, vec![(1, 1, 9)]);
        let b = SparseMatrix::<i64>::from_triplets(2, 2, vec![(1, 1, 9), (0, 0, 2)]);

        let result = a.subtract(&b).unwrap();
        assert_eq!(result.get_element(1, 1), 0);
        assert_eq!(result.get_element(0, 0), -2);
        assert_eq!(result.nnz(), 1);
    }

    #[test]
    fn test_multiply_cancellation_is_not_stored() {
        // [1 1] × [ 1]  = [0]
        //         [-1]
        let a = SparseMatrix::<i64>::from_triplets(1, 2, vec![(0, 0, 1), (0, 1, 1)]);
        let b = SparseMatrix::<i64>::from_triplets(2, 1, vec![(0, 0, 1), (1, 0, -1)]);

        let result = a.multiply(&b).unwrap();
        assert_eq!(result.dimensions(), (1, 1));
        assert_eq!(result.nnz(), 0);
    }

    #[test]
    fn test_add_dimension_mismatch() {
        let a = SparseMatrix::<i64>::new(2, 3);
        let b = SparseMatrix::<i64>::new(3, 2);

        let err = a.add(&b).unwrap_err();
        assert!(matches!(
            err,
            MatrixError::DimensionMismatch {
                operation: "add",
                left: (2, 3),
                right: (3, 2),
            }
        ));
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = SparseMatrix::<i64>::new(2, 3);
        let b = SparseMatrix::<i64>::new(4, 5);

        assert!(matches!(
            a.multiply(&b),
            Err(MatrixError::DimensionMismatch { operation: "multiply", .. })
        ));
    }

    #[test]
    fn test_multiply_rectangular() {
        // 2×3 × 3×1
        let a = SparseMatrix::<i64>::from_triplets(2, 3, vec![(0, 0, 1), (0, 2, 2), (1, 1, 3)]);
        let b = SparseMatrix::<i64>::from_triplets(3, 1, vec![(0, 0, 4), (1, 0, 5), (2, 0, 6)]);

        let result = a.multiply(&b).unwrap();
        assert_eq!(result.dimensions(), (2, 1));
        assert_eq!(result.get_element(0, 0), 16);
        assert_eq!(result.get_element(1, 0), 15);
    }

    #[test]
    fn test_operands_unchanged() {
        let a = scenario_a();
        let b = scenario_b();
        let _ = a.add(&b).unwrap();
        let _ = a.multiply(&b).unwrap();

        assert_eq!(a, scenario_a());
        assert_eq!(b, scenario_b());
    }

    #[test]
    fn test_multiply_intermediate_overflow_recovers() {
        // [100 100 -100] × [1 1 1]^T = 100, although 100 + 100 overflows i8
        let a = SparseMatrix::<i8>::from_triplets(
            1,
            3,
            vec![(0, 0, 100), (0, 1, 100), (0, 2, -100)],
        );
        let b = SparseMatrix::<i8>::from_triplets(3, 1, vec![(0, 0, 1), (1, 0, 1), (2, 0, 1)]);

        let result = a.multiply(&b).unwrap();
        assert_eq!(result.get_element(0, 0), 100);

        // Downward excursion: -100 - 100 + 100
        let a = SparseMatrix::<i8>::from_triplets(
            1,
            3,
            vec![(0, 0, -100), (0, 1, -100), (0, 2, 100)],
        );
        assert_eq!(a.multiply(&b).unwrap().get_element(0, 0), -100);
    }

    #[test]
    fn test_multiply_total_overflow_is_reported() {
        // 100 + 100 + 100 does not fit in i8 however it is ordered
        let a = SparseMatrix::<i8>::from_triplets(
            1,
            3,
            vec![(0, 0, 100), (0, 1, 100), (0, 2, 100)],
        );
        let b = SparseMatrix::<i8>::from_triplets(3, 1, vec![(0, 0, 1), (1, 0, 1), (2, 0, 1)]);

        assert!(matches!(
            a.multiply(&b),
            Err(MatrixError::Overflow { operation: "multiply", row: 0, col: 0 })
        ));
    }

    #[test]
    fn test_wrapping_sum_tracks_net_wraps() {
        let mut sum = WrappingSum::<i8>::default();
        for term in [127, 127, 127, -127, -127, -127, 5] {
            sum.push(term);
        }
        assert_eq!(sum.finish(), Some(5));

        let mut sum = WrappingSum::<i8>::default();
        sum.push(-128);
        sum.push(-1);
        assert_eq!(sum.finish(), None);
    }

    #[test]
    fn test_overflow_is_reported() {
        let a = SparseMatrix::<i8>::from_triplets(1, 1, vec![(0, 0, 100)]);
        let b = SparseMatrix::<i8>::from_triplets(1, 1, vec![(0, 0, 100)]);

        assert!(matches!(
            a.add(&b),
            Err(MatrixError::Overflow { operation: "add", row: 0, col: 0 })
        ));
        assert!(matches!(
            a.multiply(&b),
            Err(MatrixError::Overflow { operation: "multiply", .. })
        ));

        let c = SparseMatrix::<i8>::from_triplets(1, 1, vec![(0, 0, i8::MIN)]);
        assert!(a.subtract(&c).is_err());
    }
}
