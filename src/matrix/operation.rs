//! The binary operations the calculator can dispatch

use std::fmt;
use std::str::FromStr;

use crate::error::{MatrixError, Result};
use crate::matrix::sparse::{Element, SparseMatrix};

/// A binary matrix operation selected by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Element-wise sum
    Add,
    /// Element-wise difference
    Subtract,
    /// Matrix product
    Multiply,
}

impl Operation {
    /// All supported operations
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Subtract, Operation::Multiply];

    /// The lowercase name used on the command line and in file names
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
        }
    }

    /// Applies the operation to `a` and `b`
    pub fn apply<T: Element>(
        &self,
        a: &SparseMatrix<T>,
        b: &SparseMatrix<T>,
    ) -> Result<SparseMatrix<T>> {
        match self {
            Operation::Add => a.add(b),
            Operation::Subtract => a.subtract(b),
            Operation::Multiply => a.multiply(b),
        }
    }

    /// File name the result of this operation is written to
    pub fn result_file_name(&self) -> String {
        format!("matrix_{}_result.txt", self.name())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| MatrixError::UnknownOperation(s.to_string()))
    }
}
