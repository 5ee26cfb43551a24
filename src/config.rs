//! Run configuration for the calculator

use std::path::{Path, PathBuf};

use crate::matrix::Operation;

/// Everything needed to perform one calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Operation to perform
    pub operation: Operation,

    /// Path of the left operand
    pub left: PathBuf,

    /// Path of the right operand
    pub right: PathBuf,

    /// Directory the result file is written to
    pub output_dir: PathBuf,
}

impl RunConfig {
    /// Creates a configuration writing to the current directory
    pub fn new(operation: Operation, left: impl Into<PathBuf>, right: impl Into<PathBuf>) -> Self {
        Self {
            operation,
            left: left.into(),
            right: right.into(),
            output_dir: PathBuf::from("."),
        }
    }

    /// Replaces the output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Full path of the result file, `<output_dir>/matrix_<operation>_result.txt`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.operation.result_file_name())
    }

    /// The two operand paths
    pub fn inputs(&self) -> (&Path, &Path) {
        (self.left.as_path(), self.right.as_path())
    }
}
