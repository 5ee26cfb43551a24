// Matrix data structure and operations

pub mod operation;
pub mod ops;
pub mod sparse;

pub use operation::Operation;
pub use sparse::{Element, SparseMatrix};
