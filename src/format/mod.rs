//! Matrix serialization formats

pub mod interop;
pub mod text;

pub use interop::{from_sprs, to_sprs_csr};
pub use text::{parse, serialize};
