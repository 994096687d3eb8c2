// Matrix data structures and format dialects

pub mod csr;
pub mod dialect;

pub use csr::{CsrMatrix, Scalar};
pub use dialect::{Dialect, DialectFlags, Format, Header, NnzConvention, Sizing, SymmetryMode, Triangle};
