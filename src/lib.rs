//! # csr-io: sparse matrices and graphs in text interchange formats
//!
//! Loads and saves Compressed Sparse Row (CSR) matrices in the CLUTO, METIS,
//! Matrix Market, SNAP, ugraph and DIMACS text formats.
//!
//! ## Overview
//!
//! Every format shares one construction engine:
//!
//! 1. **Bucket counting**: a first pass over the entries builds a per-row
//!    histogram. Formats without declared dimensions grow the histogram as
//!    larger indices appear.
//! 2. **Two-pass placement**: the histogram is prefix-summed into row offsets
//!    and a write cursor, and a second pass (rewinding the source, or
//!    replaying a buffered copy) writes every entry at its row's cursor.
//! 3. **Symmetric expansion**: formats that store one triangle get the other
//!    one materialized, either inline during placement or by a dedicated
//!    mirroring pass.
//!
//! Row-ordered formats (CLUTO, METIS, ugraph adjacency) build their rows
//! directly while reading.
//!
//! ## Usage
//!
//! ```
//! use std::io::Cursor;
//! use csr_io::{load, save, CsrMatrix, Format};
//!
//! let input = "%%MatrixMarket matrix coordinate pattern symmetric\n3 3 2\n2 1\n3 2\n";
//! let m: CsrMatrix<f64> = load(Format::MatrixMarket, Cursor::new(input)).unwrap();
//! assert_eq!(m.nnz(), 4);
//!
//! let mut out = Vec::new();
//! save(Format::Metis, &mut out, &m).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "3 2\n2\n1 3\n2\n");
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod formats;
pub mod matrix;
pub mod text;
pub mod utils;

// Re-export primary components
pub use config::{IoConfig, PassStrategy};
pub use error::{ErrorKind, FormatError, Result};
pub use formats::{check, load, load_path, load_path_with, load_seekable, save, save_path};
pub use matrix::{CsrMatrix, DialectFlags, Format, Scalar};
pub use utils::{from_sprs_csr, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
