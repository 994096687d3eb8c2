//! METIS graph files
//!
//! The header counts undirected edges and the body lists every edge from
//! both endpoints, so the stored matrix has twice as many entries as the
//! header declares.

use std::io::{BufRead, Write};

use crate::error::{FormatError, Result};
use crate::matrix::{CsrMatrix, Format, Scalar};
use crate::text::LineReader;

use super::graph;

pub fn load<T: Scalar, R: BufRead>(reader: R) -> Result<CsrMatrix<T>> {
    let dialect = Format::Metis.dialect();
    let mut lines = LineReader::new(reader, dialect.comment);
    let header = graph::read_header(&mut lines)?;
    graph::read_body(&mut lines, &header, dialect)
}

/// METIS graphs are square and list every edge twice
pub fn check<T: Scalar>(matrix: &CsrMatrix<T>) -> Result<()> {
    matrix.validate()?;
    if matrix.n_rows != matrix.n_cols {
        return Err(FormatError::mismatch("columns of a graph", matrix.n_rows, matrix.n_cols));
    }
    if matrix.nnz() % 2 != 0 {
        return Err(FormatError::dialect(format!(
            "a METIS graph stores an even number of entries, found {}",
            matrix.nnz()
        )));
    }
    Ok(())
}

pub fn save<T: Scalar, W: Write>(mut writer: W, matrix: &CsrMatrix<T>) -> Result<()> {
    check(matrix)?;
    graph::write(&mut writer, matrix, matrix.nnz() / 2, |_, _| true)
}
