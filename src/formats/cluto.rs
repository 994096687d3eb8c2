//! CLUTO sparse matrix files
//!
//! Header `rows cols nnz`, then exactly one line per row holding
//! `col value` pairs. An empty line is a row without entries.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::builder::RowAssembler;
use crate::error::{FormatError, Result};
use crate::matrix::{CsrMatrix, Format, Scalar};
use crate::text::{parse_count, parse_index, parse_value, tokens, LineReader};

pub fn load<T: Scalar, R: BufRead>(reader: R) -> Result<CsrMatrix<T>> {
    let mut lines = LineReader::new(reader, Format::Cluto.dialect().comment);

    let Some((number, line)) = lines.next_data_line()? else {
        return Err(FormatError::header(lines.line_number(), "missing `rows cols nnz` header"));
    };
    let toks = tokens(line);
    if toks.len() != 3 {
        return Err(FormatError::header(
            number,
            format!("expected `rows cols nnz`, found {} fields", toks.len()),
        ));
    }
    let n_rows = parse_count(toks[0], number, "row count")?;
    let n_cols = parse_count(toks[1], number, "column count")?;
    let nnz = parse_count(toks[2], number, "nnz")?;
    debug!(n_rows, n_cols, nnz, "read CLUTO header");

    let mut rows = RowAssembler::new(n_rows, n_cols, nnz, true, number)?;
    for i in 0..n_rows {
        let Some((number, line)) = lines.next_line()? else {
            return Err(FormatError::mismatch("rows", n_rows, i));
        };
        let toks = tokens(line);
        if toks.len() % 2 != 0 {
            return Err(FormatError::field_count(number, "an even number of", toks.len()));
        }
        for pair in toks.chunks(2) {
            let col = parse_index(pair[0], number, "column", n_cols)?;
            let value = parse_value(pair[1], number)?;
            rows.push(col, Some(value), number)?;
        }
        rows.end_row()?;
    }
    lines.expect_end()?;

    let (row_ptr, col_idx, values) = rows.finish()?;
    CsrMatrix::try_new(n_rows, n_cols, row_ptr, col_idx, values)
}

pub fn check<T: Scalar>(matrix: &CsrMatrix<T>) -> Result<()> {
    matrix.validate()
}

/// Writes every row as `col value` pairs; pattern entries are written as 1
pub fn save<T: Scalar, W: Write>(mut writer: W, matrix: &CsrMatrix<T>) -> Result<()> {
    check(matrix)?;
    writeln!(writer, "{} {} {}", matrix.n_rows, matrix.n_cols, matrix.nnz())?;
    for i in 0..matrix.n_rows {
        let mut sep = "";
        for (col, value) in matrix.row_iter(i) {
            let value = value.copied().unwrap_or_else(T::one);
            write!(writer, "{}{} {}", sep, col + 1, value)?;
            sep = " ";
        }
        writeln!(writer)?;
    }
    Ok(())
}
