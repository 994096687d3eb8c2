//! Matrix Market coordinate files
//!
//! Only the `coordinate` layout is read, with `real`, `integer` or `pattern`
//! fields and `general` or `symmetric` symmetry. Symmetric files list the
//! lower triangle; both directions are stored in memory.

use std::io::{BufRead, Seek, Write};

use tracing::debug;

use crate::builder::{BuildPlan, Edge, EdgeParser};
use crate::config::IoConfig;
use crate::error::{FormatError, Result};
use crate::matrix::{CsrMatrix, DialectFlags, Format, Header, Scalar};
use crate::text::{parse_count, parse_index, parse_value, tokens, LineReader};

const BANNER: &str = "%%MatrixMarket";

/// Parses one `row col [value]` line
struct EntryParser {
    n_rows: usize,
    n_cols: usize,
    weighted: bool,
}

impl<T: Scalar> EdgeParser<T> for EntryParser {
    fn parse(&mut self, line: &str, number: usize) -> Result<Edge<T>> {
        let toks = tokens(line);
        let expected = if self.weighted { 3 } else { 2 };
        if toks.len() != expected {
            return Err(FormatError::field_count(number, expected.to_string(), toks.len()));
        }

        let row = parse_index(toks[0], number, "row", self.n_rows)?;
        let col = parse_index(toks[1], number, "column", self.n_cols)?;
        let weight = if self.weighted {
            Some(parse_value(toks[2], number)?)
        } else {
            None
        };
        Ok(Edge::new(row, col, weight, number))
    }
}

/// Reads the banner and size line
fn read_header<R: BufRead>(lines: &mut LineReader<R>) -> Result<Header> {
    let Some((number, banner)) = lines.next_raw()? else {
        return Err(FormatError::header(1, "missing %%MatrixMarket banner"));
    };
    let toks = tokens(banner);
    if toks.len() != 5 || toks[0] != BANNER || !toks[1].eq_ignore_ascii_case("matrix") {
        return Err(FormatError::header(number, format!("`{}` is not a matrix banner", banner)));
    }
    if !toks[2].eq_ignore_ascii_case("coordinate") {
        return Err(FormatError::dialect(format!("unsupported layout `{}`", toks[2])));
    }
    let flags = match toks[3].to_ascii_lowercase().as_str() {
        "real" | "integer" => DialectFlags::EDGE_WEIGHTS,
        "pattern" => DialectFlags::NONE,
        other => return Err(FormatError::dialect(format!("unsupported field `{}`", other))),
    };
    let symmetric = match toks[4].to_ascii_lowercase().as_str() {
        "general" => false,
        "symmetric" => true,
        other => return Err(FormatError::dialect(format!("unsupported symmetry `{}`", other))),
    };

    let Some((number, size)) = lines.next_data_line()? else {
        return Err(FormatError::header(lines.line_number(), "missing size line"));
    };
    let toks = tokens(size);
    if toks.len() != 3 {
        return Err(FormatError::header(
            number,
            format!("size line needs `rows cols entries`, found {} fields", toks.len()),
        ));
    }
    let n_rows = parse_count(toks[0], number, "row count")?;
    let n_cols = parse_count(toks[1], number, "column count")?;
    let entries = parse_count(toks[2], number, "entry count")?;
    if symmetric && n_rows != n_cols {
        return Err(FormatError::mismatch("columns of a symmetric matrix", n_rows, n_cols));
    }

    debug!(n_rows, n_cols, entries, symmetric, ?flags, "read Matrix Market header");
    let mut header = Header::declared(n_rows, n_cols, entries, flags);
    header.symmetric = symmetric;
    header.line = number;
    Ok(header)
}

fn prepare<R: BufRead>(reader: R) -> Result<(LineReader<R>, EntryParser, BuildPlan)> {
    let dialect = Format::MatrixMarket.dialect();
    let mut lines = LineReader::new(reader, dialect.comment);
    let header = read_header(&mut lines)?;
    let plan = BuildPlan::new(&header, dialect, 0)?;
    let parser = EntryParser {
        n_rows: header.n_rows.unwrap_or(0),
        n_cols: header.n_cols.unwrap_or(0),
        weighted: plan.weighted,
    };
    Ok((lines, parser, plan))
}

/// Loads a Matrix Market file, buffering the body for the second pass
pub fn load<T: Scalar, R: BufRead>(reader: R) -> Result<CsrMatrix<T>> {
    let (lines, parser, plan) = prepare(reader)?;
    super::assemble_buffered(lines, parser, &plan)
}

/// Loads a Matrix Market file, rewinding the source for the second pass
pub fn load_seekable<T: Scalar, R: BufRead + Seek>(reader: R) -> Result<CsrMatrix<T>> {
    load_with(reader, &IoConfig::default())
}

pub fn load_with<T: Scalar, R: BufRead + Seek>(reader: R, config: &IoConfig) -> Result<CsrMatrix<T>> {
    let (lines, parser, plan) = prepare(reader)?;
    super::assemble_seekable(lines, parser, &plan, config.pass_strategy)
}

/// A matrix flagged symmetric is written as its lower triangle, which only
/// loses nothing if the stored pattern really is symmetric.
pub fn check<T: Scalar>(matrix: &CsrMatrix<T>) -> Result<()> {
    matrix.validate()?;
    if matrix.symmetric && !matrix.is_structurally_symmetric() {
        return Err(FormatError::NotSymmetric(
            "matrix is flagged symmetric but its pattern is not".to_string(),
        ));
    }
    Ok(())
}

pub fn save<T: Scalar, W: Write>(mut writer: W, matrix: &CsrMatrix<T>) -> Result<()> {
    check(matrix)?;

    let field = if matrix.is_pattern() { "pattern" } else { "real" };
    let symmetry = if matrix.symmetric { "symmetric" } else { "general" };
    let keep = |row: usize, col: usize| !matrix.symmetric || row >= col;
    let entries = matrix.entries().filter(|&(r, c, _)| keep(r, c)).count();

    writeln!(writer, "{} matrix coordinate {} {}", BANNER, field, symmetry)?;
    writeln!(writer, "{} {} {}", matrix.n_rows, matrix.n_cols, entries)?;
    for (row, col, value) in matrix.entries().filter(|&(r, c, _)| keep(r, c)) {
        match value {
            Some(v) => writeln!(writer, "{} {} {}", row + 1, col + 1, v)?,
            None => writeln!(writer, "{} {}", row + 1, col + 1)?,
        }
    }
    Ok(())
}
