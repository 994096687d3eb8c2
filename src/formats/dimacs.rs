//! DIMACS graph files
//!
//! `c` lines are comments. The problem line `p sp <nodes> <arcs>` introduces
//! weighted arcs `a <u> <v> <w>`; `p edge <nodes> <edges>` introduces
//! unweighted edges `e <u> <v>`. Every line is one stored entry.

use std::io::{BufRead, Seek, Write};

use tracing::debug;

use crate::builder::{BuildPlan, Edge, EdgeParser};
use crate::config::IoConfig;
use crate::error::{FormatError, Result};
use crate::matrix::{CsrMatrix, DialectFlags, Format, Header, Scalar};
use crate::text::{parse_count, parse_index, parse_value, tokens, LineReader};

struct ArcParser {
    n: usize,
    weighted: bool,
}

impl<T: Scalar> EdgeParser<T> for ArcParser {
    fn parse(&mut self, line: &str, number: usize) -> Result<Edge<T>> {
        let toks = tokens(line);
        let (tag, expected) = if self.weighted { ("a", 4) } else { ("e", 3) };
        if toks[0] != tag {
            return Err(FormatError::entry(number, toks[0]));
        }
        if toks.len() != expected {
            return Err(FormatError::field_count(number, expected.to_string(), toks.len()));
        }

        let row = parse_index(toks[1], number, "row", self.n)?;
        let col = parse_index(toks[2], number, "column", self.n)?;
        let weight = if self.weighted {
            Some(parse_value(toks[3], number)?)
        } else {
            None
        };
        Ok(Edge::new(row, col, weight, number))
    }
}

fn prepare<R: BufRead>(reader: R) -> Result<(LineReader<R>, ArcParser, BuildPlan)> {
    let dialect = Format::Dimacs.dialect();
    let mut lines = LineReader::new(reader, dialect.comment);

    let Some((number, line)) = lines.next_data_line()? else {
        return Err(FormatError::header(lines.line_number(), "missing problem line"));
    };
    let toks = tokens(line);
    if toks.len() != 4 || toks[0] != "p" {
        return Err(FormatError::header(number, "expected `p <kind> <nodes> <arcs>`"));
    }
    let flags = match toks[1] {
        "sp" => DialectFlags::EDGE_WEIGHTS,
        "edge" => DialectFlags::NONE,
        other => return Err(FormatError::dialect(format!("unsupported problem kind `{}`", other))),
    };
    let n = parse_count(toks[2], number, "node count")?;
    let arcs = parse_count(toks[3], number, "arc count")?;
    debug!(n, arcs, kind = toks[1], "read DIMACS problem line");

    let mut header = Header::declared(n, n, arcs, flags);
    header.line = number;
    let plan = BuildPlan::new(&header, dialect, 0)?;
    let parser = ArcParser {
        n,
        weighted: plan.weighted,
    };
    Ok((lines, parser, plan))
}

/// Loads a DIMACS file, buffering the body for the second pass
pub fn load<T: Scalar, R: BufRead>(reader: R) -> Result<CsrMatrix<T>> {
    let (lines, parser, plan) = prepare(reader)?;
    super::assemble_buffered(lines, parser, &plan)
}

/// Loads a DIMACS file, rewinding the source for the second pass
pub fn load_seekable<T: Scalar, R: BufRead + Seek>(reader: R) -> Result<CsrMatrix<T>> {
    load_with(reader, &IoConfig::default())
}

pub fn load_with<T: Scalar, R: BufRead + Seek>(reader: R, config: &IoConfig) -> Result<CsrMatrix<T>> {
    let (lines, parser, plan) = prepare(reader)?;
    super::assemble_seekable(lines, parser, &plan, config.pass_strategy)
}

pub fn check<T: Scalar>(matrix: &CsrMatrix<T>) -> Result<()> {
    matrix.validate()?;
    if matrix.n_rows != matrix.n_cols {
        return Err(FormatError::mismatch("columns of a graph", matrix.n_rows, matrix.n_cols));
    }
    Ok(())
}

/// Writes `p sp` with weighted arcs, or `p edge` for pattern matrices
pub fn save<T: Scalar, W: Write>(mut writer: W, matrix: &CsrMatrix<T>) -> Result<()> {
    check(matrix)?;
    let kind = if matrix.is_pattern() { "edge" } else { "sp" };
    writeln!(writer, "p {} {} {}", kind, matrix.n_rows, matrix.nnz())?;
    for (row, col, value) in matrix.entries() {
        match value {
            Some(v) => writeln!(writer, "a {} {} {}", row + 1, col + 1, v)?,
            None => writeln!(writer, "e {} {}", row + 1, col + 1)?,
        }
    }
    Ok(())
}
