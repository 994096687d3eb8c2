//! Undirected graphs
//!
//! Two layouts are supported:
//!
//! - **Adjacency** (`Format::Ugraph`): a METIS-style header followed by one
//!   line per vertex listing only neighbours with a larger index. The lower
//!   triangle is rebuilt by a mirroring pass after the body is read.
//! - **Edge list** (`Format::UgraphEdges`): one `u v [weight]` line per
//!   undirected edge, `#` comments, sized by the largest endpoint. Each edge
//!   is stored in both directions while it is read.
//!
//! Both savers refuse matrices that are not symmetric.

use std::io::{BufRead, Seek, Write};

use crate::builder::BuildPlan;
use crate::config::IoConfig;
use crate::error::{FormatError, Result};
use crate::matrix::{CsrMatrix, DialectFlags, Format, Header, Scalar};
use crate::text::LineReader;

use super::graph;
use super::snap::EdgeListParser;

/// Loads an adjacency-layout ugraph file
pub fn load<T: Scalar, R: BufRead>(reader: R) -> Result<CsrMatrix<T>> {
    let dialect = Format::Ugraph.dialect();
    let mut lines = LineReader::new(reader, dialect.comment);
    let header = graph::read_header(&mut lines)?;
    graph::read_body(&mut lines, &header, dialect)
}

fn require_symmetric<T: Scalar>(matrix: &CsrMatrix<T>) -> Result<()> {
    matrix.validate()?;
    if !matrix.symmetric {
        return Err(FormatError::NotSymmetric(
            "undirected graphs can only be written from symmetric matrices".to_string(),
        ));
    }
    if !matrix.is_structurally_symmetric() {
        return Err(FormatError::NotSymmetric(
            "matrix is flagged symmetric but its pattern is not".to_string(),
        ));
    }
    Ok(())
}

/// The adjacency layout cannot express self-loops
pub fn check<T: Scalar>(matrix: &CsrMatrix<T>) -> Result<()> {
    require_symmetric(matrix)?;
    if let Some((row, _, _)) = matrix.entries().find(|&(r, c, _)| r == c) {
        return Err(FormatError::dialect(format!(
            "vertex {} has a self-loop, which the ugraph adjacency layout cannot store",
            row + 1
        )));
    }
    Ok(())
}

/// Writes the upper triangle as adjacency lists
pub fn save<T: Scalar, W: Write>(mut writer: W, matrix: &CsrMatrix<T>) -> Result<()> {
    check(matrix)?;
    graph::write(&mut writer, matrix, matrix.nnz() / 2, |row, col| col > row)
}

fn edges_plan(config: &IoConfig) -> Result<BuildPlan> {
    let header = Header::discovered(DialectFlags::NONE, true);
    BuildPlan::new(&header, Format::UgraphEdges.dialect(), config.initial_row_capacity)
}

/// Loads an undirected edge list, buffering the body for the second pass
pub fn load_edges<T: Scalar, R: BufRead>(reader: R) -> Result<CsrMatrix<T>> {
    let lines = LineReader::new(reader, Format::UgraphEdges.dialect().comment);
    super::assemble_buffered(lines, EdgeListParser::new(), &edges_plan(&IoConfig::default())?)
}

/// Loads an undirected edge list, rewinding the source for the second pass
pub fn load_edges_seekable<T: Scalar, R: BufRead + Seek>(reader: R) -> Result<CsrMatrix<T>> {
    load_edges_with(reader, &IoConfig::default())
}

pub fn load_edges_with<T: Scalar, R: BufRead + Seek>(reader: R, config: &IoConfig) -> Result<CsrMatrix<T>> {
    let lines = LineReader::new(reader, Format::UgraphEdges.dialect().comment);
    super::assemble_seekable(lines, EdgeListParser::new(), &edges_plan(config)?, config.pass_strategy)
}

pub fn check_edges<T: Scalar>(matrix: &CsrMatrix<T>) -> Result<()> {
    require_symmetric(matrix)
}

/// Writes each undirected edge once, from its lower-index endpoint
pub fn save_edges<T: Scalar, W: Write>(mut writer: W, matrix: &CsrMatrix<T>) -> Result<()> {
    check_edges(matrix)?;
    for (row, col, value) in matrix.entries().filter(|&(r, c, _)| r <= c) {
        match value {
            Some(v) => writeln!(writer, "{} {} {}", row + 1, col + 1, v)?,
            None => writeln!(writer, "{} {}", row + 1, col + 1)?,
        }
    }
    Ok(())
}
