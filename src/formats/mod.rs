//! Readers and writers for the supported text formats
//!
//! Every format module exposes `load` for any `BufRead` source and `save`
//! for any `Write` sink. Formats whose body is read twice also expose
//! `load_seekable` and `load_with`, which rewind the source instead of
//! buffering the parsed entries.
//!
//! The functions here dispatch on [`Format`] and add path-based entry points.

pub mod cluto;
pub mod dimacs;
mod graph;
pub mod metis;
pub mod mm;
pub mod snap;
pub mod ugraph;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::builder::{assemble, BuildPlan, Buffered, EdgeParser, Rewinding};
use crate::config::{IoConfig, PassStrategy};
use crate::error::Result;
use crate::matrix::{CsrMatrix, Format, Scalar};
use crate::text::LineReader;

/// Loads a matrix in `format` from any buffered reader
///
/// Two-pass formats keep their parsed body in memory for the second pass.
pub fn load<T: Scalar, R: BufRead>(format: Format, reader: R) -> Result<CsrMatrix<T>> {
    match format {
        Format::Cluto => cluto::load(reader),
        Format::Dimacs => dimacs::load(reader),
        Format::Metis => metis::load(reader),
        Format::MatrixMarket => mm::load(reader),
        Format::Snap => snap::load(reader),
        Format::Ugraph => ugraph::load(reader),
        Format::UgraphEdges => ugraph::load_edges(reader),
    }
}

/// Loads a matrix in `format` from a seekable reader
pub fn load_seekable<T, R>(format: Format, reader: R, config: &IoConfig) -> Result<CsrMatrix<T>>
where
    T: Scalar,
    R: BufRead + Seek,
{
    match format {
        Format::Cluto => cluto::load(reader),
        Format::Dimacs => dimacs::load_with(reader, config),
        Format::Metis => metis::load(reader),
        Format::MatrixMarket => mm::load_with(reader, config),
        Format::Snap => snap::load_with(reader, config),
        Format::Ugraph => ugraph::load(reader),
        Format::UgraphEdges => ugraph::load_edges_with(reader, config),
    }
}

/// Loads a matrix file with the default configuration
pub fn load_path<T: Scalar, P: AsRef<Path>>(format: Format, path: P) -> Result<CsrMatrix<T>> {
    load_path_with(format, path, &IoConfig::default())
}

/// Loads a matrix file
pub fn load_path_with<T, P>(format: Format, path: P, config: &IoConfig) -> Result<CsrMatrix<T>>
where
    T: Scalar,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if format.is_two_pass() {
        info!(path = %path.display(), %format, strategy = ?config.pass_strategy, "loading matrix");
    } else {
        info!(path = %path.display(), %format, "loading matrix");
    }

    let file = File::open(path)?;
    let matrix = load_seekable(format, BufReader::new(file), config)?;

    info!(
        n_rows = matrix.n_rows,
        n_cols = matrix.n_cols,
        nnz = matrix.nnz(),
        symmetric = matrix.symmetric,
        "loaded matrix"
    );
    Ok(matrix)
}

/// Checks that `matrix` can be written in `format` without writing anything
pub fn check<T: Scalar>(format: Format, matrix: &CsrMatrix<T>) -> Result<()> {
    match format {
        Format::Cluto => cluto::check(matrix),
        Format::Dimacs => dimacs::check(matrix),
        Format::Metis => metis::check(matrix),
        Format::MatrixMarket => mm::check(matrix),
        Format::Snap => snap::check(matrix),
        Format::Ugraph => ugraph::check(matrix),
        Format::UgraphEdges => ugraph::check_edges(matrix),
    }
}

/// Writes `matrix` in `format`
pub fn save<T: Scalar, W: Write>(format: Format, writer: W, matrix: &CsrMatrix<T>) -> Result<()> {
    match format {
        Format::Cluto => cluto::save(writer, matrix),
        Format::Dimacs => dimacs::save(writer, matrix),
        Format::Metis => metis::save(writer, matrix),
        Format::MatrixMarket => mm::save(writer, matrix),
        Format::Snap => snap::save(writer, matrix),
        Format::Ugraph => ugraph::save(writer, matrix),
        Format::UgraphEdges => ugraph::save_edges(writer, matrix),
    }
}

/// Writes `matrix` to a file
///
/// The matrix is checked before the file is created, so a rejected matrix
/// leaves the file system untouched.
pub fn save_path<T: Scalar, P: AsRef<Path>>(format: Format, path: P, matrix: &CsrMatrix<T>) -> Result<()> {
    let path = path.as_ref();
    check(format, matrix)?;

    info!(path = %path.display(), %format, nnz = matrix.nnz(), "saving matrix");
    let mut writer = BufWriter::new(File::create(path)?);
    save(format, &mut writer, matrix)?;
    writer.flush()?;
    Ok(())
}

/// Runs the two-pass builder, replaying the body from memory
pub(crate) fn assemble_buffered<T, R, P>(lines: LineReader<R>, parser: P, plan: &BuildPlan) -> Result<CsrMatrix<T>>
where
    T: Scalar,
    R: BufRead,
    P: EdgeParser<T>,
{
    debug!("second pass replays buffered entries");
    let mut stream = Buffered::new(lines, parser);
    assemble(plan, &mut stream)
}

/// Runs the two-pass builder over a seekable source
pub(crate) fn assemble_seekable<T, R, P>(
    lines: LineReader<R>,
    parser: P,
    plan: &BuildPlan,
    strategy: PassStrategy,
) -> Result<CsrMatrix<T>>
where
    T: Scalar,
    R: BufRead + Seek,
    P: EdgeParser<T>,
{
    match strategy {
        PassStrategy::Buffer => assemble_buffered(lines, parser, plan),
        PassStrategy::Rewind => {
            debug!("second pass rewinds the source");
            let mut stream = Rewinding::new(lines, parser)?;
            assemble(plan, &mut stream)
        }
    }
}
