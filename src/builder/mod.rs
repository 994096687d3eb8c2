//! CSR construction from unordered entry streams
//!
//! Loaders whose bodies list entries in arbitrary order go through
//! [`assemble`], a two-pass counting sort:
//!
//! 1. **Count**: every entry increments the counter of its row (and of the
//!    mirrored row for symmetric input). Dimensions that the header does not
//!    declare are discovered here, growing the counter as needed.
//! 2. **Prefix sum**: the counters become row offsets and, at the same time,
//!    the per-row write cursor.
//! 3. **Place**: the stream is traversed again and each entry is written at
//!    its row's cursor. Afterwards every cursor must sit at the start of the
//!    next row.
//!
//! Row-ordered formats use [`rowwise::RowAssembler`] instead, and ugraph
//! adjacency input finishes with [`symmetric::mirror_upper_triangle`].

pub mod counts;
pub mod placer;
pub mod rowwise;
pub mod stream;
pub mod symmetric;

use tracing::debug;

use crate::error::{FormatError, Result};
use crate::matrix::dialect::{Dialect, Header, Sizing, SymmetryMode, Triangle};
use crate::matrix::{CsrMatrix, Scalar};

pub use counts::{BucketCounts, RowCursor};
pub use placer::EdgePlacer;
pub use rowwise::RowAssembler;
pub use stream::{Buffered, Edge, EdgeParser, EdgeStream, Replay, Rewinding};
pub use symmetric::mirror_upper_triangle;

/// Row and column bounds for the counting pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    /// Indices beyond the declared dimensions are errors
    Declared { n_rows: usize, n_cols: usize },
    /// Square matrix sized by the largest index seen
    Discovered { initial_capacity: usize },
}

/// Everything the two-pass builder needs to know about the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildPlan {
    pub bounds: Bounds,
    /// Number of entries the body must list
    pub entries: Option<usize>,
    /// Store every off-diagonal entry in both directions
    pub mirror: bool,
    /// Side of the diagonal mirrored input must be listed from
    pub triangle: Triangle,
    /// Weights are declared up front; otherwise their presence is learnt
    /// during the first pass
    pub weighted: bool,
    /// Line of the header that declared the sizes
    pub header_line: usize,
}

impl BuildPlan {
    /// Derives the plan from a parsed header and the format's dialect
    pub fn new(header: &Header, dialect: &Dialect, initial_capacity: usize) -> Result<Self> {
        let bounds = match dialect.sizing {
            Sizing::Declared => match (header.n_rows, header.n_cols) {
                (Some(n_rows), Some(n_cols)) => Bounds::Declared { n_rows, n_cols },
                _ => return Err(FormatError::header(0, "dimensions are required")),
            },
            Sizing::Discovered => Bounds::Discovered { initial_capacity },
        };

        let mirror = match dialect.symmetry {
            SymmetryMode::Always => true,
            SymmetryMode::HeaderDeclared => header.symmetric,
            SymmetryMode::None => false,
            SymmetryMode::BodyBoth | SymmetryMode::Derived => {
                return Err(FormatError::dialect(
                    "row-ordered symmetric formats are not built from entry streams",
                ))
            }
        };

        Ok(Self {
            bounds,
            entries: header.entries,
            mirror,
            triangle: if mirror { dialect.triangle } else { Triangle::Any },
            weighted: header.flags.has_edge_weights(),
            header_line: header.line,
        })
    }
}

/// Builds a CSR matrix from a stream traversed twice
pub fn assemble<T, S>(plan: &BuildPlan, stream: &mut S) -> Result<CsrMatrix<T>>
where
    T: Scalar,
    S: EdgeStream<T> + ?Sized,
{
    let mut counts = match plan.bounds {
        Bounds::Declared { n_rows, .. } => BucketCounts::fixed(n_rows, plan.header_line)?,
        Bounds::Discovered { initial_capacity } => BucketCounts::growing(initial_capacity),
    };

    // Pass 1: histogram of row lengths
    let mut entries = 0usize;
    let mut any_weight = false;
    stream.pass(&mut |edge| {
        check_bounds(plan, &edge)?;
        if !plan.triangle.admits(edge.row, edge.col) {
            return Err(FormatError::InvalidTriangle {
                line: edge.line,
                row: edge.row + 1,
                col: edge.col + 1,
            });
        }

        counts.observe(edge.row.max(edge.col), edge.line)?;
        counts.increment(edge.row);
        if plan.mirror && edge.row != edge.col {
            counts.increment(edge.col);
        }
        any_weight |= edge.weight.is_some();
        entries += 1;
        Ok(())
    })?;

    if let Some(declared) = plan.entries {
        if declared != entries {
            return Err(FormatError::mismatch("entries", declared, entries));
        }
    }

    let n_rows = counts.n_rows();
    let n_cols = match plan.bounds {
        Bounds::Declared { n_cols, .. } => n_cols,
        Bounds::Discovered { .. } => n_rows,
    };
    let cursor = counts.into_cursor();
    debug!(n_rows, n_cols, entries, nnz = cursor.nnz(), "counted entries");

    // Pass 2: place every entry at its row cursor. Weights are stored if the
    // header declared them or the first pass found any.
    let mut placer = EdgePlacer::new(cursor, plan.weighted || any_weight);
    let mut replayed = 0usize;
    stream.pass(&mut |edge| {
        if edge.col >= n_cols {
            return Err(FormatError::inconsistent(format!(
                "line {}: column {} was not seen while counting",
                edge.line,
                edge.col + 1
            )));
        }
        placer.place(edge.row, edge.col, edge.weight)?;
        if plan.mirror && edge.row != edge.col {
            placer.place(edge.col, edge.row, edge.weight)?;
        }
        replayed += 1;
        Ok(())
    })?;

    if replayed != entries {
        return Err(FormatError::inconsistent(format!(
            "second pass read {} entries, first pass read {}",
            replayed, entries
        )));
    }

    let placed = placer.finish()?;
    debug!(nnz = placed.col_idx.len(), "placed entries");

    Ok(CsrMatrix::try_new(n_rows, n_cols, placed.row_ptr, placed.col_idx, placed.values)?
        .with_symmetric(plan.mirror))
}

fn check_bounds<T>(plan: &BuildPlan, edge: &Edge<T>) -> Result<()> {
    if let Bounds::Declared { n_rows, n_cols } = plan.bounds {
        if edge.row >= n_rows {
            return Err(FormatError::out_of_range(edge.line, "row", edge.row + 1, n_rows));
        }
        if edge.col >= n_cols {
            return Err(FormatError::out_of_range(edge.line, "column", edge.col + 1, n_cols));
        }
    }
    Ok(())
}
