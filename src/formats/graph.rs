//! Shared grammar of METIS and ugraph adjacency files
//!
//! Header: `vertices edges [fmt [ncon]]`. Then one line per vertex:
//! `[size] [w1 .. wncon] (neighbour [weight])*`, neighbours 1-based. Blank
//! lines are vertices without neighbours; `%` lines are comments.

use std::io::{BufRead, Write};

use ndarray::Array2;
use tracing::debug;

use crate::builder::{mirror_upper_triangle, RowAssembler};
use crate::error::{FormatError, Result};
use crate::matrix::dialect::{graph_flags, NnzConvention, SymmetryMode};
use crate::matrix::{CsrMatrix, Dialect, DialectFlags, Header, Scalar};
use crate::text::{parse_count, parse_index, parse_value, tokens, LineReader};
use crate::utils::{try_filled, try_with_capacity};

pub(crate) fn read_header<R: BufRead>(lines: &mut LineReader<R>) -> Result<Header> {
    let Some((number, line)) = lines.next_data_line()? else {
        return Err(FormatError::header(lines.line_number(), "missing graph header"));
    };
    let toks = tokens(line);
    if !(2..=4).contains(&toks.len()) {
        return Err(FormatError::header(
            number,
            format!("expected `vertices edges [fmt [ncon]]`, found {} fields", toks.len()),
        ));
    }

    let n = parse_count(toks[0], number, "vertex count")?;
    let edges = parse_count(toks[1], number, "edge count")?;
    let (flags, ncon) = graph_flags(number, toks.get(2).copied(), toks.get(3).copied())?;

    debug!(n, edges, ?flags, ncon, "read graph header");
    let mut header = Header::declared(n, n, edges, flags);
    header.ncon = ncon;
    header.line = number;
    Ok(header)
}

/// Reads the body described by `header` and builds the symmetric matrix
///
/// With `SymmetryMode::Derived`, each row lists only the neighbours the
/// dialect's triangle admits; the missing direction is reserved at the front
/// of each row while reading and filled in by a final mirroring pass.
pub(crate) fn read_body<T, R>(lines: &mut LineReader<R>, header: &Header, dialect: &Dialect) -> Result<CsrMatrix<T>>
where
    T: Scalar,
    R: BufRead,
{
    let n = header.n_rows.unwrap_or(0);
    let edges = header.entries.unwrap_or(0);
    let nnz = match dialect.nnz {
        NnzConvention::Halved => edges
            .checked_mul(2)
            .ok_or_else(|| FormatError::too_large(header.line, "edge count", edges))?,
        _ => edges,
    };
    let derived = dialect.symmetry == SymmetryMode::Derived;

    let flags = header.flags;
    let ncon = header.ncon;
    let weighted = flags.has_edge_weights();
    let lead = usize::from(flags.has_vertex_sizes())
        .checked_add(ncon)
        .ok_or_else(|| FormatError::too_large(header.line, "ncon", ncon))?;
    let n_weights = n
        .checked_mul(ncon)
        .ok_or_else(|| FormatError::too_large(header.line, "ncon", ncon))?;
    let step = if weighted { 2 } else { 1 };

    let mut rows = RowAssembler::new(n, n, nnz, weighted, header.line)?;
    let too_large = || FormatError::too_large(header.line, "vertex count", n);
    let mut sizes: Option<Vec<usize>> = if flags.has_vertex_sizes() {
        Some(try_with_capacity(n).ok_or_else(too_large)?)
    } else {
        None
    };
    let mut vertex_weights: Option<Vec<T>> = if flags.has_vertex_weights() {
        let weights = try_with_capacity(n_weights);
        Some(weights.ok_or_else(|| FormatError::too_large(header.line, "ncon", ncon))?)
    } else {
        None
    };
    // Entries each row still expects from earlier rows
    let mut reserved = try_filled(if derived { n } else { 0 }, 0usize).ok_or_else(too_large)?;

    for i in 0..n {
        let Some((number, line)) = lines.next_line()? else {
            return Err(FormatError::mismatch("rows", n, i));
        };
        let toks = tokens(line);
        if toks.len() < lead || (toks.len() - lead) % step != 0 {
            let expected = if weighted {
                format!("{} plus `neighbour weight` pairs", lead)
            } else {
                format!("at least {}", lead)
            };
            return Err(FormatError::field_count(number, expected, toks.len()));
        }

        let (mut vertex, adjacency) = toks.split_at(lead);
        if let Some(sizes) = sizes.as_mut() {
            sizes.push(vertex[0].parse().map_err(|_| FormatError::entry(number, vertex[0]))?);
            vertex = &vertex[1..];
        }
        if let Some(weights) = vertex_weights.as_mut() {
            for tok in vertex {
                weights.push(parse_value(tok, number)?);
            }
        }

        if derived {
            rows.reserve(reserved[i])?;
        }
        for pair in adjacency.chunks(step) {
            let col = parse_index(pair[0], number, "neighbour", n)?;
            let weight = if weighted {
                Some(parse_value(pair[1], number)?)
            } else {
                None
            };

            if derived {
                if col >= n {
                    return Err(FormatError::out_of_range(number, "neighbour", col + 1, n));
                }
                if !dialect.triangle.admits(i, col) {
                    return Err(FormatError::InvalidTriangle {
                        line: number,
                        row: i + 1,
                        col: col + 1,
                    });
                }
                reserved[col] += 1;
            }
            rows.push(col, weight, number)?;
        }
        rows.end_row()?;
    }
    lines.expect_end()?;

    let (row_ptr, mut col_idx, mut values) = rows.finish()?;
    if derived {
        mirror_upper_triangle(&row_ptr, &reserved, &mut col_idx, values.as_deref_mut())?;
    }
    debug!(n, nnz, "read graph body");

    let mut matrix = CsrMatrix::try_new(n, n, row_ptr, col_idx, values)?.with_symmetric(true);
    if let Some(sizes) = sizes {
        matrix = matrix.with_vertex_sizes(sizes)?;
    }
    if let Some(weights) = vertex_weights {
        let found = weights.len();
        let weights = Array2::from_shape_vec((n, ncon), weights)
            .map_err(|_| FormatError::mismatch("vertex weights", n_weights, found))?;
        matrix = matrix.with_vertex_weights(weights)?;
    }
    Ok(matrix)
}

/// Writes the header and one line per vertex, keeping the entries `keep` admits
pub(crate) fn write<T, W, F>(writer: &mut W, matrix: &CsrMatrix<T>, edges: usize, keep: F) -> Result<()>
where
    T: Scalar,
    W: Write,
    F: Fn(usize, usize) -> bool,
{
    let flags = matrix.flags();
    write!(writer, "{} {}", matrix.n_rows, edges)?;
    if flags != DialectFlags::NONE {
        write!(writer, " {:03}", flags.metis_code())?;
        if flags.has_vertex_weights() {
            write!(writer, " {}", matrix.ncon())?;
        }
    }
    writeln!(writer)?;

    for i in 0..matrix.n_rows {
        let mut sep = "";
        if let Some(sizes) = &matrix.vertex_sizes {
            write!(writer, "{}", sizes[i])?;
            sep = " ";
        }
        if let Some(weights) = &matrix.vertex_weights {
            for w in weights.row(i) {
                write!(writer, "{}{}", sep, w)?;
                sep = " ";
            }
        }
        for (col, value) in matrix.row_iter(i).filter(|&(col, _)| keep(i, col)) {
            write!(writer, "{}{}", sep, col + 1)?;
            if let Some(v) = value {
                write!(writer, " {}", v)?;
            }
            sep = " ";
        }
        writeln!(writer)?;
    }
    Ok(())
}
