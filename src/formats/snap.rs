//! SNAP edge lists
//!
//! One directed edge per line, `src dst [weight]`, with `#` comments and no
//! header. The matrix is square and sized by the largest endpoint.

use std::io::{BufRead, Seek, Write};

use crate::builder::{BuildPlan, Edge, EdgeParser};
use crate::config::IoConfig;
use crate::error::{FormatError, Result};
use crate::matrix::{CsrMatrix, DialectFlags, Format, Header, Scalar};
use crate::text::{parse_index, parse_value, tokens, LineReader};

/// Parses `src dst [weight]` lines
///
/// The first data line decides whether the file is weighted; every later
/// line must have the same number of fields.
pub(crate) struct EdgeListParser {
    weighted: Option<bool>,
}

impl EdgeListParser {
    pub(crate) fn new() -> Self {
        Self { weighted: None }
    }
}

impl<T: Scalar> EdgeParser<T> for EdgeListParser {
    fn parse(&mut self, line: &str, number: usize) -> Result<Edge<T>> {
        let toks = tokens(line);
        let weighted = match (toks.len(), self.weighted) {
            (2, None | Some(false)) => false,
            (3, None | Some(true)) => true,
            (found, Some(true)) => return Err(FormatError::field_count(number, "3", found)),
            (found, Some(false)) => return Err(FormatError::field_count(number, "2", found)),
            (found, None) => return Err(FormatError::field_count(number, "2 or 3", found)),
        };
        self.weighted = Some(weighted);

        let row = parse_index(toks[0], number, "row", usize::MAX)?;
        let col = parse_index(toks[1], number, "column", usize::MAX)?;
        let weight = if weighted {
            Some(parse_value(toks[2], number)?)
        } else {
            None
        };
        Ok(Edge::new(row, col, weight, number))
    }
}

fn plan(config: &IoConfig) -> Result<BuildPlan> {
    let header = Header::discovered(DialectFlags::NONE, false);
    BuildPlan::new(&header, Format::Snap.dialect(), config.initial_row_capacity)
}

/// Loads a SNAP edge list, buffering the body for the second pass
pub fn load<T: Scalar, R: BufRead>(reader: R) -> Result<CsrMatrix<T>> {
    let lines = LineReader::new(reader, Format::Snap.dialect().comment);
    super::assemble_buffered(lines, EdgeListParser::new(), &plan(&IoConfig::default())?)
}

/// Loads a SNAP edge list, rewinding the source for the second pass
pub fn load_seekable<T: Scalar, R: BufRead + Seek>(reader: R) -> Result<CsrMatrix<T>> {
    load_with(reader, &IoConfig::default())
}

pub fn load_with<T: Scalar, R: BufRead + Seek>(reader: R, config: &IoConfig) -> Result<CsrMatrix<T>> {
    let lines = LineReader::new(reader, Format::Snap.dialect().comment);
    super::assemble_seekable(lines, EdgeListParser::new(), &plan(config)?, config.pass_strategy)
}

pub fn check<T: Scalar>(matrix: &CsrMatrix<T>) -> Result<()> {
    matrix.validate()
}

/// Writes one line per stored entry
pub fn save<T: Scalar, W: Write>(mut writer: W, matrix: &CsrMatrix<T>) -> Result<()> {
    check(matrix)?;
    for (row, col, value) in matrix.entries() {
        match value {
            Some(v) => writeln!(writer, "{} {} {}", row + 1, col + 1, v)?,
            None => writeln!(writer, "{} {}", row + 1, col + 1)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Cursor;

    #[test]
    fn test_directed_triangle() {
        let m: CsrMatrix<f64> = load_seekable(Cursor::new("1 2\n2 3\n3 1\n")).unwrap();

        assert_eq!((m.n_rows, m.n_cols, m.nnz()), (3, 3, 3));
        assert_eq!(m.row_ptr, vec![0, 1, 2, 3]);
        assert_eq!(m.col_idx, vec![1, 2, 0]);
        assert!(m.is_pattern());
        assert!(!m.symmetric);
    }

    #[test]
    fn test_comments_and_weights() {
        let input = "# Directed graph\n# FromNodeId ToNodeId Weight\n4 1 0.5\n\n1 4 2\n";
        let m: CsrMatrix<f64> = load(Cursor::new(input)).unwrap();

        assert_eq!(m.n_rows, 4);
        assert_eq!(m.row_ptr, vec![0, 1, 1, 1, 2]);
        assert_eq!(m.values, Some(vec![2.0, 0.5]));
    }

    #[test]
    fn test_growth_from_small_capacity() {
        let config = IoConfig {
            initial_row_capacity: 1,
            ..IoConfig::default()
        };
        let m: CsrMatrix<f64> = load_with(Cursor::new("1 9\n40 2\n"), &config).unwrap();
        assert_eq!(m.n_rows, 40);
        assert_eq!(m.degree(0), 1);
        assert_eq!(m.degree(39), 1);
    }

    #[test]
    fn test_mixed_weighting_rejected() {
        let err = load::<f64, _>(Cursor::new("1 2 1.0\n2 3\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldCount);

        let err = load::<f64, _>(Cursor::new("1 2\n2 3 1.0\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldCount);
    }

    #[test]
    fn test_bad_lines() {
        let cases = [
            ("1\n", ErrorKind::FieldCount),
            ("1 2 3 4\n", ErrorKind::FieldCount),
            ("0 1\n", ErrorKind::OutOfRangeIndex),
            ("a 1\n", ErrorKind::MalformedEntry),
            ("1 2 w\n", ErrorKind::MalformedEntry),
        ];
        for (input, kind) in cases {
            let err = load::<f64, _>(Cursor::new(input)).unwrap_err();
            assert_eq!(err.kind(), kind, "input: {:?}", input);
        }
    }

    #[test]
    fn test_empty_input() {
        let m: CsrMatrix<f64> = load(Cursor::new("# nothing here\n")).unwrap();
        assert_eq!(m.n_rows, 0);
        assert_eq!(m.row_ptr, vec![0]);
        assert!(m.col_idx.is_empty());
    }

    #[test]
    fn test_save_lines() {
        let m = CsrMatrix::new(2, 2, vec![0, 1, 2], vec![1, 0], vec![1.5f64, 2.0]);
        let mut out = Vec::new();
        save(&mut out, &m).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 2 1.5\n2 1 2\n");
    }
}
