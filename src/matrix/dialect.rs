//! Per-format dialects: header conventions and optional-field flags
//!
//! Every loader reads its header with format-specific grammar and reduces it
//! to a [`Header`]. Together with the static [`Dialect`] of the format, that
//! is the only thing the construction engine in [`crate::builder`] ever sees
//! of the format.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::{FormatError, Result};

/// Bitset describing which optional arrays a matrix carries
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DialectFlags(u8);

impl DialectFlags {
    pub const NONE: Self = Self(0);
    /// One weight per stored entry
    pub const EDGE_WEIGHTS: Self = Self(0b001);
    /// `ncon` weights per vertex
    pub const VERTEX_WEIGHTS: Self = Self(0b010);
    /// One size per vertex
    pub const VERTEX_SIZES: Self = Self(0b100);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn has_edge_weights(self) -> bool {
        self.contains(Self::EDGE_WEIGHTS)
    }

    pub fn has_vertex_weights(self) -> bool {
        self.contains(Self::VERTEX_WEIGHTS)
    }

    pub fn has_vertex_sizes(self) -> bool {
        self.contains(Self::VERTEX_SIZES)
    }

    /// Decodes the METIS `fmt` field: hundreds digit = vertex sizes, tens
    /// digit = vertex weights, units digit = edge weights
    ///
    /// Each digit must be 0 or 1.
    pub fn from_metis_code(code: u32) -> Option<Self> {
        if code > 111 {
            return None;
        }
        let digits = [code / 100, (code / 10) % 10, code % 10];
        if digits.iter().any(|&d| d > 1) {
            return None;
        }

        let mut flags = Self::NONE;
        if digits[0] == 1 {
            flags |= Self::VERTEX_SIZES;
        }
        if digits[1] == 1 {
            flags |= Self::VERTEX_WEIGHTS;
        }
        if digits[2] == 1 {
            flags |= Self::EDGE_WEIGHTS;
        }
        Some(flags)
    }

    /// Encodes the flags as a METIS `fmt` value (printed as 3 digits)
    pub fn metis_code(self) -> u32 {
        100 * self.has_vertex_sizes() as u32
            + 10 * self.has_vertex_weights() as u32
            + self.has_edge_weights() as u32
    }
}

impl BitOr for DialectFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DialectFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for DialectFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.has_edge_weights() {
            names.push("EDGE_WEIGHTS");
        }
        if self.has_vertex_weights() {
            names.push("VERTEX_WEIGHTS");
        }
        if self.has_vertex_sizes() {
            names.push("VERTEX_SIZES");
        }
        if names.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}

/// How the header's non-zero count relates to the stored count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NnzConvention {
    /// Header counts stored entries (or on-disk entries for symmetric input)
    Entries,
    /// Header counts undirected edges; both directions are stored
    Halved,
    /// No count in the header
    Undeclared,
}

/// How a format expresses symmetry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetryMode {
    /// Never symmetric
    None,
    /// The header says whether entries must be mirrored
    HeaderDeclared,
    /// Every entry is mirrored
    Always,
    /// The body already lists both directions
    BodyBoth,
    /// Rows list one triangle; the other is derived by a mirroring pass
    Derived,
}

/// Whether dimensions come from the header or from the data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    Declared,
    Discovered,
}

/// Which side of the diagonal one-sided symmetric input must list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triangle {
    Any,
    /// row >= col
    Lower,
    /// row < col
    StrictUpper,
}

impl Triangle {
    pub fn admits(self, row: usize, col: usize) -> bool {
        match self {
            Triangle::Any => true,
            Triangle::Lower => row >= col,
            Triangle::StrictUpper => row < col,
        }
    }
}

/// Static description of a file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub comment: char,
    pub nnz: NnzConvention,
    pub symmetry: SymmetryMode,
    pub sizing: Sizing,
    pub triangle: Triangle,
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Cluto,
    Dimacs,
    Metis,
    MatrixMarket,
    Snap,
    /// Undirected adjacency lists listing only the upper triangle
    Ugraph,
    /// Undirected edge list, one line per edge
    UgraphEdges,
}

const CLUTO: Dialect = Dialect {
    comment: '%',
    nnz: NnzConvention::Entries,
    symmetry: SymmetryMode::None,
    sizing: Sizing::Declared,
    triangle: Triangle::Any,
};

const DIMACS: Dialect = Dialect {
    comment: 'c',
    nnz: NnzConvention::Entries,
    symmetry: SymmetryMode::None,
    sizing: Sizing::Declared,
    triangle: Triangle::Any,
};

const METIS: Dialect = Dialect {
    comment: '%',
    nnz: NnzConvention::Halved,
    symmetry: SymmetryMode::BodyBoth,
    sizing: Sizing::Declared,
    triangle: Triangle::Any,
};

const MATRIX_MARKET: Dialect = Dialect {
    comment: '%',
    nnz: NnzConvention::Entries,
    symmetry: SymmetryMode::HeaderDeclared,
    sizing: Sizing::Declared,
    triangle: Triangle::Lower,
};

const SNAP: Dialect = Dialect {
    comment: '#',
    nnz: NnzConvention::Undeclared,
    symmetry: SymmetryMode::None,
    sizing: Sizing::Discovered,
    triangle: Triangle::Any,
};

const UGRAPH: Dialect = Dialect {
    comment: '%',
    nnz: NnzConvention::Halved,
    symmetry: SymmetryMode::Derived,
    sizing: Sizing::Declared,
    triangle: Triangle::StrictUpper,
};

const UGRAPH_EDGES: Dialect = Dialect {
    comment: '#',
    nnz: NnzConvention::Undeclared,
    symmetry: SymmetryMode::Always,
    sizing: Sizing::Discovered,
    triangle: Triangle::Any,
};

impl Format {
    pub const ALL: [Format; 7] = [
        Format::Cluto,
        Format::Dimacs,
        Format::Metis,
        Format::MatrixMarket,
        Format::Snap,
        Format::Ugraph,
        Format::UgraphEdges,
    ];

    pub fn dialect(self) -> &'static Dialect {
        match self {
            Format::Cluto => &CLUTO,
            Format::Dimacs => &DIMACS,
            Format::Metis => &METIS,
            Format::MatrixMarket => &MATRIX_MARKET,
            Format::Snap => &SNAP,
            Format::Ugraph => &UGRAPH,
            Format::UgraphEdges => &UGRAPH_EDGES,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Cluto => "cluto",
            Format::Dimacs => "dimacs",
            Format::Metis => "metis",
            Format::MatrixMarket => "mm",
            Format::Snap => "snap",
            Format::Ugraph => "ugraph",
            Format::UgraphEdges => "ugraph-edges",
        }
    }

    /// True if the format's body is read twice (count, then place)
    pub fn is_two_pass(self) -> bool {
        matches!(
            self,
            Format::Dimacs | Format::MatrixMarket | Format::Snap | Format::UgraphEdges
        )
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cluto" => Ok(Format::Cluto),
            "dimacs" => Ok(Format::Dimacs),
            "metis" | "graph" => Ok(Format::Metis),
            "mm" | "mtx" | "matrix-market" | "matrixmarket" => Ok(Format::MatrixMarket),
            "snap" => Ok(Format::Snap),
            "ugraph" => Ok(Format::Ugraph),
            "ugraph-edges" | "edges" => Ok(Format::UgraphEdges),
            other => Err(FormatError::dialect(format!("unknown format `{}`", other))),
        }
    }
}

/// Dimensions and flags produced by a format's header reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Declared rows, `None` when discovered from the data
    pub n_rows: Option<usize>,
    /// Declared columns, `None` when discovered from the data
    pub n_cols: Option<usize>,
    /// Number of entries the body must contain, as listed on disk
    pub entries: Option<usize>,
    /// Entries must be mirrored into the other triangle
    pub symmetric: bool,
    pub flags: DialectFlags,
    /// Vertex-weight constraints per row
    pub ncon: usize,
    /// Line the sizes were read from, for error reports
    pub line: usize,
}

impl Header {
    /// Header for formats whose dimensions are discovered from the data
    pub fn discovered(flags: DialectFlags, symmetric: bool) -> Self {
        Self {
            n_rows: None,
            n_cols: None,
            entries: None,
            symmetric,
            flags,
            ncon: 0,
            line: 0,
        }
    }

    /// Header with declared dimensions and entry count
    pub fn declared(n_rows: usize, n_cols: usize, entries: usize, flags: DialectFlags) -> Self {
        Self {
            n_rows: Some(n_rows),
            n_cols: Some(n_cols),
            entries: Some(entries),
            symmetric: false,
            flags,
            ncon: 0,
            line: 0,
        }
    }
}

/// Parses the `fmt` and `ncon` fields shared by METIS and ugraph headers
pub fn graph_flags(line: usize, fmt: Option<&str>, ncon: Option<&str>) -> Result<(DialectFlags, usize)> {
    let Some(fmt) = fmt else {
        return Ok((DialectFlags::NONE, 0));
    };

    let code: u32 = fmt
        .parse()
        .map_err(|_| FormatError::header(line, format!("invalid fmt field `{}`", fmt)))?;
    let flags = DialectFlags::from_metis_code(code)
        .ok_or_else(|| FormatError::dialect(format!("fmt={} is not a valid flag word", fmt)))?;

    let ncon = match ncon {
        Some(tok) => {
            let ncon: usize = tok
                .parse()
                .map_err(|_| FormatError::header(line, format!("invalid ncon field `{}`", tok)))?;
            if ncon == 0 {
                return Err(FormatError::dialect("ncon must be positive"));
            }
            if !flags.has_vertex_weights() {
                return Err(FormatError::dialect(format!(
                    "ncon given but fmt={} has no vertex weights",
                    fmt
                )));
            }
            ncon
        }
        None if flags.has_vertex_weights() => 1,
        None => 0,
    };

    Ok((flags, ncon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_metis_code_roundtrip() {
        for code in [0, 1, 10, 11, 100, 101, 110, 111] {
            let flags = DialectFlags::from_metis_code(code).unwrap();
            assert_eq!(flags.metis_code(), code);
        }
    }

    #[test]
    fn test_metis_code_rejects_other_digits() {
        assert_eq!(DialectFlags::from_metis_code(2), None);
        assert_eq!(DialectFlags::from_metis_code(20), None);
        assert_eq!(DialectFlags::from_metis_code(1000), None);
    }

    #[test]
    fn test_flag_bits() {
        let flags = DialectFlags::from_metis_code(101).unwrap();
        assert!(flags.has_edge_weights());
        assert!(!flags.has_vertex_weights());
        assert!(flags.has_vertex_sizes());
        assert_eq!(format!("{:?}", flags), "EDGE_WEIGHTS | VERTEX_SIZES");
    }

    #[test]
    fn test_triangle_rules() {
        assert!(Triangle::Lower.admits(2, 1));
        assert!(Triangle::Lower.admits(1, 1));
        assert!(!Triangle::Lower.admits(0, 1));
        assert!(Triangle::StrictUpper.admits(0, 1));
        assert!(!Triangle::StrictUpper.admits(1, 1));
        assert!(!Triangle::StrictUpper.admits(1, 0));
    }

    #[test]
    fn test_format_names_parse_back() {
        for format in Format::ALL {
            assert_eq!(format.name().parse::<Format>().unwrap(), format);
        }
        assert_eq!("MTX".parse::<Format>().unwrap(), Format::MatrixMarket);
        assert_eq!("xml".parse::<Format>().unwrap_err().kind(), ErrorKind::UnsupportedDialect);
    }

    #[test]
    fn test_graph_flags() {
        assert_eq!(graph_flags(1, None, None).unwrap(), (DialectFlags::NONE, 0));
        assert_eq!(
            graph_flags(1, Some("011"), Some("3")).unwrap(),
            (DialectFlags::VERTEX_WEIGHTS | DialectFlags::EDGE_WEIGHTS, 3)
        );
        assert_eq!(
            graph_flags(1, Some("10"), None).unwrap(),
            (DialectFlags::VERTEX_WEIGHTS, 1)
        );
        assert_eq!(
            graph_flags(1, Some("1"), Some("2")).unwrap_err().kind(),
            ErrorKind::UnsupportedDialect
        );
        assert_eq!(
            graph_flags(1, Some("10"), Some("0")).unwrap_err().kind(),
            ErrorKind::UnsupportedDialect
        );
        assert_eq!(
            graph_flags(1, Some("x"), None).unwrap_err().kind(),
            ErrorKind::MalformedHeader
        );
    }
}
