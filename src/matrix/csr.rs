//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;
use std::fmt::{Debug, Display};
use std::ops::AddAssign;
use std::str::FromStr;

use ndarray::Array2;
use num_traits::Num;

use crate::error::{FormatError, Result};
use crate::matrix::dialect::DialectFlags;

/// Scalar types that can be stored as edge or vertex weights
///
/// Weights are parsed from and printed to text, so the type must round-trip
/// through `FromStr`/`Display`.
pub trait Scalar: Copy + Num + AddAssign + FromStr + Display + Debug + 'static {}

impl<T> Scalar for T where T: Copy + Num + AddAssign + FromStr + Display + Debug + 'static {}

/// A sparse matrix (or graph) in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing indices into col_idx and values arrays
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Optional array of size nnz containing the non-zero values
///
/// A matrix without `values` is a pattern (unweighted) matrix. Graph formats
/// can additionally carry per-vertex weights (`n_rows × ncon`) and per-vertex
/// sizes.
#[derive(Clone, PartialEq)]
pub struct CsrMatrix<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Row pointers (size: n_rows + 1)
    /// row_ptr[i] is the index in col_idx and values where row i starts
    /// row_ptr[n_rows] is equal to nnz
    pub row_ptr: Vec<usize>,

    /// Column indices (size: nnz)
    pub col_idx: Vec<usize>,

    /// Non-zero values (size: nnz), absent for pattern matrices
    pub values: Option<Vec<T>>,

    /// Both directions of every off-diagonal edge are stored
    pub symmetric: bool,

    /// Per-vertex weights, one row per matrix row and one column per constraint
    pub vertex_weights: Option<Array2<T>>,

    /// Per-vertex sizes
    pub vertex_sizes: Option<Vec<usize>>,
}

impl<T: Scalar> CsrMatrix<T> {
    /// Creates a new weighted CSR matrix with the given dimensions and data
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `row_ptr` - Row pointers
    /// * `col_idx` - Column indices
    /// * `values` - Non-zero values
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent:
    /// - row_ptr.len() must be n_rows + 1
    /// - col_idx.len() must equal values.len()
    /// - row_ptr[n_rows] must equal col_idx.len()
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_ptr.len(), n_rows + 1, "row_ptr.len() must be n_rows + 1");
        assert_eq!(col_idx.len(), values.len(), "col_idx.len() must equal values.len()");
        assert_eq!(
            row_ptr[n_rows], col_idx.len(),
            "row_ptr[n_rows] must equal col_idx.len()"
        );

        for &col in &col_idx {
            assert!(col < n_cols, "Column index {} out of bounds (n_cols = {})", col, n_cols);
        }

        Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values: Some(values),
            symmetric: false,
            vertex_weights: None,
            vertex_sizes: None,
        }
    }

    /// Creates a new pattern (unweighted) CSR matrix
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`CsrMatrix::new`].
    pub fn pattern(n_rows: usize, n_cols: usize, row_ptr: Vec<usize>, col_idx: Vec<usize>) -> Self {
        match Self::try_new(n_rows, n_cols, row_ptr, col_idx, None) {
            Ok(matrix) => matrix,
            Err(err) => panic!("invalid pattern matrix: {}", err),
        }
    }

    /// Creates a CSR matrix, returning an error instead of panicking when the
    /// arrays are inconsistent
    pub fn try_new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Option<Vec<T>>,
    ) -> Result<Self> {
        let matrix = Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
            symmetric: false,
            vertex_weights: None,
            vertex_sizes: None,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Marks the matrix as storing both directions of a symmetric relation
    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    /// Attaches an `n_rows × ncon` block of vertex weights
    pub fn with_vertex_weights(mut self, weights: Array2<T>) -> Result<Self> {
        if weights.nrows() != self.n_rows {
            return Err(FormatError::mismatch("vertex weight rows", self.n_rows, weights.nrows()));
        }
        if weights.ncols() == 0 {
            return Err(FormatError::dialect("vertex weights need at least one constraint"));
        }
        self.vertex_weights = Some(weights);
        Ok(self)
    }

    /// Attaches per-vertex sizes
    pub fn with_vertex_sizes(mut self, sizes: Vec<usize>) -> Result<Self> {
        if sizes.len() != self.n_rows {
            return Err(FormatError::mismatch("vertex sizes", self.n_rows, sizes.len()));
        }
        self.vertex_sizes = Some(sizes);
        Ok(self)
    }

    /// Checks every structural invariant of the CSR arrays
    pub fn validate(&self) -> Result<()> {
        if self.row_ptr.len().checked_sub(1) != Some(self.n_rows) {
            return Err(FormatError::mismatch(
                "row pointers",
                self.n_rows.saturating_add(1),
                self.row_ptr.len(),
            ));
        }
        if self.row_ptr[0] != 0 {
            return Err(FormatError::inconsistent("row_ptr[0] must be 0"));
        }
        if let Some(i) = self.row_ptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(FormatError::inconsistent(format!("row_ptr decreases after row {}", i)));
        }
        if self.row_ptr[self.n_rows] != self.col_idx.len() {
            return Err(FormatError::mismatch("nnz", self.row_ptr[self.n_rows], self.col_idx.len()));
        }
        if let Some(values) = &self.values {
            if values.len() != self.col_idx.len() {
                return Err(FormatError::mismatch("values", self.col_idx.len(), values.len()));
            }
        }
        if let Some(&col) = self.col_idx.iter().find(|&&col| col >= self.n_cols) {
            return Err(FormatError::out_of_range(0, "column", col + 1, self.n_cols));
        }
        if let Some(weights) = &self.vertex_weights {
            if weights.nrows() != self.n_rows {
                return Err(FormatError::mismatch("vertex weight rows", self.n_rows, weights.nrows()));
            }
        }
        if let Some(sizes) = &self.vertex_sizes {
            if sizes.len() != self.n_rows {
                return Err(FormatError::mismatch("vertex sizes", self.n_rows, sizes.len()));
            }
        }
        Ok(())
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.col_idx.len()
    }

    /// True if the matrix carries no edge weights
    pub fn is_pattern(&self) -> bool {
        self.values.is_none()
    }

    /// Number of vertex-weight constraints (0 without vertex weights)
    pub fn ncon(&self) -> usize {
        self.vertex_weights.as_ref().map_or(0, |w| w.ncols())
    }

    /// Capability flags describing which optional arrays are present
    pub fn flags(&self) -> DialectFlags {
        let mut flags = DialectFlags::NONE;
        if self.values.is_some() {
            flags |= DialectFlags::EDGE_WEIGHTS;
        }
        if self.vertex_weights.is_some() {
            flags |= DialectFlags::VERTEX_WEIGHTS;
        }
        if self.vertex_sizes.is_some() {
            flags |= DialectFlags::VERTEX_SIZES;
        }
        flags
    }

    /// Number of stored entries in row i
    pub fn degree(&self, i: usize) -> usize {
        self.row_ptr[i + 1] - self.row_ptr[i]
    }

    /// Column indices and (optional) values of row i
    pub fn row(&self, i: usize) -> (&[usize], Option<&[T]>) {
        assert!(i < self.n_rows, "Row index out of bounds");

        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];

        (
            &self.col_idx[start..end],
            self.values.as_ref().map(|v| &v[start..end]),
        )
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) where value is `None` for
    /// pattern matrices
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, Option<&T>)> + '_ {
        let (cols, values) = self.row(i);

        cols.iter()
            .enumerate()
            .map(move |(k, &col)| (col, values.map(|v| &v[k])))
    }

    /// Iterates over every stored entry as (row, col, value)
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, Option<T>)> + '_ {
        (0..self.n_rows).flat_map(move |i| {
            (self.row_ptr[i]..self.row_ptr[i + 1]).map(move |j| {
                (i, self.col_idx[j], self.values.as_ref().map(|v| v[j]))
            })
        })
    }

    /// Checks that every stored (r, c) has a matching (c, r)
    pub fn is_structurally_symmetric(&self) -> bool {
        if self.n_rows != self.n_cols {
            return false;
        }
        let transposed = transpose_pattern(self);
        let mut mine: Vec<Vec<usize>> = (0..self.n_rows).map(|i| self.row(i).0.to_vec()).collect();
        let mut theirs = transposed;
        for (a, b) in mine.iter_mut().zip(theirs.iter_mut()) {
            a.sort_unstable();
            b.sort_unstable();
        }
        mine == theirs
    }

    /// Compares dimensions and the multiset of (col, value) pairs per row,
    /// ignoring the order of entries within each row
    pub fn same_entries(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        if self.n_rows != other.n_rows
            || self.n_cols != other.n_cols
            || self.nnz() != other.nnz()
            || self.is_pattern() != other.is_pattern()
        {
            return false;
        }

        (0..self.n_rows).all(|i| sorted_row(self, i) == sorted_row(other, i))
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr: vec![0; n_rows + 1],
            col_idx: Vec::new(),
            values: Some(Vec::new()),
            symmetric: false,
            vertex_weights: None,
            vertex_sizes: None,
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            row_ptr: (0..=n).collect(),
            col_idx: (0..n).collect(),
            values: Some(vec![T::one(); n]),
            symmetric: true,
            vertex_weights: None,
            vertex_sizes: None,
        }
    }
}

fn sorted_row<T: Scalar + PartialOrd>(m: &CsrMatrix<T>, i: usize) -> Vec<(usize, Option<T>)> {
    let mut row: Vec<_> = m.row_iter(i).map(|(c, v)| (c, v.copied())).collect();
    row.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then(a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    });
    row
}

fn transpose_pattern<T: Scalar>(m: &CsrMatrix<T>) -> Vec<Vec<usize>> {
    let mut rows = vec![Vec::new(); m.n_cols];
    for (i, j, _) in m.entries() {
        rows[j].push(i);
    }
    rows
}

impl<T: Scalar> fmt::Debug for CsrMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CsrMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;
        writeln!(f, "  symmetric: {}", self.symmetric)?;
        writeln!(f, "  flags: {:?}", self.flags())?;

        // Print a sample of the matrix content
        let max_rows_to_print = 5.min(self.n_rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let degree = self.degree(i);

                if degree == 0 {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(degree);

                    for (col, value) in self.row_iter(i).take(max_elements) {
                        match value {
                            Some(v) => write!(f, "({}, {:?}) ", col, v)?,
                            None => write!(f, "{} ", col)?,
                        }
                    }

                    if degree > max_elements {
                        write!(f, "... ({} more)", degree - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
