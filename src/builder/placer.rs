//! Second pass of the two-pass construction: placing entries into rows

use crate::builder::counts::RowCursor;
use crate::error::{FormatError, Result};
use crate::matrix::Scalar;

/// CSR arrays filled by [`EdgePlacer::finish`]
#[derive(Debug)]
pub struct Placed<T> {
    pub row_ptr: Vec<usize>,
    pub col_idx: Vec<usize>,
    pub values: Option<Vec<T>>,
}

/// Writes each entry at the current cursor of its row
///
/// Entries of a row end up in the order they were placed.
pub struct EdgePlacer<T> {
    cursor: RowCursor,
    col_idx: Vec<usize>,
    values: Option<Vec<T>>,
}

impl<T: Scalar> EdgePlacer<T> {
    pub fn new(cursor: RowCursor, weighted: bool) -> Self {
        let nnz = cursor.nnz();
        Self {
            cursor,
            col_idx: vec![0; nnz],
            values: weighted.then(|| vec![T::zero(); nnz]),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.cursor.n_rows()
    }

    /// Places one entry; fails if the row has no reserved slot left
    pub fn place(&mut self, row: usize, col: usize, weight: Option<T>) -> Result<()> {
        if row >= self.n_rows() {
            return Err(FormatError::inconsistent(format!(
                "row {} was not seen while counting ({} rows)",
                row + 1,
                self.n_rows()
            )));
        }
        let slot = self.cursor.advance(row).ok_or_else(|| {
            FormatError::inconsistent(format!("row {} has more entries than counted", row + 1))
        })?;

        self.col_idx[slot] = col;
        if let Some(values) = &mut self.values {
            values[slot] = weight.ok_or_else(|| {
                FormatError::inconsistent(format!("entry in row {} lost its weight", row + 1))
            })?;
        }
        Ok(())
    }

    /// Checks that every reserved slot was filled exactly once
    pub fn finish(self) -> Result<Placed<T>> {
        if let Some(row) = self.cursor.first_incomplete() {
            return Err(FormatError::inconsistent(format!(
                "row {} received fewer entries than counted",
                row + 1
            )));
        }

        Ok(Placed {
            row_ptr: self.cursor.offsets,
            col_idx: self.col_idx,
            values: self.values,
        })
    }
}
