//! Assembly for formats whose body is already ordered by row
//!
//! CLUTO, METIS and ugraph list one row per line, so row offsets can be
//! appended as each line ends. Slots can be reserved at the front of a row
//! for entries a later mirroring pass fills in.

use crate::error::{FormatError, Result};
use crate::matrix::Scalar;
use crate::utils::try_with_capacity;

/// Placeholder column for reserved slots
pub const RESERVED: usize = usize::MAX;

#[derive(Debug)]
pub struct RowAssembler<T> {
    n_rows: usize,
    n_cols: usize,
    nnz: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Option<Vec<T>>,
}

impl<T: Scalar> RowAssembler<T> {
    /// Assembler for `n_rows` rows holding exactly `nnz` entries
    ///
    /// Sizes come from the header on `line`; sizes that cannot be allocated
    /// are reported against it.
    pub fn new(n_rows: usize, n_cols: usize, nnz: usize, weighted: bool, line: usize) -> Result<Self> {
        let mut row_ptr = n_rows
            .checked_add(1)
            .and_then(try_with_capacity)
            .ok_or_else(|| FormatError::too_large(line, "row count", n_rows))?;
        row_ptr.push(0);

        let too_large = || FormatError::too_large(line, "entry count", nnz);
        let col_idx = try_with_capacity(nnz).ok_or_else(too_large)?;
        let values = if weighted {
            Some(try_with_capacity(nnz).ok_or_else(too_large)?)
        } else {
            None
        };

        Ok(Self {
            n_rows,
            n_cols,
            nnz,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Index of the row currently being filled
    pub fn current_row(&self) -> usize {
        self.row_ptr.len() - 1
    }

    pub fn rows_done(&self) -> usize {
        self.row_ptr.len() - 1
    }

    pub fn len(&self) -> usize {
        self.col_idx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.col_idx.is_empty()
    }

    /// Appends an entry to the current row
    ///
    /// `col` is 0-based; `line` is only used for error reporting.
    pub fn push(&mut self, col: usize, weight: Option<T>, line: usize) -> Result<()> {
        if col >= self.n_cols {
            return Err(FormatError::out_of_range(line, "column", col + 1, self.n_cols));
        }
        if self.col_idx.len() == self.nnz {
            return Err(FormatError::mismatch("nnz", self.nnz, self.nnz + 1));
        }
        self.col_idx.push(col);
        if let Some(values) = &mut self.values {
            values.push(weight.unwrap_or_else(T::zero));
        }
        Ok(())
    }

    /// Reserves `count` slots at the current position of the current row
    pub fn reserve(&mut self, count: usize) -> Result<()> {
        if self.col_idx.len() + count > self.nnz {
            return Err(FormatError::mismatch("nnz", self.nnz, self.col_idx.len() + count));
        }
        self.col_idx.extend(std::iter::repeat(RESERVED).take(count));
        if let Some(values) = &mut self.values {
            values.extend(std::iter::repeat(T::zero()).take(count));
        }
        Ok(())
    }

    /// Closes the current row
    pub fn end_row(&mut self) -> Result<()> {
        if self.rows_done() == self.n_rows {
            return Err(FormatError::mismatch("rows", self.n_rows, self.n_rows + 1));
        }
        self.row_ptr.push(self.col_idx.len());
        Ok(())
    }

    /// Checks the declared row and entry counts and hands back the arrays
    pub fn finish(self) -> Result<(Vec<usize>, Vec<usize>, Option<Vec<T>>)> {
        if self.rows_done() != self.n_rows {
            return Err(FormatError::mismatch("rows", self.n_rows, self.rows_done()));
        }
        if self.col_idx.len() != self.nnz {
            return Err(FormatError::mismatch("nnz", self.nnz, self.col_idx.len()));
        }
        Ok((self.row_ptr, self.col_idx, self.values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_rows_in_insertion_order() {
        let mut rows = RowAssembler::<f64>::new(3, 4, 3, true, 1).unwrap();
        rows.push(3, Some(1.5), 1).unwrap();
        rows.push(0, Some(2.5), 1).unwrap();
        rows.end_row().unwrap();
        rows.end_row().unwrap();
        rows.push(1, Some(3.5), 3).unwrap();
        rows.end_row().unwrap();

        let (row_ptr, col_idx, values) = rows.finish().unwrap();
        assert_eq!(row_ptr, vec![0, 2, 2, 3]);
        assert_eq!(col_idx, vec![3, 0, 1]);
        assert_eq!(values, Some(vec![1.5, 2.5, 3.5]));
    }

    #[test]
    fn test_too_many_entries() {
        let mut rows = RowAssembler::<f64>::new(1, 2, 1, false, 1).unwrap();
        rows.push(0, None, 1).unwrap();
        let err = rows.push(1, None, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn test_too_few_rows() {
        let mut rows = RowAssembler::<f64>::new(2, 2, 0, false, 1).unwrap();
        rows.end_row().unwrap();
        assert_eq!(rows.finish().unwrap_err().kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn test_column_out_of_range() {
        let mut rows = RowAssembler::<f64>::new(1, 2, 1, false, 1).unwrap();
        let err = rows.push(2, None, 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRangeIndex);
    }

    #[test]
    fn test_reserved_slots_count_toward_nnz() {
        let mut rows = RowAssembler::<f64>::new(1, 2, 2, false, 1).unwrap();
        rows.reserve(1).unwrap();
        rows.push(1, None, 1).unwrap();
        rows.end_row().unwrap();

        let (_, col_idx, _) = rows.finish().unwrap();
        assert_eq!(col_idx, vec![RESERVED, 1]);
    }

    #[test]
    fn test_unallocatable_header_sizes() {
        let err = RowAssembler::<f64>::new(usize::MAX, 1, 0, false, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedHeader);
        assert!(err.to_string().contains("line 3"));

        let err = RowAssembler::<f64>::new(1, 1, usize::MAX / 2, true, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedHeader);
    }
}
