//! Bucket counting: per-row histogram turned into row offsets

use tracing::trace;

use crate::error::{FormatError, Result};
use crate::utils::{inclusive_scan_in_place, try_filled};

/// Per-row entry counts collected during the first pass
///
/// Slot `row + 1` counts the entries of `row`; slot 0 stays zero so that the
/// prefix sum yields row start offsets directly.
#[derive(Debug)]
pub struct BucketCounts {
    counts: Vec<usize>,
    n_rows: usize,
    growable: bool,
}

impl BucketCounts {
    /// Counter for a declared number of rows
    ///
    /// `line` is the header line the row count came from.
    pub fn fixed(n_rows: usize, line: usize) -> Result<Self> {
        let counts = n_rows
            .checked_add(1)
            .and_then(|len| try_filled(len, 0))
            .ok_or_else(|| FormatError::too_large(line, "row count", n_rows))?;
        Ok(Self {
            counts,
            n_rows,
            growable: false,
        })
    }

    /// Counter whose row bound is discovered from the data
    pub fn growing(initial_capacity: usize) -> Self {
        Self {
            counts: vec![0; initial_capacity.max(1) + 1],
            n_rows: 0,
            growable: true,
        }
    }

    /// Current row bound (declared, or largest index observed plus one)
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of rows the counter can hold without growing
    pub fn capacity(&self) -> usize {
        self.counts.len() - 1
    }

    pub fn contains(&self, row: usize) -> bool {
        row < self.n_rows
    }

    /// Extends a growable counter so that `index` is a valid row
    ///
    /// Capacity doubles until it covers the index; the new region is zeroed.
    /// Fixed counters are left untouched. An index the counter cannot grow
    /// to is reported as out of range on `line`.
    pub fn observe(&mut self, index: usize, line: usize) -> Result<()> {
        if !self.growable || self.contains(index) {
            return Ok(());
        }
        let old_capacity = self.capacity();
        let out_of_range = || FormatError::out_of_range(line, "vertex", index.saturating_add(1), old_capacity);

        let n_rows = index.checked_add(1).ok_or_else(out_of_range)?;
        let mut capacity = old_capacity;
        while n_rows > capacity {
            capacity = capacity.checked_mul(2).unwrap_or(n_rows);
        }
        if capacity > old_capacity {
            let len = capacity.checked_add(1).ok_or_else(out_of_range)?;
            trace!(old_capacity, capacity, "growing bucket counter");
            self.counts
                .try_reserve_exact(len - self.counts.len())
                .map_err(|_| out_of_range())?;
            self.counts.resize(len, 0);
        }
        self.n_rows = n_rows;
        Ok(())
    }

    /// Counts one entry in `row`
    ///
    /// # Panics
    ///
    /// Panics if `row` is outside the counter; callers check bounds first.
    pub fn increment(&mut self, row: usize) {
        assert!(self.contains(row), "row {} outside counter of {} rows", row, self.n_rows);
        self.counts[row + 1] += 1;
    }

    /// Entries counted so far in `row`
    pub fn count(&self, row: usize) -> usize {
        self.counts[row + 1]
    }

    /// Total number of entries counted
    pub fn total(&self) -> usize {
        self.counts[1..=self.n_rows].iter().sum()
    }

    /// Replaces the histogram with its prefix sum
    ///
    /// The counter storage becomes the write cursor; the returned offsets are
    /// a copy of its initial state.
    pub fn into_cursor(mut self) -> RowCursor {
        self.counts.truncate(self.n_rows + 1);
        inclusive_scan_in_place(&mut self.counts);

        RowCursor {
            offsets: self.counts.clone(),
            cursor: self.counts,
        }
    }
}

/// Row offsets plus a per-row write cursor, produced by [`BucketCounts::into_cursor`]
#[derive(Debug, Clone)]
pub struct RowCursor {
    /// Final row offsets (length n_rows + 1)
    pub offsets: Vec<usize>,
    /// Next free slot of each row; starts equal to `offsets`
    pub cursor: Vec<usize>,
}

impl RowCursor {
    pub fn n_rows(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn nnz(&self) -> usize {
        self.offsets[self.n_rows()]
    }

    /// Takes the next slot of `row`, or `None` when the row is already full
    pub fn advance(&mut self, row: usize) -> Option<usize> {
        let slot = self.cursor[row];
        if slot >= self.offsets[row + 1] {
            return None;
        }
        self.cursor[row] += 1;
        Some(slot)
    }

    /// First row whose cursor did not reach the start of the next row
    pub fn first_incomplete(&self) -> Option<usize> {
        (0..self.n_rows()).find(|&i| self.cursor[i] != self.offsets[i + 1])
    }
}
