//! Mirroring one stored triangle into the other

use crate::error::{FormatError, Result};

/// Fills the reserved slots of each row with the transposed upper triangle
///
/// Row `i` occupies `row_ptr[i]..row_ptr[i + 1]`; its first `reserved[i]`
/// slots are empty and the rest hold entries read from the file. For every
/// stored `(i, c)` with `c > i`, `(c, i)` is written into the next reserved
/// slot of row `c`. The cursor is seeded from the row starts, so mirrored
/// entries of a row appear in increasing source-row order ahead of its own
/// entries. Self-loops are left alone.
pub fn mirror_upper_triangle<T: Copy>(
    row_ptr: &[usize],
    reserved: &[usize],
    col_idx: &mut [usize],
    mut values: Option<&mut [T]>,
) -> Result<()> {
    let n_rows = row_ptr.len() - 1;
    let mut cursor = row_ptr[..n_rows].to_vec();

    for i in 0..n_rows {
        for j in (row_ptr[i] + reserved[i])..row_ptr[i + 1] {
            let col = col_idx[j];
            if col <= i {
                continue;
            }

            let slot = cursor[col];
            if slot >= row_ptr[col] + reserved[col] {
                return Err(FormatError::inconsistent(format!(
                    "row {} has more mirrored entries than reserved",
                    col + 1
                )));
            }
            col_idx[slot] = i;
            if let Some(values) = values.as_deref_mut() {
                values[slot] = values[j];
            }
            cursor[col] += 1;
        }
    }

    if let Some(row) = (0..n_rows).find(|&i| cursor[i] != row_ptr[i] + reserved[i]) {
        return Err(FormatError::inconsistent(format!(
            "row {} has unfilled mirrored slots",
            row + 1
        )));
    }
    Ok(())
}
