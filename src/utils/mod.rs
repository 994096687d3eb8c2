//! Utility functions and helpers

pub mod formats;

pub use formats::{from_sprs_csr, to_sprs_csr};

/// Turns per-bucket counts into running totals, in place
///
/// `counts[i] += counts[i - 1]` from low to high. With `counts[0] == 0` and
/// the entries of bucket `i` stored at `counts[i + 1]`, the result holds the
/// start offset of every bucket plus the total at the end.
pub fn inclusive_scan_in_place(counts: &mut [usize]) {
    for i in 1..counts.len() {
        counts[i] += counts[i - 1];
    }
}

/// Empty vector with room for `capacity` elements
///
/// Returns `None` instead of aborting when the allocation cannot be made,
/// so sizes read from untrusted headers surface as errors.
pub fn try_with_capacity<T>(capacity: usize) -> Option<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(capacity).ok()?;
    Some(v)
}

/// Vector of `len` copies of `value`, or `None` when it cannot be allocated
pub fn try_filled<T: Clone>(len: usize, value: T) -> Option<Vec<T>> {
    let mut v = try_with_capacity(len)?;
    v.resize(len, value);
    Some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_scan_in_place() {
        let mut counts = vec![0, 1, 2, 3, 4];
        inclusive_scan_in_place(&mut counts);
        assert_eq!(counts, vec![0, 1, 3, 6, 10]);

        let mut counts = vec![0, 0, 5, 0];
        inclusive_scan_in_place(&mut counts);
        assert_eq!(counts, vec![0, 0, 5, 5]);

        let mut empty: Vec<usize> = Vec::new();
        inclusive_scan_in_place(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_try_allocation() {
        assert_eq!(try_filled(3, 7u8), Some(vec![7, 7, 7]));
        assert!(try_with_capacity::<usize>(4).unwrap().capacity() >= 4);
        assert!(try_filled(usize::MAX, 0usize).is_none());
        assert!(try_with_capacity::<u64>(usize::MAX / 4).is_none());
    }
}
