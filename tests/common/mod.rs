//! Helpers shared by the integration tests
#![allow(dead_code)]

use csr_io::CsrMatrix;
use proptest::prelude::*;

/// Builds a CSR matrix from (row, col, weight) triplets, keeping their order
/// within each row
pub fn from_triplets(
    n_rows: usize,
    n_cols: usize,
    triplets: &[(usize, usize, f64)],
    weighted: bool,
) -> CsrMatrix<f64> {
    let mut rows: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n_rows];
    for &(r, c, w) in triplets {
        rows[r].push((c, w));
    }

    let mut row_ptr = vec![0];
    let mut col_idx = Vec::new();
    let mut values = Vec::new();
    for row in rows {
        for (c, w) in row {
            col_idx.push(c);
            values.push(w);
        }
        row_ptr.push(col_idx.len());
    }

    CsrMatrix::try_new(n_rows, n_cols, row_ptr, col_idx, weighted.then_some(values)).unwrap()
}

/// Builds a symmetric matrix storing each undirected edge in both directions
/// (self-loops once)
pub fn undirected(n: usize, edges: &[(usize, usize, f64)], weighted: bool) -> CsrMatrix<f64> {
    let mut triplets = Vec::with_capacity(edges.len() * 2);
    for &(u, v, w) in edges {
        triplets.push((u, v, w));
        if u != v {
            triplets.push((v, u, w));
        }
    }
    from_triplets(n, n, &triplets, weighted).with_symmetric(true)
}

/// Offsets start at 0, never decrease and end at nnz
pub fn assert_offsets_valid(m: &CsrMatrix<f64>) {
    assert_eq!(m.row_ptr.len(), m.n_rows + 1);
    assert_eq!(m.row_ptr[0], 0);
    assert!(m.row_ptr.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(m.row_ptr[m.n_rows], m.nnz());
    if let Some(values) = &m.values {
        assert_eq!(values.len(), m.nnz());
    }
    assert!(m.col_idx.iter().all(|&c| c < m.n_cols));
}

/// Weights with exact decimal representations
pub fn weight() -> impl Strategy<Value = f64> {
    (-40i32..40).prop_map(|w| f64::from(w) / 4.0)
}

/// Rectangular matrix as (rows, cols, triplets)
pub fn rectangular(max_dim: usize, max_nnz: usize) -> impl Strategy<Value = (usize, usize, Vec<(usize, usize, f64)>)> {
    (1..=max_dim, 1..=max_dim).prop_flat_map(move |(nr, nc)| {
        let entry = (0..nr, 0..nc, weight());
        (Just(nr), Just(nc), prop::collection::vec(entry, 0..max_nnz))
    })
}

/// Square matrix as (n, triplets)
pub fn square(max_dim: usize, max_nnz: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize, f64)>)> {
    (1..=max_dim).prop_flat_map(move |n| {
        let entry = (0..n, 0..n, weight());
        (Just(n), prop::collection::vec(entry, 0..max_nnz))
    })
}
