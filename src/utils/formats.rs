//! Utilities for converting between our matrix type and sprs

use num_traits::Num;
use sprs::{CsMat, TriMat};

use crate::matrix::{CsrMatrix, Scalar};

/// Converts a CSR matrix to sprs CsMat format
///
/// sprs requires sorted, duplicate-free rows, so entries go through a
/// triplet matrix; duplicates are summed. Pattern matrices get value one.
pub fn to_sprs_csr<T>(matrix: &CsrMatrix<T>) -> CsMat<T>
where
    T: Scalar + Default,
{
    let mut triplets = TriMat::with_capacity((matrix.n_rows, matrix.n_cols), matrix.nnz());
    for (row, col, value) in matrix.entries() {
        triplets.add_triplet(row, col, value.unwrap_or_else(T::one));
    }
    triplets.to_csr()
}

/// Converts sprs CsMat to our CSR format
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> CsrMatrix<T>
where
    T: Scalar + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    CsrMatrix::new(shape.0, shape.1, indptr, indices, data)
}
