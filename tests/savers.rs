//! Text produced by the savers

mod common;

use common::{from_triplets, undirected};
use csr_io::{check, save, CsrMatrix, ErrorKind, Format};
use ndarray::array;

fn save_str(format: Format, m: &CsrMatrix<f64>) -> csr_io::Result<String> {
    let mut out = Vec::new();
    save(format, &mut out, m)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_matrix_market_banner_fields() {
    let weighted = from_triplets(2, 3, &[(0, 2, 1.5), (1, 0, 2.0)], true);
    assert_eq!(
        save_str(Format::MatrixMarket, &weighted).unwrap(),
        "%%MatrixMarket matrix coordinate real general\n2 3 2\n1 3 1.5\n2 1 2\n"
    );

    let symmetric = undirected(3, &[(1, 0, 1.0), (2, 2, 1.0)], false);
    assert_eq!(
        save_str(Format::MatrixMarket, &symmetric).unwrap(),
        "%%MatrixMarket matrix coordinate pattern symmetric\n3 3 2\n2 1\n3 3\n"
    );
}

#[test]
fn test_metis_flag_word_is_three_digits() {
    let m = undirected(2, &[(0, 1, 1.0)], false)
        .with_vertex_sizes(vec![3, 4])
        .unwrap();
    assert_eq!(save_str(Format::Metis, &m).unwrap(), "2 1 100\n3 2\n4 1\n");

    let m = undirected(2, &[(0, 1, 1.0)], false)
        .with_vertex_weights(array![[7.0], [8.0]])
        .unwrap();
    assert_eq!(save_str(Format::Metis, &m).unwrap(), "2 1 010 1\n7 2\n8 1\n");
}

#[test]
fn test_ugraph_lists_each_edge_once() {
    let m = undirected(3, &[(0, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0)], false);
    assert_eq!(save_str(Format::Ugraph, &m).unwrap(), "3 3\n2 3\n3\n\n");
    assert_eq!(save_str(Format::UgraphEdges, &m).unwrap(), "1 2\n1 3\n2 3\n");
}

#[test]
fn test_rejections_write_nothing() {
    let directed = from_triplets(2, 2, &[(0, 1, 1.0)], true);
    let rectangular = from_triplets(2, 3, &[(0, 1, 1.0), (1, 2, 1.0)], true);

    let cases = [
        (Format::Ugraph, &directed, ErrorKind::NotSymmetric),
        (Format::UgraphEdges, &directed, ErrorKind::NotSymmetric),
        (Format::Metis, &directed, ErrorKind::UnsupportedDialect),
        (Format::Metis, &rectangular, ErrorKind::DimensionMismatch),
        (Format::Dimacs, &rectangular, ErrorKind::DimensionMismatch),
    ];
    for (format, m, kind) in cases {
        assert_eq!(check(format, m).unwrap_err().kind(), kind, "{}", format);
        let mut out = Vec::new();
        assert!(save(format, &mut out, m).is_err());
        assert!(out.is_empty(), "{} wrote output before failing", format);
    }
}

#[test]
fn test_inconsistent_matrix_rejected_by_every_saver() {
    let mut broken = from_triplets(2, 2, &[(0, 1, 1.0)], true);
    broken.row_ptr = vec![0, 2, 1];

    for format in Format::ALL {
        assert!(check(format, &broken).is_err(), "{}", format);
    }
}
