//! Properties of the counting-sort construction engine

mod common;

use std::io::Cursor;

use common::{assert_offsets_valid, weight};
use csr_io::builder::{assemble, BucketCounts, Bounds, BuildPlan, Edge, EdgePlacer, Replay};
use csr_io::matrix::Triangle;
use csr_io::{load, CsrMatrix, ErrorKind, Format};
use proptest::prelude::*;

fn edge_list(edges: &[(usize, usize)]) -> String {
    edges.iter().map(|(u, v)| format!("{} {}\n", u + 1, v + 1)).collect()
}

fn lower_triangle_edges() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2..12usize).prop_flat_map(|n| {
        let edge = (1..n).prop_flat_map(|u| (Just(u), 0..u));
        (Just(n), prop::collection::vec(edge, 0..30))
    })
}

proptest! {
    #[test]
    fn dynamic_growth_ignores_edge_order(
        edges in prop::collection::vec((0..50usize, 0..50usize), 1..60)
            .prop_flat_map(|e| (Just(e.clone()), Just(e).prop_shuffle()))
    ) {
        let (original, shuffled) = edges;
        let max_endpoint = original.iter().map(|&(u, v)| u.max(v)).max().unwrap() + 1;

        let a: CsrMatrix<f64> = load(Format::Snap, Cursor::new(edge_list(&original))).unwrap();
        let b: CsrMatrix<f64> = load(Format::Snap, Cursor::new(edge_list(&shuffled))).unwrap();

        prop_assert_eq!(a.n_rows, max_endpoint);
        prop_assert_eq!(b.n_rows, max_endpoint);
        prop_assert_eq!(&a.row_ptr, &b.row_ptr);
        prop_assert!(a.same_entries(&b));
    }

    #[test]
    fn symmetric_input_is_doubled((n, edges) in lower_triangle_edges()) {
        let mut input = format!(
            "%%MatrixMarket matrix coordinate pattern symmetric\n{} {} {}\n",
            n, n, edges.len()
        );
        input.push_str(&edge_list(&edges));

        let m: CsrMatrix<f64> = load(Format::MatrixMarket, Cursor::new(input)).unwrap();
        prop_assert_eq!(m.nnz(), 2 * edges.len());
        prop_assert!(m.is_structurally_symmetric());
        assert_offsets_valid(&m);
    }

    #[test]
    fn undirected_edge_list_is_doubled((_, edges) in lower_triangle_edges()) {
        prop_assume!(!edges.is_empty());
        let m: CsrMatrix<f64> = load(Format::UgraphEdges, Cursor::new(edge_list(&edges))).unwrap();
        prop_assert_eq!(m.nnz(), 2 * edges.len());
        prop_assert!(m.is_structurally_symmetric());
    }

    #[test]
    fn placement_fills_every_slot(
        n in 1..20usize,
        rows in prop::collection::vec(0..20usize, 0..80),
        w in weight(),
    ) {
        let rows: Vec<usize> = rows.into_iter().map(|r| r % n).collect();
        let mut counts = BucketCounts::fixed(n, 1).unwrap();
        for &r in &rows {
            counts.increment(r);
        }
        prop_assert_eq!(counts.total(), rows.len());

        let cursor = counts.into_cursor();
        let offsets = cursor.offsets.clone();
        let mut placer = EdgePlacer::new(cursor, true);
        for &r in &rows {
            placer.place(r, 0, Some(w)).unwrap();
        }
        let placed = placer.finish().unwrap();
        prop_assert_eq!(placed.row_ptr, offsets);
        prop_assert_eq!(placed.col_idx.len(), rows.len());
    }

    #[test]
    fn assembled_offsets_are_valid(
        edges in prop::collection::vec((0..30usize, 0..30usize, weight()), 0..60),
        capacity in 1..8usize,
    ) {
        let plan = BuildPlan {
            bounds: Bounds::Discovered { initial_capacity: capacity },
            entries: None,
            mirror: false,
            triangle: Triangle::Any,
            weighted: true,
            header_line: 0,
        };
        let stream: Vec<Edge<f64>> = edges
            .iter()
            .enumerate()
            .map(|(k, &(r, c, w))| Edge::new(r, c, Some(w), k + 1))
            .collect();
        let m = assemble(&plan, &mut Replay::new(stream)).unwrap();
        assert_offsets_valid(&m);
        prop_assert_eq!(m.nnz(), edges.len());
    }
}

#[test]
fn test_short_second_pass_is_detected() {
    let mut counts = BucketCounts::fixed(2, 1).unwrap();
    counts.increment(0);
    counts.increment(1);

    let mut placer = EdgePlacer::<f64>::new(counts.into_cursor(), false);
    placer.place(0, 1, None).unwrap();
    let err = placer.finish().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StreamInconsistency);
}

#[test]
fn test_growing_counter_doubles() {
    let mut counts = BucketCounts::growing(2);
    counts.observe(0, 1).unwrap();
    assert_eq!(counts.capacity(), 2);
    counts.observe(4, 2).unwrap();
    assert_eq!(counts.capacity(), 8);
    assert_eq!(counts.n_rows(), 5);
}
