//! Benchmarks for loading generated edge lists and Matrix Market files

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use csr_io::{load, load_seekable, CsrMatrix, Format, IoConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random weighted edges over `n` vertices
fn random_edges(n: usize, m: usize, seed: u64) -> Vec<(usize, usize, f64)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..m)
        .map(|_| (rng.gen_range(1..=n), rng.gen_range(1..=n), rng.gen_range(0.0..1.0)))
        .collect()
}

fn snap_text(edges: &[(usize, usize, f64)]) -> String {
    let mut text = String::from("# generated\n");
    for (u, v, w) in edges {
        text.push_str(&format!("{} {} {}\n", u, v, w));
    }
    text
}

fn matrix_market_text(n: usize, edges: &[(usize, usize, f64)]) -> String {
    let mut text = format!(
        "%%MatrixMarket matrix coordinate real general\n{} {} {}\n",
        n,
        n,
        edges.len()
    );
    for (u, v, w) in edges {
        text.push_str(&format!("{} {} {}\n", u, v, w));
    }
    text
}

fn bench_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap");
    for &(n, m) in &[(1_000, 10_000), (10_000, 100_000)] {
        let text = snap_text(&random_edges(n, m, 42));

        group.bench_with_input(BenchmarkId::new("buffered", m), &text, |b, text| {
            b.iter(|| {
                let matrix: CsrMatrix<f64> = load(Format::Snap, Cursor::new(text.as_bytes())).unwrap();
                black_box(matrix)
            })
        });
        group.bench_with_input(BenchmarkId::new("rewind", m), &text, |b, text| {
            b.iter(|| {
                let matrix: CsrMatrix<f64> =
                    load_seekable(Format::Snap, Cursor::new(text.as_bytes()), &IoConfig::default()).unwrap();
                black_box(matrix)
            })
        });
    }
    group.finish();
}

fn bench_matrix_market(c: &mut Criterion) {
    let n = 10_000;
    let text = matrix_market_text(n, &random_edges(n, 100_000, 7));

    c.bench_function("matrix_market_100k", |b| {
        b.iter(|| {
            let matrix: CsrMatrix<f64> =
                load_seekable(Format::MatrixMarket, Cursor::new(text.as_bytes()), &IoConfig::default()).unwrap();
            black_box(matrix)
        })
    });
}

criterion_group!(benches, bench_snap, bench_matrix_market);
criterion_main!(benches);
