//! Benchmarks for the RLE container hot paths.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use term_rle::{Run, RleVec};

type Rle = RleVec<u32, u32, 4>;

/// Alternating two-value stripes: the worst case for coalescing, every run
/// boundary survives.
fn striped(runs: usize, run_len: u32) -> Rle {
    (0..runs)
        .map(|i| Run::new((i % 2) as u32, run_len))
        .collect()
}

fn bench_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace");

    for &runs in &[4usize, 64, 1024] {
        let base = striped(runs, 8);
        let len = base.len();
        group.throughput(Throughput::Elements(runs as u64));

        // Overwrite the middle third with one value: splits both boundary
        // runs and erases everything between them.
        group.bench_with_input(BenchmarkId::new("middle_third", runs), &base, |b, base| {
            b.iter(|| {
                let mut rle = base.clone();
                rle.replace(len / 3, 2 * len / 3, 7).unwrap();
                black_box(rle)
            });
        });

        // Insert a foreign run in the middle of an existing run: the
        // mid-insertion split path.
        group.bench_with_input(BenchmarkId::new("mid_insert", runs), &base, |b, base| {
            b.iter(|| {
                let mut rle = base.clone();
                rle.replace_run(len / 2, len / 2, Run::new(9, 3)).unwrap();
                black_box(rle)
            });
        });

        // Paint the whole sequence back to a single run.
        group.bench_with_input(BenchmarkId::new("fill_all", runs), &base, |b, base| {
            b.iter(|| {
                let mut rle = base.clone();
                rle.replace(0, len, 1).unwrap();
                black_box(rle)
            });
        });
    }

    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for &runs in &[64usize, 1024] {
        let base = striped(runs, 8);
        group.throughput(Throughput::Elements(base.len() as u64));

        group.bench_with_input(BenchmarkId::new("sum_elements", runs), &base, |b, base| {
            b.iter(|| base.iter().copied().sum::<u32>());
        });

        group.bench_with_input(BenchmarkId::new("cursor_seek", runs), &base, |b, base| {
            let len = base.len() as isize;
            b.iter(|| {
                let mut cursor = base.cursor();
                cursor.advance(len / 2);
                cursor.advance(len / 2 - len);
                black_box(cursor.get())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_replace, bench_iterate);
criterion_main!(benches);
