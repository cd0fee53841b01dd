//! Benchmarks for rtlut lookups and decoding.
//!
//! Run with: `cargo bench -p rtlut-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use rtlut_core::{Axis, Table};
use rtlut_io::{AxisSpec, LutLayout, decode_bytes, encode_to_vec};

/// Axis lengths of the MERIS aerosol table (wavelength .. parameter).
const MERIS_SHAPE: [usize; 7] = [15, 9, 4, 19, 14, 13, 5];

/// A table with MERIS-sized axes over `0..len` and a smooth value field.
fn meris_sized_table() -> Table {
    let axes: Vec<Axis> = MERIS_SHAPE
        .iter()
        .map(|&len| {
            let values: Vec<f64> = (0..len).map(|i| i as f64).collect();
            Axis::from_vec(values).unwrap()
        })
        .collect();
    let count: usize = MERIS_SHAPE.iter().product();
    let values = (0..count).map(|i| ((i % 9973) as f64 * 1e-4).sqrt()).collect();
    Table::new(values, axes).unwrap()
}

/// Stream layout for [`meris_sized_table`] with a reversed azimuth.
fn meris_sized_layout() -> LutLayout {
    let names = ["wavelength", "aot", "elevation", "azimuth", "sza", "vza", "parameter"];
    let axes = names
        .iter()
        .map(|&n| {
            let spec = AxisSpec::stream(n);
            if n == "azimuth" { spec.reversed() } else { spec }
        })
        .collect();
    LutLayout::new("bench", axes)
}

/// `count` interior query points, packed row-wise.
fn query_points(count: usize) -> Vec<f64> {
    let mut coords = Vec::with_capacity(count * MERIS_SHAPE.len());
    for p in 0..count {
        for (k, &len) in MERIS_SHAPE.iter().enumerate() {
            let span = (len - 1) as f64;
            let frac = ((p * 7919 + k * 104_729) % 1000) as f64 / 1000.0;
            coords.push(frac * span);
        }
    }
    coords
}

/// Benchmark bracketing on axes of growing length.
fn bench_bracket(c: &mut Criterion) {
    let mut group = c.benchmark_group("bracket");

    for len in [8usize, 64, 1024] {
        let axis = Axis::from_vec((0..len).map(|i| i as f64 * 0.5).collect()).unwrap();
        let xs: Vec<f64> = (0..1000).map(|i| i as f64 * (len as f64 / 2000.0)).collect();
        group.throughput(Throughput::Elements(xs.len() as u64));
        group.bench_with_input(BenchmarkId::new("locate", len), &xs, |b, xs| {
            b.iter(|| xs.iter().map(|&x| axis.bracket(black_box(x))).collect::<Vec<_>>())
        });
    }

    group.finish();
}

/// Benchmark single-point interpolation.
fn bench_get_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_value");

    let curve = Table::from_curve(&[0.0, 25.92, 179.0, 500.0], &[610.0, 587.0, 491.9, 450.0]).unwrap();
    group.bench_function("1d", |b| b.iter(|| curve.get_value_1d(black_box(130.0))));

    let table = meris_sized_table();
    let interior = [7.3, 2.5, 1.2, 9.9, 3.1, 6.6, 2.4];
    let on_grid = [7.0, 2.0, 1.0, 9.0, 3.0, 6.0, 2.0];
    group.bench_function("7d_interior", |b| b.iter(|| table.get_value(black_box(&interior))));
    group.bench_function("7d_on_grid", |b| b.iter(|| table.get_value(black_box(&on_grid))));

    group.finish();
}

/// Benchmark batch evaluation, serial and on the rayon pool.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let table = meris_sized_table();

    for count in [1_000usize, 100_000] {
        let coords = query_points(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("serial", count), &coords, |b, c| {
            b.iter(|| table.get_values(black_box(c)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", count), &coords, |b, c| {
            b.iter(|| table.par_get_values(black_box(c)))
        });
    }

    group.finish();
}

/// Benchmark decoding a MERIS-sized stream with a reversed axis.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.sample_size(20);

    let layout = meris_sized_layout();
    let bytes = encode_to_vec(&layout, &meris_sized_table()).unwrap();
    let count: usize = MERIS_SHAPE.iter().product();
    group.throughput(Throughput::Elements(count as u64));
    group.bench_function("meris_sized", |b| b.iter(|| decode_bytes(black_box(&bytes), &layout)));

    group.finish();
}

criterion_group!(benches, bench_bracket, bench_get_value, bench_batch, bench_decode);
criterion_main!(benches);
