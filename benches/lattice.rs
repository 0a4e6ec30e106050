//! Lattice, region search and abundance benchmarks
//!
//! Covers bodies from the smallest (13 lots) to the home body (1.77M lots).
//!
//! Run with: cargo bench --bench lattice

use asteroid_lots::asteroid::size::surface_area;
use asteroid_lots::lattice::{
    closest_lots, lot_distance, lot_positions, ClosestLotsQuery, RegionGrid,
};
use asteroid_lots::resources::{abundance_at, abundance_map, abundance_map_settings, Resource};
use asteroid_lots::{PackedU256, Vec3};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

const BLOB: &str = "0x8121cb4138751fc9a000000004c";

/// Body ids spanning the size range
const BODIES: [u64; 4] = [250_000, 2500, 104, 1];

fn random_unit_points(count: usize) -> Vec<Vec3> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let y: f64 = rng.gen_range(-1.0..1.0);
            let theta = rng.gen_range(0.0..std::f64::consts::TAU);
            let r = (1.0 - y * y).sqrt();
            Vec3::new(theta.cos() * r, y, theta.sin() * r)
        })
        .collect()
}

/// Benchmark batch lot position generation
fn bench_lot_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("lot_positions");
    group.sample_size(20);

    for body in BODIES {
        let tally = surface_area(body).unwrap();
        group.throughput(Throughput::Elements(tally as u64));
        group.bench_with_input(BenchmarkId::new("batch", tally), &tally, |b, &tally| {
            b.iter(|| black_box(lot_positions(tally)));
        });
    }

    group.finish();
}

/// Benchmark nearest-region lookups
fn bench_region_of(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_of");
    group.sample_size(50);
    let points = random_unit_points(1000);

    for tally in [100u32, 1000, 5000] {
        let grid = RegionGrid::new(tally).unwrap();
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_with_input(BenchmarkId::new("grid", tally), &tally, |b, _| {
            b.iter(|| {
                for p in &points {
                    black_box(grid.region_of(*p));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark k-nearest lot queries
fn bench_closest_lots(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_lots");
    group.sample_size(30);
    let points = random_unit_points(32);

    for body in BODIES {
        let tally = surface_area(body).unwrap();
        for k in [1u32, 10] {
            group.bench_with_input(
                BenchmarkId::new(format!("k{}", k), tally),
                &tally,
                |b, &tally| {
                    b.iter(|| {
                        for p in &points {
                            let q = ClosestLotsQuery::around_point(*p, tally).take(k);
                            black_box(closest_lots(&q).unwrap());
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark single distances and abundance samples
fn bench_point_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_queries");
    group.sample_size(100);
    let blob: PackedU256 = BLOB.parse().unwrap();

    group.bench_function("lot_distance", |b| {
        b.iter(|| black_box(lot_distance(1, black_box(2345), black_box(345_634)).unwrap()));
    });

    let settings = abundance_map_settings(1, Resource::Water, &blob).unwrap();
    let points = random_unit_points(256);
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("abundance_at_6_octaves", |b| {
        b.iter(|| {
            for p in &points {
                black_box(abundance_at(*p, &settings).unwrap());
            }
        });
    });

    group.finish();
}

/// Benchmark whole-body abundance maps
fn bench_abundance_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("abundance_map");
    group.sample_size(10);
    let blob: PackedU256 = BLOB.parse().unwrap();

    for body in [250_000u64, 2500, 104] {
        let tally = surface_area(body).unwrap();
        group.throughput(Throughput::Elements(tally as u64));
        group.bench_with_input(BenchmarkId::new("water", tally), &body, |b, &body| {
            b.iter(|| black_box(abundance_map(body, Resource::Water, &blob).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_lot_positions,
    bench_region_of,
    bench_closest_lots,
    bench_point_queries,
    bench_abundance_map,
);

criterion_main!(benches);
